//! Time-aware meal suggestions.

pub mod catalog;
pub mod suggest;
pub mod time;

pub use catalog::{Difficulty, Dish, Ingredient, Macros, Meal};
pub use suggest::{MealToolInput, MealToolOutput, select_dish, suggest};
pub use time::{MealType, TimeContext, band_for_hour};
