//! Shopping list, its CSV export, and the `shopping-list` tool.

pub mod export;
pub mod list;
pub mod tool;

pub use list::{MatchMode, NewItem, ShoppingItem, ShoppingList};
pub use tool::{ShoppingAction, ShoppingToolInput, ShoppingToolOutput};
