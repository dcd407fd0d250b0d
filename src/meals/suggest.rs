//! Meal selection policy and the `meal-suggestion` tool contract.

use serde::{Deserialize, Serialize};

use crate::meals::catalog::{Dish, Ingredient, Meal};
use crate::meals::time::{MealType, TimeContext};

/// Tool identifier.
pub const TOOL_ID: &str = "meal-suggestion";

/// Servings used when the caller does not say.
pub const DEFAULT_SERVINGS: f64 = 2.0;

const fn default_servings() -> f64 {
    DEFAULT_SERVINGS
}

/// Input of the meal-suggestion tool.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealToolInput {
    /// Free-text preferences, e.g. "something with salmon".
    pub preferences: Option<String>,
    /// Dietary restrictions, e.g. `["vegetarian"]`.
    pub dietary_restrictions: Option<Vec<String>>,
    /// Explicit meal category; inferred from the time when absent.
    pub meal_type: Option<MealType>,
    /// Number of servings; negative or non-finite values count as the default.
    #[serde(default = "default_servings")]
    pub servings: f64,
}

impl Default for MealToolInput {
    fn default() -> Self {
        Self::for_servings(DEFAULT_SERVINGS)
    }
}

impl MealToolInput {
    /// Input with no preferences for `servings` people.
    #[must_use]
    pub const fn for_servings(servings: f64) -> Self {
        Self {
            preferences: None,
            dietary_restrictions: None,
            meal_type: None,
            servings,
        }
    }
}

/// Output of the meal-suggestion tool.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealToolOutput {
    /// Whether a meal was produced.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// The suggested meal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<Meal>,
    /// Ingredients ready to go on the shopping list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopping_list_items: Option<Vec<Ingredient>>,
}

fn is_vegetarian_diet(restrictions: &[String]) -> bool {
    restrictions
        .iter()
        .any(|r| r.eq_ignore_ascii_case("vegetarian") || r.eq_ignore_ascii_case("vegan"))
}

/// Choose a dish for the resolved category and the caller's wishes.
///
/// Preference keywords override the category default; a vegetarian or vegan
/// restriction overrides both, except that breakfast and snack dishes are
/// already meat free and stay as they are.
#[must_use]
pub fn select_dish(meal: MealType, preferences: Option<&str>, restrictions: &[String]) -> Dish {
    let mut dish = Dish::for_meal(meal);

    if let Some(pref) = preferences.map(str::to_lowercase) {
        if pref.contains("fish") || pref.contains("salmon") {
            dish = Dish::GrilledSalmon;
        } else if pref.contains("vegetarian") || pref.contains("quinoa") {
            dish = Dish::QuinoaBowl;
        }
    }

    if is_vegetarian_diet(restrictions) {
        dish = match meal {
            MealType::Breakfast => Dish::AvocadoToast,
            MealType::Snack => Dish::YogurtParfait,
            MealType::Lunch | MealType::Dinner => Dish::QuinoaBowl,
        };
    }

    dish
}

/// Servings to cook for: zero is kept, unusable values become the default.
#[must_use]
pub fn effective_servings(servings: f64) -> f64 {
    if servings.is_finite() && servings >= 0.0 {
        servings
    } else {
        DEFAULT_SERVINGS
    }
}

/// Suggest a meal at the given time.
#[must_use]
pub fn suggest(input: &MealToolInput, time: &TimeContext) -> Meal {
    let meal = input.meal_type.unwrap_or_else(|| time.meal_type());
    let restrictions = input.dietary_restrictions.as_deref().unwrap_or_default();
    let dish = select_dish(meal, input.preferences.as_deref(), restrictions);
    dish.prepare(effective_servings(input.servings), time)
}

impl MealToolOutput {
    /// Successful output for `meal` suggested at `time`.
    #[must_use]
    pub fn suggested(meal: Meal, time: &TimeContext) -> Self {
        Self {
            success: true,
            message: format!(
                "Generated meal suggestion for {} at {} - Perfect for {}: {}",
                time.current_date, time.current_time, time.time_label, meal.name
            ),
            shopping_list_items: Some(meal.ingredients.clone()),
            meal: Some(meal),
        }
    }
}

/// Run the meal-suggestion tool.
#[must_use]
pub fn execute(input: &MealToolInput, time: &TimeContext) -> MealToolOutput {
    MealToolOutput::suggested(suggest(input, time), time)
}
