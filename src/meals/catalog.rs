//! Canned recipes, one per meal category.

use serde::{Deserialize, Serialize};

use crate::meals::time::{MealType, TimeContext};

/// Effort needed to cook a meal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Little technique required.
    Easy,
    /// Some timing or technique required.
    Medium,
    /// Demanding.
    Hard,
}

/// Macronutrients in grams per serving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    /// Protein grams.
    pub protein: u32,
    /// Carbohydrate grams.
    pub carbs: u32,
    /// Fat grams.
    pub fat: u32,
}

/// An ingredient scaled for a number of servings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name.
    pub item: String,
    /// Amount.
    pub quantity: f64,
    /// Free-text unit.
    pub unit: String,
}

/// A full meal suggestion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Dish name.
    pub name: String,
    /// Description mentioning the time of day.
    pub description: String,
    /// e.g. "35 minutes".
    pub cooking_time: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Calories per serving.
    pub calories: u32,
    /// Macro breakdown per serving.
    pub macros: Macros,
    /// Ordered ingredients.
    pub ingredients: Vec<Ingredient>,
    /// Ordered steps.
    pub instructions: Vec<String>,
}

#[derive(Clone, Copy)]
enum Amount {
    PerServing(f64),
    Fixed(f64),
}

struct IngredientSpec {
    item: &'static str,
    amount: Amount,
    unit: &'static str,
}

struct Recipe {
    name: &'static str,
    /// Opening word of the description.
    adjective: &'static str,
    /// Words between the time label and the weekday.
    occasion: &'static str,
    cooking_time: &'static str,
    difficulty: Difficulty,
    calories: u32,
    macros: Macros,
    ingredients: &'static [IngredientSpec],
    instructions: &'static [&'static str],
}

const fn per(item: &'static str, amount: f64, unit: &'static str) -> IngredientSpec {
    IngredientSpec { item, amount: Amount::PerServing(amount), unit }
}

const fn fixed(item: &'static str, amount: f64, unit: &'static str) -> IngredientSpec {
    IngredientSpec { item, amount: Amount::Fixed(amount), unit }
}

const AVOCADO_TOAST: Recipe = Recipe {
    name: "Avocado Toast with Eggs",
    adjective: "Perfect",
    occasion: "breakfast for",
    cooking_time: "15 minutes",
    difficulty: Difficulty::Easy,
    calories: 320,
    macros: Macros { protein: 18, carbs: 24, fat: 16 },
    ingredients: &[
        per("Whole grain bread", 2.0, "slices"),
        per("Avocado", 1.0, "pieces"),
        per("Eggs", 2.0, "pieces"),
        per("Cherry tomatoes", 0.5, "cups"),
        fixed("Salt and pepper", 1.0, "pinch"),
    ],
    instructions: &[
        "Toast bread slices until golden",
        "Mash avocado with salt and pepper",
        "Fry or poach eggs to preference",
        "Spread avocado on toast, top with egg",
        "Garnish with cherry tomatoes and serve",
    ],
};

const QUINOA_BOWL: Recipe = Recipe {
    name: "Mediterranean Quinoa Bowl",
    adjective: "Energizing",
    occasion: "bowl perfect for",
    cooking_time: "25 minutes",
    difficulty: Difficulty::Medium,
    calories: 380,
    macros: Macros { protein: 16, carbs: 52, fat: 14 },
    ingredients: &[
        per("Quinoa", 0.75, "cups"),
        fixed("Cucumber", 1.0, "piece"),
        per("Cherry tomatoes", 1.0, "cups"),
        per("Feta cheese", 50.0, "grams"),
        fixed("Olive oil", 3.0, "tablespoons"),
    ],
    instructions: &[
        "Cook quinoa according to package directions",
        "Dice cucumber and halve cherry tomatoes",
        "Crumble feta cheese",
        "Mix all ingredients with olive oil",
        "Season and serve at room temperature",
    ],
};

const GRILLED_SALMON: Recipe = Recipe {
    name: "Grilled Salmon with Roasted Vegetables",
    adjective: "Satisfying",
    occasion: "for a relaxing",
    cooking_time: "35 minutes",
    difficulty: Difficulty::Medium,
    calories: 450,
    macros: Macros { protein: 38, carbs: 22, fat: 24 },
    ingredients: &[
        per("Salmon fillets", 1.0, "pieces"),
        per("Sweet potatoes", 1.0, "pieces"),
        fixed("Broccoli", 1.0, "head"),
        fixed("Olive oil", 3.0, "tablespoons"),
        fixed("Lemon", 1.0, "piece"),
    ],
    instructions: &[
        "Preheat oven to 400°F (200°C)",
        "Cut sweet potatoes and toss with oil",
        "Roast vegetables for 25 minutes",
        "Season and grill salmon 4-5 minutes per side",
        "Serve with lemon wedges",
    ],
};

const YOGURT_PARFAIT: Recipe = Recipe {
    name: "Greek Yogurt Parfait",
    adjective: "Light",
    occasion: "perfect for",
    cooking_time: "5 minutes",
    difficulty: Difficulty::Easy,
    calories: 180,
    macros: Macros { protein: 15, carbs: 22, fat: 4 },
    ingredients: &[
        per("Greek yogurt", 1.0, "cups"),
        per("Mixed berries", 0.5, "cups"),
        per("Granola", 0.25, "cups"),
        per("Honey", 1.0, "tablespoons"),
    ],
    instructions: &[
        "Layer yogurt in serving bowls",
        "Add berries and granola",
        "Drizzle with honey",
        "Serve immediately",
    ],
};

/// Which canned recipe to cook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dish {
    /// Avocado toast, the breakfast.
    AvocadoToast,
    /// Quinoa bowl, the vegetarian lunch.
    QuinoaBowl,
    /// Salmon, the fish dinner.
    GrilledSalmon,
    /// Yogurt parfait, the snack.
    YogurtParfait,
}

impl Dish {
    /// Default dish for a meal category.
    #[must_use]
    pub const fn for_meal(meal: MealType) -> Self {
        match meal {
            MealType::Breakfast => Self::AvocadoToast,
            MealType::Lunch => Self::QuinoaBowl,
            MealType::Dinner => Self::GrilledSalmon,
            MealType::Snack => Self::YogurtParfait,
        }
    }

    fn recipe(self) -> &'static Recipe {
        match self {
            Self::AvocadoToast => &AVOCADO_TOAST,
            Self::QuinoaBowl => &QUINOA_BOWL,
            Self::GrilledSalmon => &GRILLED_SALMON,
            Self::YogurtParfait => &YOGURT_PARFAIT,
        }
    }

    /// Cook the recipe for `servings` at the given time.
    #[must_use]
    pub fn prepare(self, servings: f64, time: &TimeContext) -> Meal {
        let recipe = self.recipe();
        let description = format!(
            "{} {} {} {} - Suggested at {} on {}",
            recipe.adjective,
            time.time_label,
            recipe.occasion,
            time.day_of_week,
            time.current_time,
            time.day_of_week
        );

        Meal {
            name: recipe.name.to_string(),
            description,
            cooking_time: recipe.cooking_time.to_string(),
            difficulty: recipe.difficulty,
            calories: recipe.calories,
            macros: recipe.macros,
            ingredients: recipe
                .ingredients
                .iter()
                .map(|entry| Ingredient {
                    item: entry.item.to_string(),
                    quantity: match entry.amount {
                        Amount::PerServing(each) => each * servings,
                        Amount::Fixed(total) => total,
                    },
                    unit: entry.unit.to_string(),
                })
                .collect(),
            instructions: recipe.instructions.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn evening() -> TimeContext {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap_or_default();
        TimeContext::at(date.and_hms_opt(19, 0, 0).unwrap_or_default())
    }

    #[test]
    fn test_per_serving_amounts_scale() {
        let two = Dish::GrilledSalmon.prepare(2.0, &evening());
        let four = Dish::GrilledSalmon.prepare(4.0, &evening());

        assert_eq!(two.ingredients[0].quantity, 2.0);
        assert_eq!(four.ingredients[0].quantity, 4.0);
        assert_eq!(two.ingredients[2].quantity, four.ingredients[2].quantity);
    }

    #[test]
    fn test_description_mentions_time() {
        let meal = Dish::GrilledSalmon.prepare(2.0, &evening());
        assert_eq!(
            meal.description,
            "Satisfying evening for a relaxing Friday - Suggested at 07:00 PM on Friday"
        );
    }

    #[test]
    fn test_every_dish_has_steps_and_ingredients() {
        for dish in [Dish::AvocadoToast, Dish::QuinoaBowl, Dish::GrilledSalmon, Dish::YogurtParfait] {
            let meal = dish.prepare(2.0, &evening());
            assert!(!meal.ingredients.is_empty());
            assert!(!meal.instructions.is_empty());
            assert!(meal.calories > 0);
        }
    }
}
