//! Data passed between the pipeline stages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::meals::{Ingredient, Meal};
use crate::products::Product;

/// Broad intent of a user message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// Wants a meal or recipe.
    Meal,
    /// Wants to buy or find a product.
    Shopping,
    /// Anything else; handled like a meal request.
    General,
}

impl RequestType {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meal => "meal",
            Self::Shopping => "shopping",
            Self::General => "general",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the classify stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAnalysis {
    /// The raw user message.
    pub user_request: String,
    /// Detected intent.
    pub request_type: RequestType,
    /// Space-separated preference tags, if any were found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    /// One-line processing note stored with the conversation.
    pub context: String,
}

impl RequestAnalysis {
    /// Whether the preferences include `tag`.
    #[must_use]
    pub fn has_preference(&self, tag: &str) -> bool {
        self.preferences
            .as_deref()
            .is_some_and(|p| p.split_whitespace().any(|t| t == tag))
    }
}

/// Meal part of the processed result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealData {
    /// Dish name.
    pub name: String,
    /// e.g. "35 minutes".
    pub cooking_time: String,
    /// Ingredients for the requested servings.
    pub ingredients: Vec<Ingredient>,
    /// Ordered steps.
    pub instructions: Vec<String>,
}

impl From<&Meal> for MealData {
    fn from(meal: &Meal) -> Self {
        Self {
            name: meal.name.clone(),
            cooking_time: meal.cooking_time.clone(),
            ingredients: meal.ingredients.clone(),
            instructions: meal.instructions.clone(),
        }
    }
}

/// A product chosen for the reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPick {
    /// Listing title.
    pub title: String,
    /// Display price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Star rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    /// Ingredient or query the product answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<String>,
    /// Listing URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ProductPick {
    /// Pick `product` for `ingredient`.
    #[must_use]
    pub fn for_ingredient(product: &Product, ingredient: &str) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price.clone(),
            rating: product.rating.clone(),
            ingredient: Some(ingredient.to_string()),
            url: product.url.clone(),
        }
    }
}

/// Shopping part of the processed result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingData {
    /// Products to show.
    pub products: Vec<ProductPick>,
    /// One-line price summary.
    pub price_analysis: String,
}

/// Output of the process stage, serialized into the render prompt.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedData {
    /// Suggested meal, for meal and general requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_data: Option<MealData>,
    /// Product picks and their price summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopping_data: Option<ShoppingData>,
    /// Whether the request made it into conversation memory.
    pub conversation_stored: bool,
    /// Human-readable log of what the process stage did.
    pub actions_completed: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processed_data_json_shape() {
        let data = ProcessedData {
            meal_data: None,
            shopping_data: Some(ShoppingData {
                products: vec![ProductPick {
                    title: "Bananas".to_string(),
                    price: Some("$3.49".to_string()),
                    rating: None,
                    ingredient: Some("Bananas".to_string()),
                    url: None,
                }],
                price_analysis: "Cheapest option: Bananas at $3.49".to_string(),
            }),
            conversation_stored: true,
            actions_completed: vec!["Analyzed user request".to_string()],
        };

        let json = serde_json::to_value(&data).expect("serializable");
        assert!(json.get("mealData").is_none());
        assert_eq!(json["conversationStored"], true);
        assert_eq!(json["shoppingData"]["priceAnalysis"], "Cheapest option: Bananas at $3.49");
        assert!(json["shoppingData"]["products"][0].get("rating").is_none());
    }

    #[test]
    fn test_has_preference_matches_whole_tags() {
        let analysis = RequestAnalysis {
            user_request: "x".to_string(),
            request_type: RequestType::Meal,
            preferences: Some("vegetarian quick".to_string()),
            context: String::new(),
        };
        assert!(analysis.has_preference("vegetarian"));
        assert!(analysis.has_preference("quick"));
        assert!(!analysis.has_preference("veg"));
    }
}
