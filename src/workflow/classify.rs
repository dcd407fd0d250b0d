//! Request classification: intent and preference tags from keyword rules.

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::debug;

use crate::workflow::types::{RequestAnalysis, RequestType};

/// A pattern mapped to a request type.
struct IntentRule {
    pattern: Regex,
    request_type: RequestType,
    priority: u8, // Higher = checked first
}

/// A pattern mapped to a preference tag.
struct PreferenceRule {
    pattern: Regex,
    tag: &'static str,
}

/// Keyword classifier for user messages.
///
/// Keywords match anywhere in the text, so "eat" also fires on "great".
pub struct RequestClassifier {
    intents: Vec<IntentRule>,
    preferences: Vec<PreferenceRule>,
}

impl RequestClassifier {
    /// Build the classifier with its fixed rule table.
    ///
    /// # Errors
    /// Returns an error if any regex pattern is invalid.
    pub fn new() -> Result<Self, regex::Error> {
        let mut intents = vec![
            IntentRule {
                pattern: Regex::new(r"(?i)(meal|food|recipe|cook|eat|hungry)")?,
                request_type: RequestType::Meal,
                priority: 20,
            },
            IntentRule {
                pattern: Regex::new(r"(?i)(buy|shop|search|find|amazon)")?,
                request_type: RequestType::Shopping,
                priority: 10,
            },
        ];
        intents.sort_by(|a, b| b.priority.cmp(&a.priority));

        let preferences = vec![
            PreferenceRule {
                pattern: Regex::new(r"(?i)vegetarian")?,
                tag: "vegetarian",
            },
            PreferenceRule {
                pattern: Regex::new(r"(?i)healthy")?,
                tag: "healthy",
            },
            PreferenceRule {
                pattern: Regex::new(r"(?i)quick")?,
                tag: "quick",
            },
        ];

        Ok(Self {
            intents,
            preferences,
        })
    }

    /// Intent of `message`; `General` when no rule fires.
    #[must_use]
    pub fn request_type(&self, message: &str) -> RequestType {
        self.intents
            .iter()
            .find(|rule| rule.pattern.is_match(message))
            .map_or(RequestType::General, |rule| rule.request_type)
    }

    /// Preference tags found in `message`, in rule order.
    #[must_use]
    pub fn preference_tags(&self, message: &str) -> Vec<&'static str> {
        self.preferences
            .iter()
            .filter(|rule| rule.pattern.is_match(message))
            .map(|rule| rule.tag)
            .collect()
    }

    /// Classify `message` received at local time `now`.
    #[must_use]
    pub fn classify_at(&self, message: &str, now: NaiveDateTime) -> RequestAnalysis {
        let request_type = self.request_type(message);
        let tags = self.preference_tags(message);
        let preferences = (!tags.is_empty()).then(|| tags.join(" "));

        let mut context = format!(
            "Request processed at {}. Type: {request_type}",
            now.format("%-m/%-d/%Y, %-I:%M:%S %p")
        );
        if let Some(prefs) = &preferences {
            context.push_str(". Preferences: ");
            context.push_str(prefs);
        }

        debug!(%request_type, ?preferences, "classified request");

        RequestAnalysis {
            user_request: message.to_string(),
            request_type,
            preferences,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn classifier() -> RequestClassifier {
        RequestClassifier::new().expect("valid rules")
    }

    fn evening() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 7)
            .and_then(|d| d.and_hms_opt(19, 5, 9))
            .unwrap_or_default()
    }

    #[test]
    fn test_request_types() {
        let c = classifier();
        assert_eq!(c.request_type("I want to buy organic bananas"), RequestType::Shopping);
        assert_eq!(c.request_type("Suggest a meal"), RequestType::Meal);
        assert_eq!(c.request_type("I'm HUNGRY"), RequestType::Meal);
        assert_eq!(c.request_type("hello there"), RequestType::General);
    }

    #[test]
    fn test_meal_keywords_outrank_shopping() {
        let c = classifier();
        assert_eq!(c.request_type("find me a recipe"), RequestType::Meal);
        // Substring match: "great" contains "eat".
        assert_eq!(c.request_type("search for great headphones"), RequestType::Meal);
    }

    #[test]
    fn test_context_without_preferences() {
        let analysis = classifier().classify_at("Suggest a meal", evening());
        assert_eq!(analysis.preferences, None);
        assert_eq!(analysis.context, "Request processed at 3/7/2025, 7:05:09 PM. Type: meal");
    }

    #[test]
    fn test_preferences_are_collected_in_order() {
        let analysis = classifier().classify_at("Quick healthy VEGETARIAN dinner", evening());
        assert_eq!(analysis.preferences.as_deref(), Some("vegetarian healthy quick"));
        assert!(analysis.context.ends_with("Type: general. Preferences: vegetarian healthy quick"));
        assert_eq!(analysis.request_type, RequestType::General);
    }
}
