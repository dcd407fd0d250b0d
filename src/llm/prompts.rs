//! Prompt text for the response renderer.

use crate::workflow::types::ProcessedData;

/// System instructions for the final-response model.
pub const RESPONSE_INSTRUCTIONS: &str = r"You are a comprehensive personal assistant specializing in meal planning and shopping organization.

For each request, structure your response as follows:

REQUEST ANALYSIS

IDENTIFIED NEED
- Request type: [meal planning/shopping/general assistance]
- Preferences: [dietary preferences or product specifications]
- Context: [time-based or situational context]

ACTIONS TAKEN
- [Action 1 completed]
- [Action 2 completed]
- [Action 3 completed]

RESULTS & RECOMMENDATIONS
For meal requests:
- Meal suggested: [meal name]
- Cooking time: [X minutes]
- Ingredients added to shopping list
- Download link provided

For shopping requests:
- Products found: [X items on Amazon]
- Best value: [product name] at [price]
- Added to shopping list: [items]

CONVERSATION CONTEXT
- Stored this interaction for future reference
- Previous context: [relevant past discussions]

NEXT STEPS
- [Actionable next steps for the user]

Guidelines:
- Provide specific, actionable recommendations
- Include real product data and prices when searching
- Reference past conversations when relevant
- Focus on solving immediate needs efficiently
- Always include the link to the amazon product in the response";

/// User prompt asking the model to render `data`.
///
/// # Errors
/// Returns an error if `data` cannot be serialized.
pub fn render_prompt(data: &ProcessedData) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(data)?;
    Ok(format!(
        "Generate a comprehensive response based on this processed data:\n\n{json}\n\nFollow the structured format from your instructions. For the \"RESULTS & RECOMMENDATIONS\" section, when listing products from 'shoppingData', you MUST format them as markdown links using the 'title' and 'url' fields, like this: '[Product Title](Product URL)'. Also include the price and any other relevant details."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt_embeds_json() {
        let data = ProcessedData {
            conversation_stored: true,
            actions_completed: vec!["Analyzed user request".to_string()],
            ..ProcessedData::default()
        };
        let prompt = render_prompt(&data).expect("serializable");
        assert!(prompt.contains("\"conversationStored\": true"));
        assert!(prompt.contains("[Product Title](Product URL)"));
    }
}
