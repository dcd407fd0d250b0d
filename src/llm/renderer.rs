//! Final-response renderers: an Ollama or Gemini model through Rig, or a fixed template.

use std::fmt::Write as _;

use reqwest::Client as ReqwestClient;
use rig::client::CompletionClient;
use rig::completion::CompletionModel;
use rig::message::AssistantContent;
use rig::providers::{gemini, ollama};
use thiserror::Error;
use tracing::debug;

use crate::config::LlmConfig;
use crate::llm::RenderFuture;
use crate::llm::prompts::{RESPONSE_INSTRUCTIONS, render_prompt};
use crate::workflow::types::ProcessedData;

/// Rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    /// HTTP client error from Rig.
    #[error("http client error: {0}")]
    HttpClient(#[from] rig::http_client::Error),
    /// Completion error.
    #[error("completion error: {0}")]
    Completion(#[from] rig::completion::CompletionError),
    /// The processed data could not be serialized into the prompt.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The model answered with no text.
    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Convenience result alias for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Turns processed request data into the user-facing reply.
pub trait ResponseRenderer: Send + Sync {
    /// Render the reply for `data`.
    ///
    /// # Errors
    /// Returns an error if the backend fails to produce text.
    fn render<'a>(&'a self, data: &'a ProcessedData) -> RenderFuture<'a, RenderResult<String>>;

    /// Short backend description for logs and health output.
    fn describe(&self) -> String;
}

/// Renderer backed by an Ollama chat model.
pub struct OllamaRenderer {
    model: ollama::CompletionModel,
    model_name: String,
    temperature: f64,
    max_tokens: Option<u64>,
}

impl OllamaRenderer {
    /// Create a renderer from config.
    ///
    /// # Errors
    /// Returns an error if the Ollama client cannot be built.
    pub fn new(config: &LlmConfig) -> RenderResult<Self> {
        let client = ollama::Client::<ReqwestClient>::builder()
            .api_key(rig::client::Nothing)
            .base_url(&config.base_url)
            .build()?;
        let model = client.completion_model(config.model.clone());

        Ok(Self {
            model,
            model_name: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

impl ResponseRenderer for OllamaRenderer {
    fn render<'a>(&'a self, data: &'a ProcessedData) -> RenderFuture<'a, RenderResult<String>> {
        Box::pin(async move {
            debug!(model = %self.model_name, "rendering final response");
            complete(&self.model, data, self.temperature, self.max_tokens).await
        })
    }

    fn describe(&self) -> String {
        format!("ollama:{}", self.model_name)
    }
}

/// Renderer backed by a hosted Gemini model.
pub struct GeminiRenderer {
    model: gemini::completion::CompletionModel,
    model_name: String,
    temperature: f64,
    max_tokens: Option<u64>,
}

impl GeminiRenderer {
    /// Create a renderer for `api_key` from config.
    ///
    /// # Errors
    /// Returns an error if the Gemini client cannot be built.
    pub fn new(config: &LlmConfig, api_key: &str) -> RenderResult<Self> {
        let client = gemini::Client::<ReqwestClient>::new(api_key)?;
        let model = client.completion_model(config.hosted_model.clone());

        Ok(Self {
            model,
            model_name: config.hosted_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

impl ResponseRenderer for GeminiRenderer {
    fn render<'a>(&'a self, data: &'a ProcessedData) -> RenderFuture<'a, RenderResult<String>> {
        Box::pin(async move {
            debug!(model = %self.model_name, "rendering final response");
            complete(&self.model, data, self.temperature, self.max_tokens).await
        })
    }

    fn describe(&self) -> String {
        format!("gemini:{}", self.model_name)
    }
}

async fn complete<M: CompletionModel>(
    model: &M,
    data: &ProcessedData,
    temperature: f64,
    max_tokens: Option<u64>,
) -> RenderResult<String> {
    let prompt = render_prompt(data)?;
    let request = model
        .completion_request(prompt)
        .preamble(RESPONSE_INSTRUCTIONS.to_string())
        .temperature(temperature)
        .max_tokens_opt(max_tokens)
        .build();

    let response = model.completion(request).await?;
    let text = extract_text(&response.choice);
    if text.trim().is_empty() {
        return Err(RenderError::EmptyResponse);
    }
    Ok(text)
}

fn extract_text(choice: &rig::OneOrMany<AssistantContent>) -> String {
    let mut out = String::new();
    for content in choice.iter() {
        if let AssistantContent::Text(text) = content {
            out.push_str(&text.text);
        }
    }
    out
}

/// Renderer that lays the processed data out in the reply sections without a model.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Render `data` synchronously.
    #[must_use]
    pub fn render_text(data: &ProcessedData) -> String {
        let mut out = String::from("ACTIONS TAKEN\n");
        for action in &data.actions_completed {
            let _ = writeln!(out, "- {action}");
        }

        out.push_str("\nRESULTS & RECOMMENDATIONS\n");
        if let Some(meal) = &data.meal_data {
            let _ = writeln!(out, "- Meal suggested: {}", meal.name);
            let _ = writeln!(out, "- Cooking time: {}", meal.cooking_time);
            out.push_str("- Ingredients:\n");
            for ing in &meal.ingredients {
                let _ = writeln!(out, "  - {} {} {}", ing.quantity, ing.unit, ing.item);
            }
            out.push_str("- Instructions:\n");
            for (i, step) in meal.instructions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {step}", i + 1);
            }
        }
        if let Some(shopping) = &data.shopping_data {
            for product in &shopping.products {
                let title = match &product.url {
                    Some(url) => format!("[{}]({url})", product.title),
                    None => product.title.clone(),
                };
                let price = product.price.as_deref().unwrap_or("price unavailable");
                match &product.ingredient {
                    Some(ingredient) if *ingredient != product.title => {
                        let _ = writeln!(out, "- {ingredient}: {title} at {price}");
                    }
                    _ => {
                        let _ = writeln!(out, "- {title} at {price}");
                    }
                }
            }
            let _ = writeln!(out, "- {}", shopping.price_analysis);
        }
        if data.meal_data.is_none() && data.shopping_data.is_none() {
            out.push_str("- Nothing to report\n");
        }

        out.push_str("\nCONVERSATION CONTEXT\n");
        if data.conversation_stored {
            out.push_str("- Stored this interaction for future reference\n");
        } else {
            out.push_str("- This interaction could not be stored\n");
        }

        out.push_str("\nNEXT STEPS\n");
        if data.meal_data.is_some() {
            out.push_str("- Download your shopping list or ask for another meal idea\n");
        } else {
            out.push_str("- Ask me to compare more products or view your shopping list\n");
        }
        out
    }
}

impl ResponseRenderer for TemplateRenderer {
    fn render<'a>(&'a self, data: &'a ProcessedData) -> RenderFuture<'a, RenderResult<String>> {
        Box::pin(async move { Ok(Self::render_text(data)) })
    }

    fn describe(&self) -> String {
        "template".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::Ingredient;
    use crate::workflow::types::{MealData, ProductPick, ShoppingData};

    fn meal_data() -> ProcessedData {
        ProcessedData {
            meal_data: Some(MealData {
                name: "Greek Yogurt Parfait".to_string(),
                cooking_time: "5 minutes".to_string(),
                ingredients: vec![Ingredient {
                    item: "Granola".to_string(),
                    quantity: 0.5,
                    unit: "cups".to_string(),
                }],
                instructions: vec!["Layer yogurt".to_string()],
            }),
            shopping_data: Some(ShoppingData {
                products: vec![ProductPick {
                    title: "Crunchy Granola".to_string(),
                    price: Some("$4.99".to_string()),
                    rating: None,
                    ingredient: Some("Granola".to_string()),
                    url: Some("https://example.com/granola".to_string()),
                }],
                price_analysis: "Optimized prices for 1 ingredient(s)".to_string(),
            }),
            conversation_stored: true,
            actions_completed: vec!["Generated meal suggestion".to_string()],
        }
    }

    #[test]
    fn test_template_lists_meal_and_linked_products() {
        let text = TemplateRenderer::render_text(&meal_data());
        assert!(text.contains("- Generated meal suggestion"));
        assert!(text.contains("- Meal suggested: Greek Yogurt Parfait"));
        assert!(text.contains("  - 0.5 cups Granola"));
        assert!(text.contains("  1. Layer yogurt"));
        assert!(text.contains("- Granola: [Crunchy Granola](https://example.com/granola) at $4.99"));
        assert!(text.contains("Stored this interaction"));
    }

    #[tokio::test]
    async fn test_template_renderer_never_fails() {
        let rendered = TemplateRenderer.render(&ProcessedData::default()).await;
        assert!(rendered.is_ok_and(|t| t.contains("Nothing to report")));
    }

    #[test]
    fn test_ollama_renderer_builds_without_network() {
        let renderer = OllamaRenderer::new(&LlmConfig::default()).expect("client");
        assert_eq!(renderer.describe(), format!("ollama:{}", LlmConfig::default().model));
    }

    #[test]
    fn test_gemini_renderer_builds_without_network() {
        let renderer = GeminiRenderer::new(&LlmConfig::default(), "test-key").expect("client");
        assert_eq!(renderer.describe(), "gemini:gemini-2.0-flash");
    }
}
