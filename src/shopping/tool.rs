//! `shopping-list` tool contract.

use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::shopping::export::{CSV_FILE_NAME, download_link, to_csv};
use crate::shopping::list::{MatchMode, NewItem, ShoppingItem, ShoppingList};

/// Tool identifier.
pub const TOOL_ID: &str = "shopping-list";

/// Action requested from the shopping-list tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShoppingAction {
    /// Append items.
    Add,
    /// Remove items by name.
    Remove,
    /// Show the list.
    View,
    /// Show the list with a CSV download link.
    Download,
}

/// Input of the shopping-list tool.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingToolInput {
    /// Action to perform.
    pub action: ShoppingAction,
    /// Items to add.
    pub items: Option<Vec<NewItem>>,
    /// Item names to remove.
    pub item_names: Option<Vec<String>>,
    /// Name matching used by `remove`.
    #[serde(default)]
    pub match_mode: MatchMode,
}

impl ShoppingToolInput {
    /// Input adding `items`.
    #[must_use]
    pub fn add(items: Vec<NewItem>) -> Self {
        Self {
            action: ShoppingAction::Add,
            items: Some(items),
            item_names: None,
            match_mode: MatchMode::default(),
        }
    }
}

/// Output of the shopping-list tool.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingToolOutput {
    /// Whether the action succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// The list after the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<ShoppingItem>>,
    /// Download link block, for `add` and `download`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_content: Option<String>,
}

impl ShoppingToolOutput {
    fn failed(err: &ToolError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            list: None,
            download_content: None,
        }
    }
}

/// Run one shopping-list action.
pub fn execute(list: &mut ShoppingList, input: ShoppingToolInput) -> ShoppingToolOutput {
    match input.action {
        ShoppingAction::Add => {
            let items = input.items.unwrap_or_default();
            let added = items.len();
            match list.add(items) {
                Ok(current) => {
                    let link = download_link(&to_csv(current), CSV_FILE_NAME);
                    ShoppingToolOutput {
                        success: true,
                        message: format!(
                            "Added {added} item(s) to your shopping list.\n\n{link}"
                        ),
                        list: Some(current.to_vec()),
                        download_content: Some(link),
                    }
                }
                Err(err) => ShoppingToolOutput::failed(&err),
            }
        }
        ShoppingAction::Remove => {
            let names = input.item_names.unwrap_or_default();
            match list.remove(&names, input.match_mode) {
                Ok(removed) => ShoppingToolOutput {
                    success: true,
                    message: format!("Removed {removed} item(s) from shopping list"),
                    list: Some(list.items().to_vec()),
                    download_content: None,
                },
                Err(err) => ShoppingToolOutput::failed(&err),
            }
        }
        ShoppingAction::View => ShoppingToolOutput {
            success: true,
            message: if list.is_empty() {
                "Shopping list is empty".to_string()
            } else {
                format!("Current shopping list has {} items", list.len())
            },
            list: Some(list.items().to_vec()),
            download_content: None,
        },
        ShoppingAction::Download => {
            let link = download_link(&to_csv(list.items()), CSV_FILE_NAME);
            ShoppingToolOutput {
                success: true,
                message: format!(
                    "Shopping list ready with {} items.\n\n{link}",
                    list.len()
                ),
                list: Some(list.items().to_vec()),
                download_content: Some(link),
            }
        }
    }
}
