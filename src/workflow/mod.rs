//! Request pipeline.
//!
//! - `classify`: keyword rules for intent and preference tags
//! - `types`: data passed between stages
//! - `pipeline`: the [`Assistant`] that owns the stores and runs each stage

pub mod classify;
pub mod pipeline;
pub mod types;

pub use classify::RequestClassifier;
pub use pipeline::{Assistant, ProcessOutcome, WorkflowError, WorkflowResult};
pub use types::{MealData, ProcessedData, ProductPick, RequestAnalysis, RequestType, ShoppingData};
