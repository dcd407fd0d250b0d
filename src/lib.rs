//! Shopping and meal-planning assistant: conversation memory, shopping list,
//! product lookup, meal suggestions, and the pipeline that chains them.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(non_camel_case_types)]
#![deny(unused_must_use)]
#![deny(nonstandard_style)]
#![deny(overflowing_literals)]
#![forbid(unsafe_op_in_unsafe_fn)]
// No panicking shortcuts outside tests.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stdout,
        clippy::todo,
        clippy::unimplemented
    )
)]
#![warn(clippy::redundant_clone)]

/// Application configuration.
pub mod config;
/// Tool-level errors.
pub mod error;
/// Opaque identifiers.
pub mod ids;
/// Final-response rendering.
pub mod llm;
/// Meal suggestions.
pub mod meals;
/// Conversation memory.
pub mod memory;
/// Product lookup.
pub mod products;
/// HTTP server and API routes.
#[allow(clippy::missing_errors_doc)]
pub mod server;
/// Shopping list.
pub mod shopping;
/// Entry helpers to start the server.
pub mod start_pantry_agent;
/// Classify, process, render.
pub mod workflow;
