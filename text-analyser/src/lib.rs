//! # text-analyser
//!
//! A pluggable text-analysis pipeline. An [`Analyser`](core::Analyser) takes a
//! string and an ordered map of operations, applies each enabled operation in
//! turn and returns a structured [`AnalysisResult`](core::AnalysisResult).
//!
//! ## Quick Start
//!
//! ```rust
//! use text_analyser::prelude::*;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> text_analyser::Result<()> {
//! let config = OperationConfig::new()
//!     .enable("extract-hashtags")
//!     .enable("remove-extra-spaces")
//!     .configure("truncate", json!({ "maxLength": 12 }))
//!     .enable("readability");
//!
//! let mut analyser = Analyser::new("Loving   the #rustlang community today.", config);
//! analyser.add_custom_operation(
//!     "shout",
//!     "Shouted",
//!     CustomOperation::infallible(|text| text.to_uppercase()).enabled(true),
//! )?;
//!
//! let result = analyser.run().await?;
//! assert_eq!(result.output, "LOVING THE #...");
//! assert_eq!(result.metadata.hashtags, vec!["#rustlang"]);
//! assert_eq!(result.custom_operations, vec!["Shouted"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Operations
//!
//! Built-in operations fall into four groups, see
//! [`BuiltinOperation`](core::BuiltinOperation):
//!
//! - **Transforms** rewrite the text (`uppercase`, `remove-numbers`, `truncate`, ...)
//! - **Extractions** collect URLs, emails, phone numbers, hashtags and mentions
//! - **Counts** set character, alphabet, number, word and sentence counters
//! - **Analyses** attach sentiment, summary, readability, language and diff results
//!
//! Operations run in configuration order and see each other's changes: counting
//! after `remove-alphabets` counts what is left.
//!
//! ## Logging
//!
//! Everything is instrumented with `tracing`. Applications without a subscriber
//! can install one with [`logging::setup::init_logging`].

pub mod analysis;
pub mod content;
pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod operations;
pub mod prelude;

pub use error::{AnalyserError, Result};
