//! Core engine types.
//!
//! ## Overview
//!
//! - **[`Analyser`]**: owns the text, runs the configured operations, returns an [`AnalysisResult`]
//! - **[`OperationConfig`]**: ordered map of operation id to [`OperationSetting`]
//! - **[`BuiltinOperation`]**: the fixed set of built-in operations
//! - **[`OperationRegistry`]** and **[`CustomOperation`]**: runtime extension
//! - **[`TextState`]**: the mutable state every handler works on
//!
//! ## Architecture
//!
//! ```text
//! Analyser
//!     ├── OperationConfig   (id -> enabled | config, insertion order)
//!     ├── OperationRegistry (built-ins ∪ custom operations)
//!     ├── TextState         (text, counts, extractions, side metadata, log)
//!     └── Analyzers         (per-instance sentiment, summarizer, language detector)
//! ```

mod analyser;
mod config;
mod operation;
mod registry;
mod result;
mod state;

pub use analyser::{Analyser, RunStatus};
pub use config::{
    CompareConfig, DetectLanguageConfig, OperationConfig, OperationSetting, SentimentConfig,
    SummarizeConfig, TruncateConfig,
};
pub use operation::{BuiltinOperation, OperationCategory};
pub use registry::{
    CustomOperation, MetadataExtractor, Operation, OperationRegistry, RegisteredOperation,
};
pub use result::{AnalysisResult, ResultMetadata, RunTimestamps};
pub use state::{Counts, Extractions, LogEntry, LogEntryKind, OperationLog, SideMetadata, TextState};
