//! Prelude for commonly used types and traits in text-analyser.

pub use crate::core::{
    Analyser, AnalysisResult, BuiltinOperation, CustomOperation, MetadataExtractor,
    OperationConfig, OperationSetting, RunStatus,
};
pub use crate::error::{AnalyserError, BoxError, Result};
pub use crate::formatters::{FormatterConfig, ResultFormatter};
pub use crate::logging::LogConfig;
