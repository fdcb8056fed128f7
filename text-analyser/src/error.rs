//! Error types for the text-analyser library.
//!
//! All fallible entry points return [`Result`], whose error type is
//! [`AnalyserError`]. Registration and configuration mistakes are reported at
//! the point of misuse; failures raised while an operation executes abort the
//! current run and are logged into the analyser's operation trail first.

use thiserror::Error;

/// Boxed error type accepted from user-supplied operations and extractors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for the text-analyser library.
#[derive(Error, Debug)]
pub enum AnalyserError {
    /// Input that the engine or an analyzer cannot work with.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation id that is already taken by a built-in or custom operation.
    #[error("Operation '{id}' already exists")]
    DuplicateOperation { id: String },

    /// An operation id that is neither built-in, configured nor registered.
    #[error("Unknown operation '{id}'")]
    UnknownOperation { id: String },

    /// A built-in operation that needs a config object did not get a usable one.
    #[error("Missing configuration for '{operation}': {message}")]
    MissingConfig { operation: String, message: String },

    /// A config object was present but had the wrong shape.
    #[error("Invalid configuration for '{operation}': {message}")]
    InvalidConfig { operation: String, message: String },

    /// A handler failed while the pipeline was running.
    #[error("Operation '{operation}' failed: {message}")]
    OperationExecution {
        /// Id of the operation that failed
        operation: String,
        /// Human-readable failure message
        message: String,
        /// Underlying error, if any
        #[source]
        source: Option<BoxError>,
    },

    /// The analyser is not in a state that allows the requested call.
    #[error("Invalid analyser state: {0}")]
    InvalidState(String),

    /// The run did not finish before its deadline.
    #[error("Analysis timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u128 },

    /// JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A type alias for `Result<T, AnalyserError>`.
pub type Result<T> = std::result::Result<T, AnalyserError>;

impl AnalyserError {
    /// Creates an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates a duplicate operation error.
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateOperation { id: id.into() }
    }

    /// Creates an unknown operation error.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownOperation { id: id.into() }
    }

    /// Creates a missing configuration error.
    pub fn missing_config(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingConfig {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates an execution error without an underlying source.
    pub fn execution(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OperationExecution {
            operation: operation.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates an execution error wrapping the error that caused it.
    pub fn execution_with_source(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: BoxError,
    ) -> Self {
        Self::OperationExecution {
            operation: operation.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Wraps an error raised inside a handler.
    ///
    /// Configuration errors and errors that are already execution errors pass
    /// through unchanged.
    pub fn into_execution(self, operation: &str) -> Self {
        match self {
            err @ (Self::OperationExecution { .. }
            | Self::MissingConfig { .. }
            | Self::InvalidConfig { .. }) => err,
            other => {
                let message = other.to_string();
                Self::execution_with_source(operation, message, Box::new(other))
            }
        }
    }

    /// Returns true for errors raised while the pipeline was executing.
    pub fn is_execution_error(&self) -> bool {
        matches!(self, Self::OperationExecution { .. } | Self::Timeout { .. })
    }
}

impl From<serde_json::Error> for AnalyserError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AnalyserError::duplicate("fullcaps").to_string(),
            "Operation 'fullcaps' already exists"
        );
        assert_eq!(
            AnalyserError::missing_config("truncate", "maxLength is required").to_string(),
            "Missing configuration for 'truncate': maxLength is required"
        );
    }

    #[test]
    fn test_into_execution_wraps_other_errors() {
        let err = AnalyserError::invalid_input("text is empty").into_execution("analyze-sentiment");
        match &err {
            AnalyserError::OperationExecution { operation, .. } => {
                assert_eq!(operation, "analyze-sentiment");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.source().is_some());
        assert!(err.is_execution_error());
    }

    #[test]
    fn test_into_execution_keeps_config_errors() {
        let err = AnalyserError::missing_config("compare-texts", "compareWith must be a string")
            .into_execution("compare-texts");
        assert!(matches!(err, AnalyserError::MissingConfig { .. }));
    }
}
