//! Handlers for the built-in operations.
//!
//! Every handler takes the shared [`TextState`] explicitly and records its
//! label in the built-in partition of the log once it succeeds. Failures leave
//! the log untouched; the engine adds the error entry.

pub mod analyze;
pub mod count;
pub mod extract;
pub mod transform;

pub use analyze::Analyzers;

use tracing::debug;

use crate::core::{BuiltinOperation, OperationCategory, OperationSetting, TextState};
use crate::error::Result;

/// Runs one built-in against `state`.
pub fn execute(
    operation: BuiltinOperation,
    state: &mut TextState,
    setting: &OperationSetting,
    analyzers: &Analyzers,
) -> Result<()> {
    debug!(
        operation = operation.id(),
        category = ?operation.category(),
        "Executing built-in operation"
    );

    match operation.category() {
        OperationCategory::Transform => transform::apply(operation, state, setting)?,
        OperationCategory::Extraction => extract::apply(operation, state),
        OperationCategory::Counting => count::apply(operation, state),
        OperationCategory::Analysis => analyze::apply(operation, state, setting, analyzers)?,
    }

    state.log.push_builtin(operation.label());
    Ok(())
}
