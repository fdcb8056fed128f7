//! Operation lookup: the fixed built-ins plus runtime-registered custom operations.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::operation::BuiltinOperation;
use super::state::{SideMetadata, TextState};
use crate::error::{AnalyserError, BoxError, Result};

/// Produces extra metadata for a custom operation from the text it received.
///
/// This is the seam for external enrichment (an AI model, a remote service).
/// Plain closures `Fn(&str) -> serde_json::Value` implement it directly.
///
/// # Example
///
/// ```rust,ignore
/// use text_analyser::core::MetadataExtractor;
///
/// struct KeywordService { client: HttpClient }
///
/// #[async_trait::async_trait]
/// impl MetadataExtractor for KeywordService {
///     async fn extract(&self, text: &str) -> Result<serde_json::Value, BoxError> {
///         let keywords = self.client.keywords(text).await?;
///         Ok(serde_json::json!({ "keywords": keywords }))
///     }
/// }
/// ```
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> std::result::Result<Value, BoxError>;
}

#[async_trait]
impl<F> MetadataExtractor for F
where
    F: Fn(&str) -> Value + Send + Sync,
{
    async fn extract(&self, text: &str) -> std::result::Result<Value, BoxError> {
        Ok(self(text))
    }
}

type TransformFn = dyn Fn(&str) -> std::result::Result<String, BoxError> + Send + Sync;

/// A user-supplied text transformation with optional metadata.
#[derive(Clone)]
pub struct CustomOperation {
    transform: Arc<TransformFn>,
    metadata: Option<Value>,
    extractor: Option<Arc<dyn MetadataExtractor>>,
    enabled: bool,
}

impl fmt::Debug for CustomOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomOperation")
            .field("metadata", &self.metadata)
            .field("has_extractor", &self.extractor.is_some())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl CustomOperation {
    /// Wraps a fallible transformation. Disabled until [`enabled`](Self::enabled) says otherwise.
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(transform),
            metadata: None,
            extractor: None,
            enabled: false,
        }
    }

    /// Wraps a transformation that cannot fail.
    pub fn infallible<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(move |text| Ok(transform(text)))
    }

    /// Static metadata stored under the operation id after every invocation.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Extractor run on the text as it was before the transformation.
    pub fn with_extractor(mut self, extractor: impl MetadataExtractor + 'static) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    /// Whether the operation starts out enabled in the analyser's config.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Applies the transformation and merges its metadata into `state`.
    ///
    /// Static metadata goes in first; extractor keys override it. A
    /// non-object value is stored under `"value"`.
    pub(crate) async fn invoke(&self, id: &str, label: &str, state: &mut TextState) -> Result<()> {
        match self.invoke_inner(id, label, state).await {
            Ok(()) => Ok(()),
            Err(err) => {
                state
                    .log
                    .push_error(format!("Error in Custom Operation: {label} - {err}"));
                Err(err)
            }
        }
    }

    async fn invoke_inner(&self, id: &str, label: &str, state: &mut TextState) -> Result<()> {
        let original = state.text.clone();

        state.text = (self.transform)(&original).map_err(|source| {
            AnalyserError::execution_with_source(id, source.to_string(), source)
        })?;
        state.log.push_custom(label);

        if self.metadata.is_none() && self.extractor.is_none() {
            return Ok(());
        }

        let mut merged = Map::new();
        if let Some(metadata) = &self.metadata {
            merge_into(&mut merged, metadata.clone());
        }
        if let Some(extractor) = &self.extractor {
            let extracted = extractor.extract(&original).await.map_err(|source| {
                AnalyserError::execution_with_source(id, source.to_string(), source)
            })?;
            merge_into(&mut merged, extracted);
        }

        state
            .side_metadata
            .insert(id.to_string(), SideMetadata::Custom(Value::Object(merged)));
        Ok(())
    }
}

fn merge_into(target: &mut Map<String, Value>, value: Value) {
    match value {
        Value::Object(map) => target.extend(map),
        other => {
            target.insert("value".to_string(), other);
        }
    }
}

/// A custom operation together with its id and log label.
#[derive(Debug, Clone)]
pub struct RegisteredOperation {
    pub id: String,
    pub label: String,
    pub operation: CustomOperation,
}

/// What an id resolves to.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    BuiltIn(BuiltinOperation),
    Custom(&'a RegisteredOperation),
}

/// Built-ins are fixed; custom operations are added before a run.
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    custom: IndexMap<String, RegisteredOperation>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom operation.
    ///
    /// Fails without modifying the registry when the id or label is empty, or
    /// the id is already taken by a built-in (canonical id or alias) or by
    /// another custom operation.
    #[instrument(skip(self, operation))]
    pub fn register(
        &mut self,
        id: &str,
        label: &str,
        operation: CustomOperation,
    ) -> Result<()> {
        if id.trim().is_empty() {
            return Err(AnalyserError::invalid_input("operation id must not be empty"));
        }
        if label.trim().is_empty() {
            return Err(AnalyserError::invalid_input(
                "operation label must not be empty",
            ));
        }
        if self.contains(id) {
            return Err(AnalyserError::duplicate(id));
        }

        debug!(id, label, "Registered custom operation");
        self.custom.insert(
            id.to_string(),
            RegisteredOperation {
                id: id.to_string(),
                label: label.to_string(),
                operation,
            },
        );
        Ok(())
    }

    pub fn resolve(&self, id: &str) -> Option<Operation<'_>> {
        BuiltinOperation::lookup(id)
            .map(Operation::BuiltIn)
            .or_else(|| self.custom.get(id).map(Operation::Custom))
    }

    /// True for built-in ids, aliases and registered custom ids.
    pub fn contains(&self, id: &str) -> bool {
        self.resolve(id).is_some()
    }

    pub fn is_custom(&self, id: &str) -> bool {
        self.custom.contains_key(id)
    }

    pub fn custom_ids(&self) -> impl Iterator<Item = &str> {
        self.custom.keys().map(String::as_str)
    }

    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shout() -> CustomOperation {
        CustomOperation::infallible(|text| text.to_uppercase())
    }

    #[test]
    fn test_register_rejects_builtin_ids_and_aliases() {
        let mut registry = OperationRegistry::new();
        for id in ["fullcaps", "uppercase", "Reverse"] {
            let err = registry.register(id, "Shout", shout()).unwrap_err();
            assert!(matches!(err, AnalyserError::DuplicateOperation { .. }));
        }
        assert_eq!(registry.custom_len(), 0);
    }

    #[test]
    fn test_register_rejects_duplicates_and_empty_names() {
        let mut registry = OperationRegistry::new();
        registry.register("shout", "Shouted", shout()).unwrap();

        assert!(matches!(
            registry.register("shout", "Again", shout()),
            Err(AnalyserError::DuplicateOperation { .. })
        ));
        assert!(matches!(
            registry.register("", "Label", shout()),
            Err(AnalyserError::InvalidInput(_))
        ));
        assert!(matches!(
            registry.register("other", "  ", shout()),
            Err(AnalyserError::InvalidInput(_))
        ));
        assert_eq!(registry.custom_ids().collect::<Vec<_>>(), vec!["shout"]);
    }

    #[test]
    fn test_resolve() {
        let mut registry = OperationRegistry::new();
        registry.register("shout", "Shouted", shout()).unwrap();

        assert!(matches!(
            registry.resolve("titlecase"),
            Some(Operation::BuiltIn(BuiltinOperation::TitleCase))
        ));
        assert!(matches!(registry.resolve("shout"), Some(Operation::Custom(op)) if op.label == "Shouted"));
        assert!(registry.resolve("missing").is_none());
    }

    #[tokio::test]
    async fn test_invoke_merges_metadata_with_extractor_winning() {
        let op = shout()
            .with_metadata(json!({ "source": "static", "version": 1 }))
            .with_extractor(|text: &str| json!({ "source": "extractor", "length": text.len() }));

        let mut state = TextState::new("hi there");
        op.invoke("shout", "Shouted", &mut state).await.unwrap();

        assert_eq!(state.text, "HI THERE");
        assert_eq!(state.log.custom(), vec!["Shouted"]);
        assert_eq!(
            state.side_metadata["shout"],
            SideMetadata::Custom(json!({ "source": "extractor", "version": 1, "length": 8 }))
        );
    }

    #[tokio::test]
    async fn test_invoke_without_metadata_leaves_side_metadata_empty() {
        let mut state = TextState::new("hi");
        shout().invoke("shout", "Shouted", &mut state).await.unwrap();
        assert!(state.side_metadata.is_empty());
    }

    #[tokio::test]
    async fn test_non_object_extractor_value_is_wrapped() {
        let op = shout().with_extractor(|text: &str| json!(text.len()));
        let mut state = TextState::new("abc");
        op.invoke("shout", "Shouted", &mut state).await.unwrap();
        assert_eq!(
            state.side_metadata["shout"],
            SideMetadata::Custom(json!({ "value": 3 }))
        );
    }

    #[tokio::test]
    async fn test_failing_transform_is_logged_with_label() {
        let op = CustomOperation::new(|_| Err("boom".into()));
        let mut state = TextState::new("keep me");
        let err = op.invoke("explode", "Exploded", &mut state).await.unwrap_err();

        assert!(matches!(err, AnalyserError::OperationExecution { .. }));
        assert_eq!(state.text, "keep me");
        assert!(state.log.custom().is_empty());
        assert_eq!(
            state.log.all(),
            vec!["Error in Custom Operation: Exploded - Operation 'explode' failed: boom"]
        );
    }
}
