//! The analysis engine.
//!
//! An [`Analyser`] owns its text, its ordered operation config and a registry
//! of custom operations. [`Analyser::run`] walks the config in insertion
//! order, dispatching each enabled entry against the shared text state, and
//! returns a detached [`AnalysisResult`].
//!
//! ```rust
//! use text_analyser::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> text_analyser::Result<()> {
//! let config = OperationConfig::new()
//!     .enable("remove-extra-spaces")
//!     .enable("uppercase")
//!     .enable("count-words");
//!
//! let mut analyser = Analyser::new("  hello    analyser  ", config);
//! let result = analyser.run().await?;
//!
//! assert_eq!(result.output, "HELLO ANALYSER");
//! assert_eq!(result.metadata.counts.word_count, 2);
//! assert_eq!(result.purpose, "Removed Extra Spaces, Changed to Uppercase, Counted Words");
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::config::{OperationConfig, OperationSetting};
use super::operation::BuiltinOperation;
use super::registry::{CustomOperation, Operation, OperationRegistry};
use super::result::{AnalysisResult, RunTimestamps};
use super::state::{Counts, Extractions, SideMetadata, TextState};
use crate::analysis::{LanguageDetector, SentimentAnalyzer, TextSummarizer};
use crate::error::{AnalyserError, Result};
use crate::{log_operation, perf_debug};
use crate::logging::{truncate_field, LogConfig};
use crate::operations::{self, Analyzers};

/// Where an analyser is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Idle,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A single-use text analysis pipeline.
///
/// One run per instance; [`reset_text`](Self::reset_text) makes it idle again.
#[derive(Debug, Clone)]
pub struct Analyser {
    state: TextState,
    config: OperationConfig,
    registry: OperationRegistry,
    analyzers: Analyzers,
    status: RunStatus,
    timestamps: RunTimestamps,
    log_config: LogConfig,
}

impl Analyser {
    pub fn new(text: impl Into<String>, config: OperationConfig) -> Self {
        Self {
            state: TextState::new(text),
            config,
            registry: OperationRegistry::new(),
            analyzers: Analyzers::default(),
            status: RunStatus::Idle,
            timestamps: RunTimestamps::default(),
            log_config: LogConfig::default(),
        }
    }

    /// Creates an analyser with exactly the named built-ins enabled, in order.
    ///
    /// Names may be canonical ids or aliases. Anything else is rejected with
    /// [`AnalyserError::UnknownOperation`].
    pub fn create_with_enabled_operations<I>(text: impl Into<String>, names: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut config = OperationConfig::new();
        for name in names {
            let name = name.as_ref();
            let operation = BuiltinOperation::lookup(name).ok_or_else(|| AnalyserError::unknown(name))?;
            config.set(operation.id(), OperationSetting::flag(true));
        }
        Ok(Self::new(text, config))
    }

    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Registers a custom operation and appends `{id: enabled}` to the config.
    #[instrument(skip(self, operation))]
    pub fn add_custom_operation(
        &mut self,
        id: &str,
        label: &str,
        operation: CustomOperation,
    ) -> Result<()> {
        let enabled = operation.is_enabled();
        self.registry.register(id, label, operation)?;
        self.config.set(id, OperationSetting::flag(enabled));
        Ok(())
    }

    /// Switches one operation on or off. Config objects survive the toggle.
    ///
    /// A built-in is matched by what it resolves to, so toggling `uppercase`
    /// also updates an entry configured as `fullcaps`.
    pub fn toggle_operation(&mut self, id: &str, enabled: bool) -> Result<()> {
        if let Some(target) = BuiltinOperation::lookup(id) {
            let mut found = false;
            for (key, setting) in self.config.iter_mut() {
                if BuiltinOperation::lookup(key) != Some(target) {
                    continue;
                }
                found = true;
                if setting.is_enabled() != enabled {
                    setting.set_enabled(enabled);
                    debug!(operation = %key, enabled, "Toggled operation");
                }
            }
            if !found {
                self.config.set(id, OperationSetting::flag(enabled));
                debug!(operation = id, enabled, "Toggled operation");
            }
            return Ok(());
        }

        if let Some(setting) = self.config.get_mut(id) {
            if setting.is_enabled() != enabled {
                setting.set_enabled(enabled);
                debug!(operation = id, enabled, "Toggled operation");
            }
            return Ok(());
        }

        if self.registry.contains(id) {
            self.config.set(id, OperationSetting::flag(enabled));
            debug!(operation = id, enabled, "Toggled operation");
            Ok(())
        } else {
            Err(AnalyserError::unknown(id))
        }
    }

    pub fn enable_all_operations(&mut self) {
        self.set_all(true);
    }

    pub fn disable_all_operations(&mut self) {
        self.set_all(false);
    }

    /// Sets every built-in and every custom operation.
    ///
    /// Existing entries (including ones keyed by an alias) are updated in
    /// place; missing built-ins are appended under their canonical id.
    fn set_all(&mut self, enabled: bool) {
        let mut covered = Vec::new();
        for (id, setting) in self.config.iter_mut() {
            match self.registry.resolve(id) {
                Some(Operation::BuiltIn(op)) => {
                    setting.set_enabled(enabled);
                    covered.push(op);
                }
                Some(Operation::Custom(_)) => setting.set_enabled(enabled),
                None => {}
            }
        }

        for op in BuiltinOperation::ALL {
            if !covered.contains(&op) {
                self.config.set(op.id(), OperationSetting::flag(enabled));
            }
        }

        let missing: Vec<String> = self
            .registry
            .custom_ids()
            .filter(|id| !self.config.contains(id))
            .map(str::to_string)
            .collect();
        for id in missing {
            self.config.set(id, OperationSetting::flag(enabled));
        }

        debug!(enabled, operations = self.config.len(), "Set all operations");
    }

    /// Clears counts, extractions, the log and side metadata, optionally
    /// replaces the text, and makes the analyser runnable again.
    ///
    /// The registry and the config are kept.
    pub fn reset_text(&mut self, new_text: Option<String>) {
        self.state.reset(new_text);
        self.status = RunStatus::Idle;
        self.timestamps = RunTimestamps::default();
    }

    /// Runs every enabled operation in config order.
    ///
    /// On the first failure an `Error: <message>` entry is logged, the
    /// analyser moves to [`RunStatus::Failed`] and the error is returned; the
    /// trail stays readable through [`operations`](Self::operations).
    #[instrument(skip(self), fields(text_length = self.state.text.len(), configured = self.config.len()))]
    pub async fn run(&mut self) -> Result<AnalysisResult> {
        if self.status != RunStatus::Idle {
            return Err(AnalyserError::InvalidState(format!(
                "cannot run an analyser that is {}",
                self.status
            )));
        }

        self.status = RunStatus::Running;
        self.timestamps.record_start();
        info!(
            enabled = self.config.enabled_ids().len(),
            custom = self.registry.custom_len(),
            "Starting analysis run"
        );

        let outcome = self.execute_plan().await;
        self.timestamps.record_end();

        match outcome {
            Ok(()) => {
                self.status = RunStatus::Completed;
                let result = AnalysisResult::from_state(&self.state, self.timestamps.elapsed_ms());
                info!(
                    operations = result.operations.len(),
                    execution_time_ms = result.execution_time,
                    "Completed analysis run"
                );
                Ok(result)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Like [`run`](Self::run), but gives up once `deadline` has passed.
    ///
    /// Built-ins never yield, so the deadline only interrupts a run while a
    /// custom operation's extractor is awaiting.
    pub async fn run_with_deadline(&mut self, deadline: Duration) -> Result<AnalysisResult> {
        let outcome = tokio::time::timeout(deadline, self.run()).await;
        match outcome {
            Ok(result) => result,
            Err(_) => {
                let err = AnalyserError::Timeout {
                    elapsed_ms: deadline.as_millis(),
                };
                self.timestamps.record_end();
                self.fail(&err);
                Err(err)
            }
        }
    }

    async fn execute_plan(&mut self) -> Result<()> {
        let plan: Vec<(String, OperationSetting)> = self
            .config
            .iter()
            .filter(|(_, setting)| setting.is_enabled())
            .map(|(id, setting)| (id.clone(), setting.clone()))
            .collect();

        for (id, setting) in plan {
            match self.registry.resolve(&id) {
                Some(Operation::BuiltIn(op)) => {
                    log_operation!(self.log_config, operation = %id, kind = "built_in", "Dispatching operation");
                    operations::execute(op, &mut self.state, &setting, &self.analyzers)?;
                }
                Some(Operation::Custom(registered)) => {
                    log_operation!(self.log_config, operation = %id, kind = "custom", "Dispatching operation");
                    registered
                        .operation
                        .invoke(&registered.id, &registered.label, &mut self.state)
                        .await?;
                }
                None => {
                    warn!(operation = %id, "No handler for operation, skipping");
                    continue;
                }
            }

            if self.log_config.log_text_snapshots {
                perf_debug!(
                    self.log_config,
                    operation = %id,
                    text = %truncate_field(&self.state.text, self.log_config.max_field_length),
                    "Text after operation"
                );
            }
        }

        Ok(())
    }

    fn fail(&mut self, err: &AnalyserError) {
        self.state.log.push_error(format!("Error: {err}"));
        self.status = RunStatus::Failed;
        error!(error = %err, "Analysis run failed");
    }

    /// Runs one analyser per text with a shared config, stopping at the first failure.
    pub async fn batch<I, T>(texts: I, shared_config: &OperationConfig) -> Result<Vec<AnalysisResult>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut results = Vec::new();
        for text in texts {
            let mut analyser = Self::new(text, shared_config.clone());
            results.push(analyser.run().await?);
        }
        Ok(results)
    }

    /// Runs one analyser per text and keeps every outcome.
    pub async fn batch_collect<I, T>(
        texts: I,
        shared_config: &OperationConfig,
    ) -> Vec<Result<AnalysisResult>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut results = Vec::new();
        for text in texts {
            let mut analyser = Self::new(text, shared_config.clone());
            results.push(analyser.run().await);
        }
        results
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn config(&self) -> &OperationConfig {
        &self.config
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// The combined log, including error entries.
    pub fn operations(&self) -> Vec<String> {
        self.state.log.all()
    }

    pub fn built_in_operations(&self) -> Vec<String> {
        self.state.log.built_in()
    }

    pub fn custom_operations(&self) -> Vec<String> {
        self.state.log.custom()
    }

    pub fn counts(&self) -> &Counts {
        &self.state.counts
    }

    pub fn extractions(&self) -> &Extractions {
        &self.state.extractions
    }

    pub fn side_metadata(&self, id: &str) -> Option<&SideMetadata> {
        self.state.side_metadata.get(id)
    }

    pub fn timestamps(&self) -> &RunTimestamps {
        &self.timestamps
    }

    /// This analyser's sentiment lexicons.
    pub fn sentiment_analyzer_mut(&mut self) -> &mut SentimentAnalyzer {
        &mut self.analyzers.sentiment
    }

    /// This analyser's summarizer stop words.
    pub fn summarizer_mut(&mut self) -> &mut TextSummarizer {
        &mut self.analyzers.summarizer
    }

    /// This analyser's language profiles.
    pub fn language_detector_mut(&mut self) -> &mut LanguageDetector {
        &mut self.analyzers.language
    }
}
