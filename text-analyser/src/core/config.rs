//! Operation configuration: the ordered map that drives a run.
//!
//! Each entry is either a boolean flag or a JSON config object. Entries run in
//! insertion order, so the order in which operations are enabled is the order
//! in which they observe each other's text mutations.
//!
//! ```rust
//! use text_analyser::core::OperationConfig;
//! use serde_json::json;
//!
//! let config = OperationConfig::new()
//!     .enable("remove-extra-spaces")
//!     .configure("truncate", json!({ "maxLength": 20 }))
//!     .enable("count-words");
//!
//! let ids: Vec<&str> = config.ids().collect();
//! assert_eq!(ids, ["remove-extra-spaces", "truncate", "count-words"]);
//! ```

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AnalyserError, Result};

/// Enabled flag plus optional config object for one operation.
///
/// Deserialises from `true`/`false`, `null` (disabled) or any other JSON value
/// (enabled, kept as config). Toggling keeps the config around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSetting", into = "RawSetting")]
pub struct OperationSetting {
    enabled: bool,
    config: Option<Value>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Flag(bool),
    Config(Value),
}

impl From<RawSetting> for OperationSetting {
    fn from(raw: RawSetting) -> Self {
        match raw {
            RawSetting::Flag(enabled) => Self::flag(enabled),
            RawSetting::Config(Value::Null) => Self::flag(false),
            RawSetting::Config(value) => Self::with_config(value),
        }
    }
}

impl From<OperationSetting> for RawSetting {
    fn from(setting: OperationSetting) -> Self {
        match setting.config {
            Some(value) if setting.enabled => RawSetting::Config(value),
            _ => RawSetting::Flag(setting.enabled),
        }
    }
}

impl OperationSetting {
    /// A plain on/off setting.
    pub fn flag(enabled: bool) -> Self {
        Self {
            enabled,
            config: None,
        }
    }

    /// An enabled setting carrying a config value.
    pub fn with_config(config: Value) -> Self {
        Self {
            enabled: true,
            config: Some(config),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The raw config value, if one was supplied.
    pub fn config(&self) -> Option<&Value> {
        self.config.as_ref()
    }

    /// Looks up a key in the config object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.as_ref().and_then(|c| c.get(key))
    }

    /// Deserialises the config object into `T`.
    ///
    /// Returns `Ok(None)` when the setting carries no config object.
    pub fn parse<T: DeserializeOwned>(&self, operation: &str) -> Result<Option<T>> {
        match &self.config {
            Some(value @ Value::Object(_)) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| AnalyserError::invalid_config(operation, e.to_string())),
            _ => Ok(None),
        }
    }
}

impl From<bool> for OperationSetting {
    fn from(enabled: bool) -> Self {
        Self::flag(enabled)
    }
}

impl From<Value> for OperationSetting {
    fn from(value: Value) -> Self {
        RawSetting::Config(value).into()
    }
}

/// Ordered map of operation id to setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationConfig {
    entries: IndexMap<String, OperationSetting>,
}

impl OperationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object such as `{"uppercase": true, "truncate": {"maxLength": 5}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialises back to a JSON object string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Adds (or re-enables) an operation with a boolean flag.
    pub fn enable(mut self, id: impl Into<String>) -> Self {
        self.set(id, OperationSetting::flag(true));
        self
    }

    /// Adds a disabled entry.
    pub fn disable(mut self, id: impl Into<String>) -> Self {
        self.set(id, OperationSetting::flag(false));
        self
    }

    /// Adds an enabled entry with a config object.
    pub fn configure(mut self, id: impl Into<String>, config: Value) -> Self {
        self.set(id, OperationSetting::from(config));
        self
    }

    /// Inserts or replaces a setting; an existing id keeps its position.
    pub fn set(&mut self, id: impl Into<String>, setting: OperationSetting) {
        self.entries.insert(id.into(), setting);
    }

    pub fn get(&self, id: &str) -> Option<&OperationSetting> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut OperationSetting> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(OperationSetting::is_enabled)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OperationSetting)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut OperationSetting)> {
        self.entries.iter_mut()
    }

    /// Ids of enabled entries, in execution order.
    pub fn enabled_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, s)| s.is_enabled())
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for OperationConfig
where
    K: Into<String>,
    V: Into<OperationSetting>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Config for `truncate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruncateConfig {
    pub max_length: usize,
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_suffix() -> String {
    "...".to_string()
}

/// Config for `compare-texts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareConfig {
    pub compare_with: String,
}

/// Optional config for `summarize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeConfig {
    #[serde(default = "default_sentence_count")]
    pub sentence_count: usize,
    /// Extra stop words for this run.
    #[serde(default)]
    pub stop_words: Vec<String>,
}

fn default_sentence_count() -> usize {
    3
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            sentence_count: default_sentence_count(),
            stop_words: Vec::new(),
        }
    }
}

/// Optional config for `detect-language`: extra reference profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectLanguageConfig {
    #[serde(default)]
    pub languages: IndexMap<String, IndexMap<String, f64>>,
}

/// Optional config for `analyze-sentiment`: extra lexicon words.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentConfig {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_setting_deserialises_flags_and_objects() {
        let config = OperationConfig::from_json(
            r#"{"uppercase": true, "reverse": false, "count-words": null, "truncate": {"maxLength": 5}}"#,
        )
        .unwrap();

        assert!(config.is_enabled("uppercase"));
        assert!(!config.is_enabled("reverse"));
        assert!(!config.is_enabled("count-words"));
        assert!(config.is_enabled("truncate"));
        assert_eq!(
            config.get("truncate").unwrap().get("maxLength"),
            Some(&json!(5))
        );
        assert_eq!(config.enabled_ids(), vec!["uppercase", "truncate"]);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let config = OperationConfig::from_json(r#"{"z": true, "a": true, "m": true}"#).unwrap();
        let ids: Vec<&str> = config.ids().collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }

    #[test]
    fn test_round_trip_keeps_config_objects() {
        let config = OperationConfig::new()
            .enable("lowercase")
            .configure("compare-texts", json!({"compareWith": "abc"}))
            .disable("reverse");
        let json = config.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"lowercase":true,"compare-texts":{"compareWith":"abc"},"reverse":false}"#
        );
    }

    #[test]
    fn test_toggle_keeps_config() {
        let mut setting = OperationSetting::with_config(json!({"maxLength": 3}));
        setting.set_enabled(false);
        setting.set_enabled(true);
        let parsed: TruncateConfig = setting.parse("truncate").unwrap().unwrap();
        assert_eq!(parsed.max_length, 3);
        assert_eq!(parsed.suffix, "...");
    }

    #[test]
    fn test_parse_reports_bad_shapes() {
        let setting = OperationSetting::with_config(json!({"maxLength": "ten"}));
        let err = setting.parse::<TruncateConfig>("truncate").unwrap_err();
        assert!(matches!(err, AnalyserError::InvalidConfig { .. }));

        let flag = OperationSetting::flag(true);
        assert_eq!(flag.parse::<TruncateConfig>("truncate").unwrap(), None);
    }

    #[test]
    fn test_from_iterator() {
        let config: OperationConfig = [("uppercase", true), ("reverse", false)]
            .into_iter()
            .collect();
        assert_eq!(config.len(), 2);
        assert!(config.is_enabled("uppercase"));
    }
}
