//! Typed, validated settings model.
//!
//! [`Settings`] holds one optional field per recognized key. Mutation goes
//! through string-keyed accessors that dispatch via the [`registry`], so a
//! value read from the command line is always parsed and range-checked before
//! it lands in a field.
//!
//! Updates are all-or-nothing: [`Settings::with_value`] builds a new model and
//! [`Settings::set_value`] only swaps it in when parsing succeeded.

pub mod registry;
pub mod store;
pub mod values;


use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
pub use registry::{suggest_key, KeyMetadata};
pub use store::SettingsStore;
pub use values::{Guardrails, Language, OutputFormat, SamplingMode, ToolApproval, ToolKind};

/// Persisted defaults for CLI options. Every field is optional.
///
/// Fields are declared in ascending key order so the serialized document is
/// written with sorted keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardrails: Option<Guardrails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling: Option<SamplingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_top: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_approval: Option<ToolApproval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolKind>>,
}

impl Settings {
    /// Returns `true` when `key` names a recognized setting.
    pub fn is_valid_key(key: &str) -> bool {
        registry::lookup(key).is_some()
    }

    /// Render the value stored under `key`.
    ///
    /// Unknown keys and unset fields both yield `None`; callers that need to
    /// distinguish them check [`Settings::is_valid_key`] first.
    pub fn value(&self, key: &str) -> Option<String> {
        registry::lookup(key).and_then(|meta| meta.render(self))
    }

    /// Return a copy of this model with `key` set from `raw`.
    pub fn with_value(&self, key: &str, raw: &str) -> Result<Settings, AppError> {
        let meta = registry::require(key)?;
        let mut next = self.clone();
        meta.parse_into(&mut next, raw)?;
        Ok(next)
    }

    /// Parse `raw` for `key` and store it. On error the model is unchanged.
    pub fn set_value(&mut self, key: &str, raw: &str) -> Result<(), AppError> {
        *self = self.with_value(key, raw)?;
        Ok(())
    }

    /// Return a copy of this model with `key` cleared.
    pub fn without_value(&self, key: &str) -> Result<Settings, AppError> {
        let meta = registry::require(key)?;
        let mut next = self.clone();
        meta.clear(&mut next);
        Ok(next)
    }

    /// Clear the field stored under `key`.
    pub fn remove_value(&mut self, key: &str) -> Result<(), AppError> {
        *self = self.without_value(key)?;
        Ok(())
    }

    /// All set fields as `(key, value)` pairs in ascending key order.
    pub fn all_values(&self) -> Vec<(String, String)> {
        registry::all()
            .iter()
            .filter_map(|meta| meta.render(self).map(|value| (meta.key.to_string(), value)))
            .collect()
    }

    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Settings::default()
    }

    /// Combine the language hint and the base instructions.
    ///
    /// The CLI language wins over the stored one; an unrecognized CLI language
    /// produces no hint rather than falling back. The CLI instructions likewise
    /// replace the stored ones.
    pub fn effective_instructions(
        &self,
        cli_instructions: Option<&str>,
        cli_language: Option<&str>,
    ) -> Option<String> {
        let hint = match cli_language {
            Some(token) => Language::from_token(token).map(Language::hint),
            None => self.language.map(Language::hint),
        };
        let base = cli_instructions.or(self.instructions.as_deref());

        match (hint, base) {
            (Some(hint), Some(base)) => Some(format!("{hint} {base}")),
            (Some(hint), None) => Some(hint.to_string()),
            (None, Some(base)) => Some(base.to_string()),
            (None, None) => None,
        }
    }
}
