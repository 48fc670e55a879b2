//! `fmcli options`: resolve and print the effective option set.
//!
//! Flag values are taken as raw strings and validated through the settings
//! registry, so a flag accepts exactly what `config set` accepts for the same
//! key. `--language` is the exception: an unrecognized language is passed
//! through and simply produces no language hint.

use clap::Args as ClapArgs;

use crate::core::cascade::{CliOverrides, EffectiveOptions};
use crate::core::error::AppError;
use crate::core::settings::{Settings, SettingsStore};

#[derive(ClapArgs, Debug, Default, Clone, PartialEq)]
pub struct OptionFlags {
    /// Maximum number of tokens to generate
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<String>,
    /// Sampling temperature (0.0-2.0)
    #[arg(long, value_name = "T", allow_hyphen_values = true)]
    pub temperature: Option<String>,
    /// Sampling mode (greedy)
    #[arg(long, value_name = "MODE")]
    pub sampling: Option<String>,
    /// Probability threshold for random sampling (0.0-1.0)
    #[arg(long, value_name = "P", allow_hyphen_values = true)]
    pub sampling_threshold: Option<String>,
    /// Top-k for random sampling
    #[arg(long, value_name = "K")]
    pub sampling_top: Option<String>,
    /// Random seed for sampling
    #[arg(long, value_name = "SEED")]
    pub sampling_seed: Option<String>,
    /// Guardrail level (default, permissive)
    #[arg(long, value_name = "LEVEL")]
    pub guardrails: Option<String>,
    /// Path to a model adapter
    #[arg(long, value_name = "PATH")]
    pub adapter: Option<String>,
    /// Comma-separated tools (shell, file-read)
    #[arg(long, value_name = "LIST")]
    pub tools: Option<String>,
    /// Tool approval mode (ask, auto)
    #[arg(long, value_name = "MODE")]
    pub tool_approval: Option<String>,
    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
    /// Stream responses (true, false)
    #[arg(long, value_name = "BOOL")]
    pub stream: Option<String>,
    /// System instructions
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub instructions: Option<String>,
    /// Response language (ja, en)
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,
    /// Enable session logging (true, false)
    #[arg(long, value_name = "BOOL")]
    pub log_enabled: Option<String>,
    /// Print raw JSON output (true, false)
    #[arg(long, value_name = "BOOL")]
    pub raw_json: Option<String>,
}

impl OptionFlags {
    /// Flags that map onto validated setting keys, paired with that key.
    fn validated(&self) -> [(&'static str, Option<&str>); 15] {
        [
            ("adapter", self.adapter.as_deref()),
            ("format", self.format.as_deref()),
            ("guardrails", self.guardrails.as_deref()),
            ("instructions", self.instructions.as_deref()),
            ("logEnabled", self.log_enabled.as_deref()),
            ("maxTokens", self.max_tokens.as_deref()),
            ("rawJson", self.raw_json.as_deref()),
            ("sampling", self.sampling.as_deref()),
            ("samplingSeed", self.sampling_seed.as_deref()),
            ("samplingThreshold", self.sampling_threshold.as_deref()),
            ("samplingTop", self.sampling_top.as_deref()),
            ("stream", self.stream.as_deref()),
            ("temperature", self.temperature.as_deref()),
            ("toolApproval", self.tool_approval.as_deref()),
            ("tools", self.tools.as_deref()),
        ]
    }

    /// Parse the given flags into typed overrides.
    pub fn to_overrides(&self) -> Result<CliOverrides, AppError> {
        let mut layer = Settings::default();
        for (key, raw) in self.validated() {
            if let Some(raw) = raw {
                layer.set_value(key, raw)?;
            }
        }

        Ok(CliOverrides {
            max_tokens: layer.max_tokens,
            temperature: layer.temperature,
            sampling: layer.sampling,
            sampling_threshold: layer.sampling_threshold,
            sampling_top: layer.sampling_top,
            sampling_seed: layer.sampling_seed,
            guardrails: layer.guardrails,
            adapter: layer.adapter,
            tools: layer.tools.unwrap_or_default(),
            tool_approval: layer.tool_approval,
            format: layer.format,
            stream: layer.stream,
            instructions: layer.instructions,
            language: self.language.clone(),
            log_enabled: layer.log_enabled,
            raw_json: layer.raw_json,
        })
    }
}

pub fn resolve(store: &SettingsStore, flags: &OptionFlags) -> Result<EffectiveOptions, AppError> {
    let overrides = flags.to_overrides()?;
    Ok(EffectiveOptions::resolve(&overrides, &store.load()))
}

pub fn run(store: &SettingsStore, flags: &OptionFlags) -> Result<Vec<String>, AppError> {
    let options = resolve(store, flags)?;
    let rendered = serde_json::to_string_pretty(&options)
        .map_err(|err| AppError::InvalidInput(format!("Cannot render options: {err}")))?;
    Ok(vec![rendered])
}
