//! Registry of recognized setting keys.
//!
//! One [`KeyMetadata`] entry exists per key. Besides the descriptive fields
//! shown by `fmcli config describe`, each entry carries the functions used to
//! render, parse and clear its field, so get/set/remove dispatch through this
//! table instead of per-key branches.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use super::values::{Guardrails, Language, OutputFormat, SamplingMode, ToolApproval, ToolKind};
use super::Settings;
use crate::core::error::AppError;
use crate::utils::levenshtein::closest_match;

/// Maximum edit distance for which an unknown key gets a suggestion.
pub const SUGGESTION_MAX_DISTANCE: usize = 3;

pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=2.0;
pub const SAMPLING_THRESHOLD_RANGE: RangeInclusive<f64> = 0.0..=1.0;

type RenderFn = fn(&Settings) -> Option<String>;
type ParseFn = fn(&mut Settings, &str) -> Result<(), String>;
type ClearFn = fn(&mut Settings);

/// Static description of a setting key.
pub struct KeyMetadata {
    pub key: &'static str,
    /// Type name shown to users (`int`, `double`, `bool`, ...).
    pub type_name: &'static str,
    pub description: &'static str,
    pub valid_values: Option<&'static [&'static str]>,
    pub range: Option<RangeInclusive<f64>>,
    render: RenderFn,
    parse: ParseFn,
    clear: ClearFn,
}

impl KeyMetadata {
    pub(crate) fn render(&self, settings: &Settings) -> Option<String> {
        (self.render)(settings)
    }

    pub(crate) fn parse_into(&self, settings: &mut Settings, raw: &str) -> Result<(), AppError> {
        (self.parse)(settings, raw).map_err(|detail| {
            AppError::InvalidInput(format!("Invalid value for {}: {detail}", self.key))
        })
    }

    pub(crate) fn clear(&self, settings: &mut Settings) {
        (self.clear)(settings)
    }

    /// Range formatted for display, e.g. `0.0-2.0`.
    pub fn range_display(&self) -> Option<String> {
        self.range
            .as_ref()
            .map(|range| format!("{:?}-{:?}", range.start(), range.end()))
    }
}

static REGISTRY: LazyLock<Vec<KeyMetadata>> = LazyLock::new(|| {
    let mut entries = build_entries();
    entries.sort_by_key(|entry| entry.key);
    entries
});

/// All key metadata in ascending key order.
pub fn all() -> &'static [KeyMetadata] {
    &REGISTRY
}

/// Look up metadata for `key`.
pub fn lookup(key: &str) -> Option<&'static KeyMetadata> {
    REGISTRY.iter().find(|entry| entry.key == key)
}

/// Every recognized key in ascending order.
pub fn valid_keys() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|entry| entry.key)
}

/// Suggest the recognized key closest to `input`, if any is close enough.
pub fn suggest_key(input: &str) -> Option<&'static str> {
    closest_match(input, valid_keys(), SUGGESTION_MAX_DISTANCE)
}

/// Build the error reported for an unrecognized key.
pub fn unknown_key_error(key: &str) -> AppError {
    match suggest_key(key) {
        Some(suggestion) => AppError::InvalidInput(format!(
            "Unknown setting key: '{key}'. Did you mean '{suggestion}'?"
        )),
        None => AppError::InvalidInput(format!(
            "Unknown setting key: '{key}'. Valid keys: {}",
            valid_keys().collect::<Vec<_>>().join(", ")
        )),
    }
}

/// Look up `key`, failing with a suggestion-bearing error when unknown.
pub fn require(key: &str) -> Result<&'static KeyMetadata, AppError> {
    lookup(key).ok_or_else(|| unknown_key_error(key))
}

fn parse_int(raw: &str) -> Result<i64, String> {
    raw.parse()
        .map_err(|_| format!("'{raw}' is not a valid integer."))
}

fn parse_unsigned(raw: &str) -> Result<u64, String> {
    raw.parse()
        .map_err(|_| format!("'{raw}' is not a valid unsigned integer."))
}

fn parse_double_in(raw: &str, range: RangeInclusive<f64>) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a valid number."))?;
    if !range.contains(&value) {
        return Err(format!(
            "{raw} is out of range ({:?}-{:?}).",
            range.start(),
            range.end()
        ));
    }
    Ok(value)
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("'{raw}' is not a valid boolean (true/false).")),
    }
}

fn parse_tools(raw: &str) -> Result<Vec<ToolKind>, String> {
    let tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(format!(
            "tool list is empty. Valid tools: {}",
            ToolKind::TOKENS.join(", ")
        ));
    }
    tokens
        .into_iter()
        .map(|token| {
            ToolKind::from_token(token).ok_or_else(|| {
                format!(
                    "'{token}' is not a valid tool. Valid tools: {}",
                    ToolKind::TOKENS.join(", ")
                )
            })
        })
        .collect()
}

fn render_tools(tools: &[ToolKind]) -> String {
    tools
        .iter()
        .map(|tool| tool.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn build_entries() -> Vec<KeyMetadata> {
    vec![
        KeyMetadata {
            key: "maxTokens",
            type_name: "int",
            description: "Maximum number of response tokens",
            valid_values: None,
            range: None,
            render: |s| s.max_tokens.map(|v| v.to_string()),
            parse: |s, raw| {
                s.max_tokens = Some(parse_int(raw)?);
                Ok(())
            },
            clear: |s| s.max_tokens = None,
        },
        KeyMetadata {
            key: "temperature",
            type_name: "double",
            description: "Sampling temperature",
            valid_values: None,
            range: Some(TEMPERATURE_RANGE),
            render: |s| s.temperature.map(|v| format!("{v:?}")),
            parse: |s, raw| {
                s.temperature = Some(parse_double_in(raw, TEMPERATURE_RANGE)?);
                Ok(())
            },
            clear: |s| s.temperature = None,
        },
        KeyMetadata {
            key: "sampling",
            type_name: "string",
            description: "Sampling mode",
            valid_values: Some(SamplingMode::TOKENS),
            range: None,
            render: |s| s.sampling.map(|v| v.to_string()),
            parse: |s, raw| {
                s.sampling = Some(raw.parse()?);
                Ok(())
            },
            clear: |s| s.sampling = None,
        },
        KeyMetadata {
            key: "samplingThreshold",
            type_name: "double",
            description: "Random sampling probability threshold",
            valid_values: None,
            range: Some(SAMPLING_THRESHOLD_RANGE),
            render: |s| s.sampling_threshold.map(|v| format!("{v:?}")),
            parse: |s, raw| {
                s.sampling_threshold = Some(parse_double_in(raw, SAMPLING_THRESHOLD_RANGE)?);
                Ok(())
            },
            clear: |s| s.sampling_threshold = None,
        },
        KeyMetadata {
            key: "samplingTop",
            type_name: "int",
            description: "Random sampling top-k count",
            valid_values: None,
            range: None,
            render: |s| s.sampling_top.map(|v| v.to_string()),
            parse: |s, raw| {
                s.sampling_top = Some(parse_int(raw)?);
                Ok(())
            },
            clear: |s| s.sampling_top = None,
        },
        KeyMetadata {
            key: "samplingSeed",
            type_name: "uint64",
            description: "Random sampling seed",
            valid_values: None,
            range: None,
            render: |s| s.sampling_seed.map(|v| v.to_string()),
            parse: |s, raw| {
                s.sampling_seed = Some(parse_unsigned(raw)?);
                Ok(())
            },
            clear: |s| s.sampling_seed = None,
        },
        KeyMetadata {
            key: "guardrails",
            type_name: "string",
            description: "Guardrails level",
            valid_values: Some(Guardrails::TOKENS),
            range: None,
            render: |s| s.guardrails.map(|v| v.to_string()),
            parse: |s, raw| {
                s.guardrails = Some(raw.parse()?);
                Ok(())
            },
            clear: |s| s.guardrails = None,
        },
        KeyMetadata {
            key: "adapter",
            type_name: "string",
            description: "Path to a model adapter file",
            valid_values: None,
            range: None,
            render: |s| s.adapter.clone(),
            parse: |s, raw| {
                s.adapter = Some(raw.to_string());
                Ok(())
            },
            clear: |s| s.adapter = None,
        },
        KeyMetadata {
            key: "tools",
            type_name: "[string]",
            description: "Built-in tools to enable (comma-separated)",
            valid_values: Some(ToolKind::TOKENS),
            range: None,
            render: |s| s.tools.as_deref().map(render_tools),
            parse: |s, raw| {
                s.tools = Some(parse_tools(raw)?);
                Ok(())
            },
            clear: |s| s.tools = None,
        },
        KeyMetadata {
            key: "toolApproval",
            type_name: "string",
            description: "Tool approval mode",
            valid_values: Some(ToolApproval::TOKENS),
            range: None,
            render: |s| s.tool_approval.map(|v| v.to_string()),
            parse: |s, raw| {
                s.tool_approval = Some(raw.parse()?);
                Ok(())
            },
            clear: |s| s.tool_approval = None,
        },
        KeyMetadata {
            key: "format",
            type_name: "string",
            description: "Output format",
            valid_values: Some(OutputFormat::TOKENS),
            range: None,
            render: |s| s.format.map(|v| v.to_string()),
            parse: |s, raw| {
                s.format = Some(raw.parse()?);
                Ok(())
            },
            clear: |s| s.format = None,
        },
        KeyMetadata {
            key: "stream",
            type_name: "bool",
            description: "Stream responses as they are generated",
            valid_values: None,
            range: None,
            render: |s| s.stream.map(|v| v.to_string()),
            parse: |s, raw| {
                s.stream = Some(parse_bool(raw)?);
                Ok(())
            },
            clear: |s| s.stream = None,
        },
        KeyMetadata {
            key: "instructions",
            type_name: "string",
            description: "Default system instructions",
            valid_values: None,
            range: None,
            render: |s| s.instructions.clone(),
            parse: |s, raw| {
                s.instructions = Some(raw.to_string());
                Ok(())
            },
            clear: |s| s.instructions = None,
        },
        KeyMetadata {
            key: "logEnabled",
            type_name: "bool",
            description: "Record prompts and responses to the history log",
            valid_values: None,
            range: None,
            render: |s| s.log_enabled.map(|v| v.to_string()),
            parse: |s, raw| {
                s.log_enabled = Some(parse_bool(raw)?);
                Ok(())
            },
            clear: |s| s.log_enabled = None,
        },
        KeyMetadata {
            key: "language",
            type_name: "string",
            description: "Response language hint",
            valid_values: Some(Language::TOKENS),
            range: None,
            render: |s| s.language.map(|v| v.to_string()),
            parse: |s, raw| {
                s.language = Some(raw.parse()?);
                Ok(())
            },
            clear: |s| s.language = None,
        },
        KeyMetadata {
            key: "rawJson",
            type_name: "bool",
            description: "Print structured output as raw JSON without formatting",
            valid_values: None,
            range: None,
            render: |s| s.raw_json.map(|v| v.to_string()),
            parse: |s, raw| {
                s.raw_json = Some(parse_bool(raw)?);
                Ok(())
            },
            clear: |s| s.raw_json = None,
        },
    ]
}
