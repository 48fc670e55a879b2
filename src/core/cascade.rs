//! Settings cascade: CLI flags over persisted settings over built-in defaults.
//!
//! Each option group has one named resolution function. [`EffectiveOptions::resolve`]
//! applies them in a fixed order: generation, model, tools, output.

use serde::Serialize;

use crate::core::settings::{
    Guardrails, OutputFormat, SamplingMode, Settings, ToolApproval, ToolKind,
};

pub const DEFAULT_GUARDRAILS: Guardrails = Guardrails::Default;
pub const DEFAULT_TOOL_APPROVAL: ToolApproval = ToolApproval::Ask;
pub const DEFAULT_FORMAT: OutputFormat = OutputFormat::Text;
pub const DEFAULT_STREAM: bool = false;
pub const DEFAULT_LOG_ENABLED: bool = false;
pub const DEFAULT_RAW_JSON: bool = false;

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub max_tokens: Option<i64>,
    pub temperature: Option<f64>,
    pub sampling: Option<SamplingMode>,
    pub sampling_threshold: Option<f64>,
    pub sampling_top: Option<i64>,
    pub sampling_seed: Option<u64>,
    pub guardrails: Option<Guardrails>,
    pub adapter: Option<String>,
    /// Empty means "not given".
    pub tools: Vec<ToolKind>,
    pub tool_approval: Option<ToolApproval>,
    pub format: Option<OutputFormat>,
    pub stream: Option<bool>,
    pub instructions: Option<String>,
    /// Raw token; unrecognized values suppress the language hint.
    pub language: Option<String>,
    pub log_enabled: Option<bool>,
    pub raw_json: Option<bool>,
}

/// How the engine picks tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum SamplingStrategy {
    /// Engine default.
    Default,
    Greedy,
    RandomThreshold { threshold: f64, seed: Option<u64> },
    RandomTop { top: i64, seed: Option<u64> },
}

impl SamplingStrategy {
    /// Greedy wins over random parameters; a threshold wins over top-k. A
    /// seed on its own selects nothing.
    pub fn from_parts(
        mode: Option<SamplingMode>,
        threshold: Option<f64>,
        top: Option<i64>,
        seed: Option<u64>,
    ) -> Self {
        match (mode, threshold, top) {
            (Some(SamplingMode::Greedy), _, _) => SamplingStrategy::Greedy,
            (None, Some(threshold), _) => SamplingStrategy::RandomThreshold { threshold, seed },
            (None, None, Some(top)) => SamplingStrategy::RandomTop { top, seed },
            (None, None, None) => SamplingStrategy::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub max_tokens: Option<i64>,
    pub temperature: Option<f64>,
    pub sampling: SamplingStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOptions {
    pub guardrails: Guardrails,
    pub adapter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOptions {
    pub tools: Vec<ToolKind>,
    pub approval: ToolApproval,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub stream: bool,
    pub raw_json: bool,
    pub log_enabled: bool,
    pub instructions: Option<String>,
}

/// The option set a command actually uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveOptions {
    pub generation: GenerationOptions,
    pub model: ModelOptions,
    pub tools: ToolOptions,
    pub output: OutputOptions,
}

impl EffectiveOptions {
    pub fn resolve(cli: &CliOverrides, settings: &Settings) -> Self {
        Self {
            generation: resolve_generation(cli, settings),
            model: resolve_model(cli, settings),
            tools: resolve_tools(cli, settings),
            output: resolve_output(cli, settings),
        }
    }
}

/// Sampling fields are merged one by one before the strategy is chosen, so a
/// CLI seed can combine with a stored threshold.
pub fn resolve_generation(cli: &CliOverrides, settings: &Settings) -> GenerationOptions {
    let sampling = SamplingStrategy::from_parts(
        cli.sampling.or(settings.sampling),
        cli.sampling_threshold.or(settings.sampling_threshold),
        cli.sampling_top.or(settings.sampling_top),
        cli.sampling_seed.or(settings.sampling_seed),
    );
    GenerationOptions {
        max_tokens: cli.max_tokens.or(settings.max_tokens),
        temperature: cli.temperature.or(settings.temperature),
        sampling,
    }
}

pub fn resolve_model(cli: &CliOverrides, settings: &Settings) -> ModelOptions {
    ModelOptions {
        guardrails: cli
            .guardrails
            .or(settings.guardrails)
            .unwrap_or(DEFAULT_GUARDRAILS),
        adapter: cli.adapter.clone().or_else(|| settings.adapter.clone()),
    }
}

/// A non-empty CLI tool list replaces the stored one entirely.
pub fn resolve_tools(cli: &CliOverrides, settings: &Settings) -> ToolOptions {
    let tools = if cli.tools.is_empty() {
        settings.tools.clone().unwrap_or_default()
    } else {
        cli.tools.clone()
    };
    ToolOptions {
        tools,
        approval: cli
            .tool_approval
            .or(settings.tool_approval)
            .unwrap_or(DEFAULT_TOOL_APPROVAL),
    }
}

pub fn resolve_output(cli: &CliOverrides, settings: &Settings) -> OutputOptions {
    OutputOptions {
        format: cli.format.or(settings.format).unwrap_or(DEFAULT_FORMAT),
        stream: cli.stream.or(settings.stream).unwrap_or(DEFAULT_STREAM),
        raw_json: cli.raw_json.or(settings.raw_json).unwrap_or(DEFAULT_RAW_JSON),
        log_enabled: cli
            .log_enabled
            .or(settings.log_enabled)
            .unwrap_or(DEFAULT_LOG_ENABLED),
        instructions: settings
            .effective_instructions(cli.instructions.as_deref(), cli.language.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(pairs: &[(&str, &str)]) -> Settings {
        let mut settings = Settings::default();
        for (key, value) in pairs {
            settings.set_value(key, value).unwrap();
        }
        settings
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let options = EffectiveOptions::resolve(&CliOverrides::default(), &Settings::default());
        assert_eq!(options.generation.max_tokens, None);
        assert_eq!(options.generation.sampling, SamplingStrategy::Default);
        assert_eq!(options.model.guardrails, Guardrails::Default);
        assert!(options.tools.tools.is_empty());
        assert_eq!(options.tools.approval, ToolApproval::Ask);
        assert_eq!(options.output.format, OutputFormat::Text);
        assert!(!options.output.stream);
        assert_eq!(options.output.instructions, None);
    }

    #[test]
    fn settings_fill_missing_cli_values() {
        let settings = stored(&[
            ("maxTokens", "300"),
            ("guardrails", "permissive"),
            ("format", "json"),
            ("stream", "true"),
        ]);
        let options = EffectiveOptions::resolve(&CliOverrides::default(), &settings);
        assert_eq!(options.generation.max_tokens, Some(300));
        assert_eq!(options.model.guardrails, Guardrails::Permissive);
        assert_eq!(options.output.format, OutputFormat::Json);
        assert!(options.output.stream);
    }

    #[test]
    fn cli_values_win_over_settings() {
        let settings = stored(&[("temperature", "1.2"), ("stream", "true"), ("adapter", "a")]);
        let cli = CliOverrides {
            temperature: Some(0.1),
            stream: Some(false),
            adapter: Some("b".to_string()),
            ..Default::default()
        };
        let options = EffectiveOptions::resolve(&cli, &settings);
        assert_eq!(options.generation.temperature, Some(0.1));
        assert!(!options.output.stream);
        assert_eq!(options.model.adapter.as_deref(), Some("b"));
    }

    #[test]
    fn cli_tool_list_replaces_stored_list() {
        let settings = stored(&[("tools", "shell,file-read"), ("toolApproval", "auto")]);

        let inherited = resolve_tools(&CliOverrides::default(), &settings);
        assert_eq!(inherited.tools, vec![ToolKind::Shell, ToolKind::FileRead]);
        assert_eq!(inherited.approval, ToolApproval::Auto);

        let cli = CliOverrides {
            tools: vec![ToolKind::FileRead],
            ..Default::default()
        };
        assert_eq!(resolve_tools(&cli, &settings).tools, vec![ToolKind::FileRead]);
    }

    #[test]
    fn sampling_strategy_precedence() {
        assert_eq!(
            SamplingStrategy::from_parts(Some(SamplingMode::Greedy), Some(0.5), Some(3), None),
            SamplingStrategy::Greedy
        );
        assert_eq!(
            SamplingStrategy::from_parts(None, Some(0.5), Some(3), Some(7)),
            SamplingStrategy::RandomThreshold {
                threshold: 0.5,
                seed: Some(7)
            }
        );
        assert_eq!(
            SamplingStrategy::from_parts(None, None, Some(3), None),
            SamplingStrategy::RandomTop { top: 3, seed: None }
        );
        assert_eq!(
            SamplingStrategy::from_parts(None, None, None, Some(7)),
            SamplingStrategy::Default
        );
    }

    #[test]
    fn sampling_fields_merge_across_layers() {
        let settings = stored(&[("samplingThreshold", "0.8")]);
        let cli = CliOverrides {
            sampling_seed: Some(42),
            ..Default::default()
        };
        assert_eq!(
            resolve_generation(&cli, &settings).sampling,
            SamplingStrategy::RandomThreshold {
                threshold: 0.8,
                seed: Some(42)
            }
        );
    }

    #[test]
    fn output_instructions_use_effective_instructions() {
        let settings = stored(&[("language", "en"), ("instructions", "Be brief.")]);
        let cli = CliOverrides {
            language: Some("ja".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_output(&cli, &settings).instructions.as_deref(),
            Some("Respond in Japanese. Be brief.")
        );
    }

    #[test]
    fn effective_options_serialize_as_camel_case() {
        let settings = stored(&[("samplingTop", "5"), ("rawJson", "true")]);
        let options = EffectiveOptions::resolve(&CliOverrides::default(), &settings);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["generation"]["sampling"]["mode"], "randomTop");
        assert_eq!(json["generation"]["sampling"]["top"], 5);
        assert_eq!(json["output"]["rawJson"], true);
        assert_eq!(json["tools"]["approval"], "ask");
    }
}
