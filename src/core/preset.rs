//! Named bundles of setting assignments.

use std::fmt;
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::debug;

use crate::core::error::AppError;
use crate::core::settings::Settings;

/// A named, ordered list of `(key, value)` assignments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub assignments: Vec<(String, String)>,
}

impl Preset {
    /// `key=value` pairs joined for listings.
    pub fn summary(&self) -> String {
        self.assignments
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One assignment performed while applying a preset.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetChange {
    pub key: String,
    pub previous: Option<String>,
    pub value: String,
}

impl fmt::Display for PresetChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.previous {
            Some(previous) => write!(f, "{}: {} -> {}", self.key, previous, self.value),
            None => write!(f, "{}: {}", self.key, self.value),
        }
    }
}

/// Result of applying a preset to a settings model.
#[derive(Debug, Clone)]
pub struct PresetApplication {
    pub settings: Settings,
    pub changes: Vec<PresetChange>,
}

impl PresetApplication {
    /// Human-readable change log, one line per assignment.
    pub fn change_log(&self) -> Vec<String> {
        self.changes.iter().map(ToString::to_string).collect()
    }
}

/// Failure while applying a preset.
///
/// Assignments are not transactional: `partial` holds the model with every
/// assignment before the failing one already applied.
#[derive(Debug)]
pub struct PresetError {
    pub error: AppError,
    pub partial: PresetApplication,
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for PresetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<PresetError> for AppError {
    fn from(err: PresetError) -> Self {
        err.error
    }
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    presets: Vec<Preset>,
}

static BUILTIN_PRESETS: LazyLock<Vec<Preset>> = LazyLock::new(load_builtin_presets);

fn load_builtin_presets() -> Vec<Preset> {
    const CONFIG_CONTENT: &str = include_str!("../builtins/presets.toml");
    let file: PresetFile =
        toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtins/presets.toml");
    file.presets
}

/// Catalog of presets that can be applied by name.
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: &'static [Preset],
}

impl PresetCatalog {
    pub fn new(presets: &'static [Preset]) -> Self {
        Self { presets }
    }

    /// Catalog of the presets shipped with the binary.
    pub fn builtin() -> Self {
        Self::new(&BUILTIN_PRESETS)
    }

    pub fn presets(&self) -> &[Preset] {
        self.presets
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|preset| preset.name.as_str()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.name == name)
    }

    /// Apply the preset called `name` on top of `settings`.
    pub fn apply(&self, name: &str, settings: &Settings) -> Result<PresetApplication, PresetError> {
        let mut application = PresetApplication {
            settings: settings.clone(),
            changes: Vec::new(),
        };

        let Some(preset) = self.find(name) else {
            return Err(PresetError {
                error: AppError::InvalidInput(format!(
                    "Unknown preset '{name}'. Available: {}",
                    self.names().join(", ")
                )),
                partial: application,
            });
        };

        for (key, value) in &preset.assignments {
            let previous = application.settings.value(key);
            if let Err(error) = application.settings.set_value(key, value) {
                debug!(preset = %preset.name, key = %key, "preset assignment rejected");
                return Err(PresetError {
                    error,
                    partial: application,
                });
            }
            application.changes.push(PresetChange {
                key: key.clone(),
                previous,
                value: value.clone(),
            });
        }

        debug!(preset = %preset.name, changes = application.changes.len(), "applied preset");
        Ok(application)
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
