//! `fmcli config` subcommands.

use tracing::debug;

use crate::cli::ConfigCommands;
use crate::core::error::AppError;
use crate::core::preset::PresetCatalog;
use crate::core::settings::registry::{self, KeyMetadata};
use crate::core::settings::{Settings, SettingsStore};

const NOT_SET: &str = "(not set)";

pub fn run(store: &SettingsStore, command: ConfigCommands) -> Result<Vec<String>, AppError> {
    match command {
        ConfigCommands::List { all } => Ok(list(&store.load(), all)),
        ConfigCommands::Get { key } => get(&store.load(), &key),
        ConfigCommands::Set { key, value } => set(store, &key, &value),
        ConfigCommands::Reset { key } => reset(store, key.as_deref()),
        ConfigCommands::Describe { key } => describe(&store.load(), key.as_deref()),
        ConfigCommands::Preset { name } => match name {
            Some(name) => apply_preset(store, &PresetCatalog::builtin(), &name),
            None => Ok(list_presets(&PresetCatalog::builtin())),
        },
    }
}

pub fn list(settings: &Settings, all: bool) -> Vec<String> {
    if all {
        return registry::all()
            .iter()
            .map(|meta| match settings.value(meta.key) {
                Some(value) => format!("{}: {value}", meta.key),
                None => format!("{}: {NOT_SET}  # {}", meta.key, meta.description),
            })
            .collect();
    }

    let values = settings.all_values();
    if values.is_empty() {
        return vec!["No settings configured.".to_string()];
    }
    values
        .into_iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect()
}

/// A recognized key with no value yields no output.
pub fn get(settings: &Settings, key: &str) -> Result<Vec<String>, AppError> {
    if !Settings::is_valid_key(key) {
        return Err(registry::unknown_key_error(key));
    }
    Ok(settings.value(key).into_iter().collect())
}

pub fn set(store: &SettingsStore, key: &str, value: &str) -> Result<Vec<String>, AppError> {
    let settings = store.load();
    let previous = settings.value(key);
    let updated = settings.with_value(key, value)?;
    store.save(&updated)?;
    debug!(key, "setting saved");

    Ok(vec![match previous {
        Some(previous) => format!("Set {key} = {value} (was: {previous})"),
        None => format!("Set {key} = {value}"),
    }])
}

pub fn reset(store: &SettingsStore, key: Option<&str>) -> Result<Vec<String>, AppError> {
    match key {
        Some(key) => {
            let updated = store.load().without_value(key)?;
            store.save(&updated)?;
            Ok(vec![format!("Reset {key}")])
        }
        None => {
            store.reset()?;
            Ok(vec!["Reset all settings".to_string()])
        }
    }
}

pub fn describe(settings: &Settings, key: Option<&str>) -> Result<Vec<String>, AppError> {
    let Some(key) = key else {
        return Ok(registry::all()
            .iter()
            .map(|meta| {
                let current = settings.value(meta.key);
                format!(
                    "{} ({}): {} [{}]",
                    meta.key,
                    meta.type_name,
                    meta.description,
                    current.as_deref().unwrap_or(NOT_SET)
                )
            })
            .collect());
    };

    let meta = registry::require(key)?;
    Ok(describe_key(meta, settings.value(key).as_deref()))
}

fn describe_key(meta: &KeyMetadata, current: Option<&str>) -> Vec<String> {
    let mut lines = vec![
        format!("Key:         {}", meta.key),
        format!("Type:        {}", meta.type_name),
        format!("Description: {}", meta.description),
    ];
    if let Some(valid) = meta.valid_values {
        lines.push(format!("Valid:       {}", valid.join(", ")));
    }
    if let Some(range) = meta.range_display() {
        lines.push(format!("Range:       {range}"));
    }
    lines.push(format!("Current:     {}", current.unwrap_or(NOT_SET)));
    lines
}

pub fn list_presets(catalog: &PresetCatalog) -> Vec<String> {
    let mut lines = vec!["Available presets:".to_string()];
    lines.extend(catalog.presets().iter().map(|preset| {
        format!(
            "  {} - {} ({})",
            preset.name,
            preset.description,
            preset.summary()
        )
    }));
    lines
}

/// A failing assignment leaves the stored file untouched.
pub fn apply_preset(
    store: &SettingsStore,
    catalog: &PresetCatalog,
    name: &str,
) -> Result<Vec<String>, AppError> {
    let application = catalog.apply(name, &store.load())?;
    store.save(&application.settings)?;

    // `apply` only succeeds for names present in the catalog.
    let description = catalog
        .find(name)
        .map(|preset| preset.description.as_str())
        .unwrap_or_default();
    let mut lines = vec![format!("Applied preset '{name}': {description}")];
    lines.extend(
        application
            .change_log()
            .into_iter()
            .map(|change| format!("  {change}")),
    );
    Ok(lines)
}
