use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{registry, Settings};
use crate::core::error::AppError;
use crate::utils::path_display;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Errors that can occur when persisting settings to disk.
#[derive(Debug)]
pub enum StoreError {
    /// Failed to create the settings directory.
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write or atomically replace the settings file.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to remove the settings file.
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize the settings document.
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::CreateDir { path, source } => write!(
                f,
                "Failed to create settings directory {}: {source}",
                path_display(path)
            ),
            StoreError::Write { path, source } => write!(
                f,
                "Failed to write settings at {}: {source}",
                path_display(path)
            ),
            StoreError::Remove { path, source } => write!(
                f,
                "Failed to remove settings at {}: {source}",
                path_display(path)
            ),
            StoreError::Serialize(source) => write!(f, "Failed to serialize settings: {source}"),
        }
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            StoreError::CreateDir { source, .. }
            | StoreError::Write { source, .. }
            | StoreError::Remove { source, .. } => Some(source),
            StoreError::Serialize(source) => Some(source),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::FileError(err.to_string())
    }
}

/// File-backed persistence for [`Settings`].
///
/// Loading never fails: a missing, unreadable or malformed file yields the
/// empty model. Saving replaces the file atomically. There is no locking, so
/// concurrent writers race and the last one wins.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    base_dir: PathBuf,
}

impl SettingsStore {
    /// Store rooted at `base_dir`, or the platform config directory.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.unwrap_or_else(default_base_dir),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE_NAME)
    }

    pub fn load(&self) -> Settings {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path_display(&path), error = %err, "settings unreadable; using defaults");
                }
                return Settings::default();
            }
        };

        let fields = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => {
                warn!(path = %path_display(&path), "settings document is not an object; using defaults");
                return Settings::default();
            }
            Err(err) => {
                warn!(path = %path_display(&path), error = %err, "settings malformed; using defaults");
                return Settings::default();
            }
        };

        let settings = decode_fields(&path, fields);
        debug!(path = %path_display(&path), "loaded settings");
        settings
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_dir).map_err(|source| StoreError::CreateDir {
            path: self.base_dir.clone(),
            source,
        })?;

        let path = self.path();
        let mut contents = serde_json::to_string_pretty(settings).map_err(StoreError::Serialize)?;
        contents.push('\n');

        let write_err = |source: std::io::Error| StoreError::Write {
            path: path.clone(),
            source,
        };
        let mut temp_file = NamedTempFile::new_in(&self.base_dir).map_err(write_err)?;
        temp_file.write_all(contents.as_bytes()).map_err(write_err)?;
        temp_file.as_file_mut().sync_all().map_err(write_err)?;
        temp_file
            .persist(&path)
            .map_err(|err| write_err(err.error))?;

        debug!(path = %path_display(&path), "saved settings");
        Ok(())
    }

    /// Remove the settings file. Missing files are not an error.
    pub fn reset(&self) -> Result<(), StoreError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path_display(&path), "removed settings");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove { path, source }),
        }
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Decode each recognized key on its own so one bad value only drops that
/// key. Values go through the registry parser, which also enforces ranges.
fn decode_fields(path: &Path, fields: Map<String, Value>) -> Settings {
    let mut settings = Settings::default();
    for (key, value) in fields {
        let Some(meta) = registry::lookup(&key) else {
            continue;
        };

        let single = Value::Object(Map::from_iter([(key.clone(), value)]));
        let rendered = match serde_json::from_value::<Settings>(single) {
            Ok(field) => meta.render(&field),
            Err(err) => {
                warn!(path = %path_display(path), key = %key, error = %err, "ignoring invalid setting");
                continue;
            }
        };
        if let Some(rendered) = rendered {
            if let Err(err) = meta.parse_into(&mut settings, &rendered) {
                warn!(path = %path_display(path), key = %key, error = %err, "ignoring invalid setting");
            }
        }
    }
    settings
}

fn default_base_dir() -> PathBuf {
    match ProjectDirs::from("", "", "fmcli") {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => PathBuf::from(".fmcli"),
    }
}
