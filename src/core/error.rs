//! Error types shared by the settings and schema layers.

use std::fmt;

use crate::schema::SchemaError;

/// Errors surfaced to the command layer.
///
/// Every variant carries a human-readable detail string. Nothing here is
/// transient, so callers render the message and exit rather than retry.
#[derive(Debug)]
pub enum AppError {
    /// A setting key/value, preset name or tool list was rejected.
    InvalidInput(String),
    /// A settings or schema file could not be read or written.
    FileError(String),
    /// The schema description could not be compiled.
    Schema(SchemaError),
}

impl AppError {
    /// Print the error message to stderr.
    pub fn print(&self) {
        eprintln!("❌ {self}");
    }

    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(detail) => write!(f, "Invalid input: {detail}"),
            AppError::FileError(detail) => write!(f, "File error: {detail}"),
            AppError::Schema(err) => write!(f, "Invalid input: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Schema(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        AppError::Schema(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_category() {
        let err = AppError::InvalidInput("'x' is not a valid integer.".to_string());
        assert_eq!(err.to_string(), "Invalid input: 'x' is not a valid integer.");

        let err = AppError::FileError("Cannot read schema file: a.json".to_string());
        assert_eq!(err.to_string(), "File error: Cannot read schema file: a.json");
    }

    #[test]
    fn schema_errors_render_as_invalid_input() {
        let err = AppError::from(SchemaError::InvalidProperty {
            key: "a".to_string(),
        });
        assert!(err.to_string().starts_with("Invalid input: "));
        assert!(err.to_string().contains("'a'"));
        assert_eq!(err.exit_code(), 1);
    }
}
