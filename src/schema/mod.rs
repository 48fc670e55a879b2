//! Dynamic schema compiler for structured generation output.
//!
//! A schema description is a small JSON dialect (objects with `properties`,
//! arrays with `items`, string enumerations with `anyOf`, primitive `type`s).
//! [`compiler`] turns it into a typed [`SchemaNode`] tree and [`compiled`]
//! finalizes the tree into the [`CompiledSchema`] consumed by the generation
//! engine. Compilation is pure and deterministic.

pub mod compiled;
pub mod compiler;
pub mod node;

#[cfg(test)]
mod tests;

use std::fmt;
use std::fs;

pub use compiled::CompiledSchema;
pub use compiler::{build, compile, compile_slice};
pub use node::{
    ArraySchema, EnumerationSchema, LeafSchema, ObjectSchema, PrimitiveKind, Property, SchemaNode,
};

use crate::core::error::AppError;
use crate::utils::expand_tilde;

/// Errors produced while compiling a schema description.
#[derive(Debug)]
pub enum SchemaError {
    /// The input was not valid JSON.
    Parse(serde_json::Error),
    /// The top-level value was not a JSON object.
    RootNotObject,
    /// A `properties` entry was not a JSON object.
    InvalidProperty { key: String },
    /// The tree contains something the engine cannot represent.
    Unrepresentable(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Parse(err) => write!(f, "Invalid JSON in schema file: {err}"),
            SchemaError::RootNotObject => write!(f, "Schema root must be a JSON object"),
            SchemaError::InvalidProperty { key } => {
                write!(f, "Property '{key}' must be a JSON object")
            }
            SchemaError::Unrepresentable(detail) => {
                write!(f, "Schema cannot be represented: {detail}")
            }
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Read and compile the schema description at `path` (`~` is expanded).
pub fn load_schema_file(path: &str) -> Result<CompiledSchema, AppError> {
    let resolved = expand_tilde(path);
    let bytes = fs::read(&resolved)
        .map_err(|err| AppError::FileError(format!("Cannot read schema file: {path} ({err})")))?;
    Ok(compile_slice(&bytes)?)
}
