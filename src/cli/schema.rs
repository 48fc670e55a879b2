//! `fmcli schema` subcommands.

use crate::core::error::AppError;
use crate::schema::load_schema_file;

/// Compile `file` and return the compiled document.
pub fn compile(file: &str, pretty: bool) -> Result<Vec<String>, AppError> {
    let compiled = load_schema_file(file)?;
    Ok(vec![compiled.to_json_string(pretty)])
}
