//! Interface to the model runtime.
//!
//! The runtime itself is platform specific and lives outside this crate; the
//! command layer only assembles a [`GenerationRequest`] and hands it over.

use std::fmt;

use crate::core::cascade::EffectiveOptions;
use crate::schema::CompiledSchema;

/// Everything the engine needs for one generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub schema: Option<&'a CompiledSchema>,
    pub options: &'a EffectiveOptions,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(prompt: &'a str, options: &'a EffectiveOptions) -> Self {
        Self {
            prompt,
            schema: None,
            options,
        }
    }

    pub fn with_schema(mut self, schema: &'a CompiledSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Whether the caller expects structured output.
    pub fn is_structured(&self) -> bool {
        self.schema.is_some()
    }
}

/// Failure reported by the engine. Opaque to this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationError {
    pub message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation error: {}", self.message)
    }
}

impl std::error::Error for GenerationError {}

/// A model runtime that turns prompts into text.
pub trait GenerationEngine {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError>;
}
