//! fmcli manages persisted generation defaults and compiles structured output
//! schemas for an on-device text generation runtime.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the typed settings model, its key registry and on-disk
//!   store, the built-in preset catalog, the option cascade that merges CLI
//!   flags over settings over defaults, and the [`core::engine`] seam to the
//!   model runtime.
//! - [`schema`] turns a JSON description into a [`schema::SchemaNode`] tree
//!   and finalizes it into a [`schema::CompiledSchema`].
//! - [`utils`] holds small shared helpers such as edit-distance matching.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod schema;
pub mod utils;
