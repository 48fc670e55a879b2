pub mod cascade;
pub mod engine;
pub mod error;
pub mod preset;
pub mod settings;
