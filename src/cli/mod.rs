//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments, initializes logging and
//! dispatches to the `config`, `schema` and `options` handlers. Handlers
//! return the lines they want printed so they can be exercised without a
//! terminal.

pub mod config;
pub mod options;
pub mod schema;


use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::core::error::AppError;
use crate::core::settings::SettingsStore;

pub use options::OptionFlags;

#[derive(Parser, Debug)]
#[command(name = "fmcli")]
#[command(version)]
#[command(about = "Manage persisted generation defaults and compile output schemas")]
#[command(
    long_about = "fmcli keeps a small set of persisted defaults for an on-device text \
generation runtime and compiles JSON schema descriptions into the structured \
output format the runtime understands.\n\n\
Settings are stored as JSON in the platform configuration directory \
(override with --config-dir). Command-line flags always win over stored \
settings, which win over built-in defaults.\n\n\
Environment Variables:\n\
  RUST_LOG          Log filter (defaults to warn; --verbose enables debug output)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding settings.json
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and change persisted settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Work with structured output schemas
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
    /// Print the effective options after merging flags, settings and defaults
    Options(OptionFlags),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// List settings
    List {
        /// Show all keys including unset ones
        #[arg(long)]
        all: bool,
    },
    /// Print a setting value
    Get {
        /// Setting key
        key: String,
    },
    /// Set a default value
    Set {
        /// Setting key
        key: String,
        /// Setting value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Reset settings (specify key for individual, omit for all)
    Reset {
        /// Setting key to reset
        key: Option<String>,
    },
    /// Describe a setting key or list all keys
    Describe {
        /// Setting key to describe
        key: Option<String>,
    },
    /// Apply a built-in preset or list available presets
    Preset {
        /// Preset name to apply
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// Compile a schema description file and print the result
    Compile {
        /// Path to the schema JSON file (`~` is expanded)
        file: String,
        /// Pretty-print the compiled document
        #[arg(long)]
        pretty: bool,
    },
}

pub fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(err) => {
            err.print();
            std::process::exit(err.exit_code());
        }
    }
}

/// Execute a parsed command and return its output lines.
pub fn run(args: Args) -> Result<Vec<String>, AppError> {
    let store = SettingsStore::new(args.config_dir);

    match args.command {
        Commands::Config { command } => config::run(&store, command),
        Commands::Schema { command } => match command {
            SchemaCommands::Compile { file, pretty } => schema::compile(&file, pretty),
        },
        Commands::Options(flags) => options::run(&store, &flags),
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("warn,fmcli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
