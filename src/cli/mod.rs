//! Command-line interface.
//!
//! Two subcommands:
//!
//! - `init` scaffolds a starter project (manifest, `src/main.rs`,
//!   `Cargo.toml`, optional config file).
//! - `openapi` compiles the project's route manifest into an OpenAPI
//!   document and writes it as JSON or YAML.

mod commands;

pub use commands::{run_cli, Cli, Commands};
