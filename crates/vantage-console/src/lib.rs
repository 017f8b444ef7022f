//! Vantage Console - command-line browser for the data-health reports
//!
//! Wires the report catalogue, drill sessions and trend analytics to a
//! `clap` command tree. Output is plain text by default, or JSON with
//! `--json`. User overrides are read from a TOML file.

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;

pub use cli::{Cli, Commands, WindowArg};
pub use commands::execute;
pub use config::{ConfigError, ConsoleConfig};
