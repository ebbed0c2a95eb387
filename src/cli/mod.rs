//! CLI command handlers for Newt Settings.
//!
//! Headless, scriptable access to the settings panel. Every command runs
//! against a mounted [`SettingsPanel`](crate::panel::SettingsPanel).

pub mod common;
pub mod config;
pub mod custom;
pub mod migrate;
pub mod select;
pub mod show;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode, KindArg};
pub use config::ConfigArgs;
pub use custom::{AddArgs, DeleteArgs};
pub use migrate::MigrateArgs;
pub use select::SelectArgs;
pub use show::ShowArgs;
