//! `config` commands: show and change the panel configuration.

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{CliError, CliResult};
use crate::config::{Config, ThemeMode};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default preference data directory
    #[arg(long, value_name = "DIR")]
    store_dir: Option<PathBuf>,

    /// Terminal panel colors
    #[arg(long, value_enum, value_name = "MODE")]
    theme: Option<ThemeArg>,
}

/// Terminal color mode accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    /// Follow the OS
    Auto,
    /// Dark terminal
    Dark,
    /// Light terminal
    Light,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Auto => Self::Auto,
            ThemeArg::Dark => Self::Dark,
            ThemeArg::Light => Self::Light,
        }
    }
}

#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    data_dir: String,
    theme: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let output = describe(&config)?;

        if self.json {
            let json = serde_json::to_string_pretty(&output).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            println!("Config file: {}", output.config_file);
            println!("Data directory: {}", output.data_dir);
            println!("Theme mode: {}", output.theme);
        }
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.store_dir.is_none() && self.theme.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --store-dir or --theme",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        if let Some(dir) = &self.store_dir {
            config.paths.data_dir = Some(dir.clone());
        }
        if let Some(theme) = self.theme {
            config.ui.theme_mode = theme.into();
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration saved");
        Ok(())
    }
}

fn describe(config: &Config) -> CliResult<ConfigOutput> {
    let config_file = Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to resolve config file: {e:#}")))?;
    let data_dir = config
        .data_dir()
        .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?;

    Ok(ConfigOutput {
        config_file: config_file.display().to_string(),
        data_dir: data_dir.display().to_string(),
        theme: format!("{:?}", config.ui.theme_mode).to_lowercase(),
    })
}
