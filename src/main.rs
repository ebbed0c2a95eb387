//! Newt Settings - theme and keyboard-shortcut settings for the Newt tab page
//!
//! Without a subcommand the interactive terminal panel is opened. The other
//! subcommands give headless, scriptable access to the same panel.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newt_settings::cli::{
    AddArgs, CliError, CliResult, ConfigArgs, DeleteArgs, ExitCode, MigrateArgs, SelectArgs,
    ShowArgs,
};
use newt_settings::config::Config;
use newt_settings::constants::APP_BINARY_NAME;
use newt_settings::models::MigrationStatus;
use newt_settings::panel::SettingsPanel;
use newt_settings::store::FileStore;
use newt_settings::tui::{self, Theme};

/// Newt Settings - pick themes and keyboard shortcuts, migrate old settings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Preference data directory (overrides the configured one)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Display current selections and available items
    Show(ShowArgs),
    /// Select a theme or shortcut profile
    Select(SelectArgs),
    /// Create a custom theme or shortcut profile
    Add(AddArgs),
    /// Delete a custom theme or shortcut profile
    Delete(DeleteArgs),
    /// Copy this machine's legacy settings into synced storage
    Migrate(MigrateArgs),
    /// Show or change the configuration
    Config(ConfigArgs),
    /// Open the interactive settings panel (default)
    Tui,
}

fn main() {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            std::process::exit(ExitCode::IoError.code());
        }
    };

    if let Err(e) = runtime.block_on(run(cli)) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code().code());
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let command = cli.command.unwrap_or(Command::Tui);
    let interactive = matches!(command, Command::Tui);

    init_tracing(cli.verbose, interactive)
        .map_err(|e| CliError::io(format!("Failed to initialize logging: {e:#}")))?;

    // Configuration does not need the store
    if let Command::Config(args) = &command {
        return args.execute();
    }

    let config = Config::load()
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config
            .data_dir()
            .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?,
    };

    let store = Arc::new(FileStore::open(&data_dir)?);

    // First run after the update: copy legacy settings once
    match store.ensure_migrated() {
        Ok(MigrationStatus::Migrated {
            items_copied,
            selections_copied,
        }) => {
            tracing::info!(items_copied, selections_copied, "migrated legacy settings");
        }
        Ok(MigrationStatus::AlreadyCurrent) => {}
        Err(e) => tracing::warn!(error = %e, "first-run migration failed"),
    }

    // A domain that cannot be mounted stays empty; the rest remains usable
    let mut panel = SettingsPanel::new(Arc::clone(&store));
    if let Err(e) = panel.mount().await {
        tracing::warn!(error = %e, "settings panel partially mounted");
        eprintln!("Warning: {e}");
    }

    match command {
        Command::Show(args) => args.execute(&panel),
        Command::Select(args) => args.execute(&mut panel).await,
        Command::Add(args) => args.execute(&mut panel).await,
        Command::Delete(args) => args.execute(&mut panel).await,
        Command::Migrate(args) => args.execute(&mut panel).await,
        Command::Config(args) => args.execute(),
        Command::Tui => {
            let theme = Theme::from_mode(config.ui.theme_mode);
            run_tui(&mut panel, &theme)
                .await
                .map_err(|e| CliError::io(format!("{e:#}")))
        }
    }
}

async fn run_tui(panel: &mut SettingsPanel<FileStore>, theme: &Theme) -> anyhow::Result<()> {
    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_panel(panel, &mut terminal, theme).await;
    tui::restore_terminal(terminal)?;
    result
}

/// Logs go to stderr for commands and to a file for the TUI, which owns the screen.
fn init_tracing(verbose: u8, interactive: bool) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("newt_settings={level}").into());

    if interactive {
        let log_dir = Config::config_dir()?;
        fs::create_dir_all(&log_dir).context(format!(
            "Failed to create log directory: {}",
            log_dir.display()
        ))?;
        let log_path = log_dir.join(format!("{APP_BINARY_NAME}.log"));
        let file = File::create(&log_path)
            .context(format!("Failed to create log file: {}", log_path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
