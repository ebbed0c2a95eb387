//! `migrate` command: copy legacy settings of this machine into synced storage.

use clap::Args;

use crate::cli::common::{CliError, CliResult};
use crate::migration::{MigrationOutcome, CONFIRMATION_MESSAGE};
use crate::panel::SettingsPanel;
use crate::store::PreferenceStore;

/// Migrate legacy settings into synced storage
#[derive(Args, Debug)]
pub struct MigrateArgs {}

impl MigrateArgs {
    /// Execute migrate command
    pub async fn execute<S: PreferenceStore>(&self, panel: &mut SettingsPanel<S>) -> CliResult<()> {
        match panel.migrate().await {
            MigrationOutcome::Succeeded => {
                println!("{CONFIRMATION_MESSAGE}");
                Ok(())
            }
            MigrationOutcome::Failed => Err(CliError::io(
                "Migration failed; legacy settings were left untouched",
            )),
        }
    }
}
