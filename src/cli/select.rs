//! `select` command: change the selected item of a domain.

use clap::Args;

use crate::cli::common::{CliResult, KindArg};
use crate::models::ItemKind;
use crate::panel::SettingsPanel;
use crate::store::PreferenceStore;

/// Select a theme or shortcut profile
#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Domain to change
    #[arg(value_enum)]
    kind: KindArg,

    /// Item ID to select (e.g., theme-dark)
    #[arg(value_name = "ID")]
    id: String,
}

impl SelectArgs {
    /// Execute select command
    pub async fn execute<S: PreferenceStore>(&self, panel: &mut SettingsPanel<S>) -> CliResult<()> {
        let kind = ItemKind::from(self.kind);
        let affordances = panel.select(kind, &self.id).await?;

        println!("{} set to {}", kind.display_name(), self.id);
        if affordances.can_edit {
            println!("This is a custom {}: it can be edited or deleted.", kind.noun());
        }
        Ok(())
    }
}
