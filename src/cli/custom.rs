//! `add` and `delete` commands for custom items.
//!
//! These stand in for the external builders: they change the store and then
//! report completion to the panel so the domain is rebuilt.

use clap::Args;

use crate::binder::SelectionOutcome;
use crate::cli::common::{CliError, CliResult, KindArg};
use crate::models::{Item, ItemKind};
use crate::panel::SettingsPanel;
use crate::store::{CustomItemStore, PreferenceStore};

/// Create a custom theme or shortcut profile
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Domain to add to
    #[arg(value_enum)]
    kind: KindArg,

    /// Display name of the new item
    #[arg(value_name = "NAME")]
    name: String,

    /// Select the new item after creating it
    #[arg(long)]
    select: bool,
}

/// Delete a custom theme or shortcut profile
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Domain to delete from
    #[arg(value_enum)]
    kind: KindArg,

    /// ID of the custom item
    #[arg(value_name = "ID")]
    id: String,
}

impl AddArgs {
    /// Execute add command
    pub async fn execute<S>(&self, panel: &mut SettingsPanel<S>) -> CliResult<()>
    where
        S: PreferenceStore + CustomItemStore,
    {
        Item::validate_name(&self.name).map_err(|e| CliError::validation(e.to_string()))?;

        let kind = ItemKind::from(self.kind);
        let item = panel.store().add_custom(kind, self.name.trim())?;
        panel.editor_completed(kind).await?;
        if self.select {
            panel.select(kind, &item.id).await?;
        }

        println!("Created custom {} {} ({})", kind.noun(), item.name, item.id);
        Ok(())
    }
}

impl DeleteArgs {
    /// Execute delete command
    pub async fn execute<S>(&self, panel: &mut SettingsPanel<S>) -> CliResult<()>
    where
        S: PreferenceStore + CustomItemStore,
    {
        let kind = ItemKind::from(self.kind);
        let removed = panel.store().remove_custom(kind, &self.id)?;
        let outcome = panel.editor_completed(kind).await?;

        println!("Deleted custom {} {} ({})", kind.noun(), removed.name, removed.id);
        if let SelectionOutcome::FellBack { selected, .. } = outcome {
            println!("{} selection reset to {selected}", kind.display_name());
        }
        Ok(())
    }
}
