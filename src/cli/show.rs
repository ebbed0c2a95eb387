//! `show` command: print both domains and the migration state.

use clap::Args;

use crate::binder::DomainState;
use crate::cli::common::{CliError, CliResult};
use crate::constants::APP_NAME;
use crate::migration::CONFIRMATION_MESSAGE;
use crate::panel::{DomainView, PanelState, SettingsPanel};
use crate::store::PreferenceStore;

/// Display current selections and available items
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ShowArgs {
    /// Execute show command
    pub fn execute<S: PreferenceStore>(&self, panel: &SettingsPanel<S>) -> CliResult<()> {
        let state = panel.state();
        if self.json {
            let json = serde_json::to_string_pretty(&state)
                .map_err(|e| CliError::io(format!("Failed to serialize settings to JSON: {e}")))?;
            println!("{json}");
        } else {
            print!("{}", format_human_readable(&state));
        }
        Ok(())
    }
}

fn format_human_readable(state: &PanelState) -> String {
    let mut out = String::new();
    out.push_str(APP_NAME);
    out.push('\n');
    out.push_str(&"=".repeat(APP_NAME.len()));
    out.push_str("\n\n");

    for view in [&state.theme, &state.shortcuts] {
        format_domain(&mut out, view);
    }

    if state.migration_confirmed {
        out.push_str(CONFIRMATION_MESSAGE);
        out.push('\n');
    }
    out
}

fn format_domain(out: &mut String, view: &DomainView) {
    out.push_str(view.kind.display_name());
    out.push_str(":\n");

    if view.state == DomainState::Uninitialized {
        out.push_str("  (could not be loaded, see warnings)\n");
    } else if view.control.options.is_empty() {
        out.push_str("  (none available)\n");
    }
    for item in &view.control.options {
        let marker = if view.control.value.as_deref() == Some(item.id.as_str()) {
            '>'
        } else {
            ' '
        };
        let origin = if item.is_custom() { " [custom]" } else { "" };
        out.push_str(&format!("  {marker} {} ({}){origin}\n", item.name, item.id));
    }

    let mut actions = vec!["add"];
    if view.affordances.can_edit {
        actions.push("edit");
    }
    if view.affordances.can_delete {
        actions.push("delete");
    }
    out.push_str(&format!("  actions: {}\n\n", actions.join(", ")));
}
