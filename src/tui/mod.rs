//! Terminal front-end for the settings panel.
//!
//! The loop owns a [`SettingsPanel`] and a [`SettingsView`]. Key presses
//! become [`PanelEvent`]s, the loop applies them to the panel and re-syncs
//! the view. This terminal host also stands in for the external builders and
//! the confirmation dialog.

pub mod component;
pub mod settings_view;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::editor::{ConfirmAction, EditorRequest};
use crate::migration::MigrationOutcome;
use crate::panel::SettingsPanel;
use crate::store::{CustomItemStore, PreferenceStore};

pub use component::{Component, PanelEvent};
pub use settings_view::SettingsView;
pub use theme::Theme;

/// Setup terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop.
pub async fn run_panel<S>(
    panel: &mut SettingsPanel<S>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    theme: &Theme,
) -> Result<()>
where
    S: PreferenceStore + CustomItemStore,
{
    let mut view = SettingsView::new(panel.state());

    loop {
        terminal.draw(|f| {
            let area = f.area();
            view.render(f, area, theme);
        })?;

        // Poll for events with 100ms timeout
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            // Resize and mouse events only need a redraw
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let Some(panel_event) = view.handle_input(key) else {
            continue;
        };
        if panel_event == PanelEvent::Quit {
            break;
        }

        if let Err(e) = apply_event(panel, &mut view, panel_event).await {
            tracing::warn!(error = %e, "panel action failed");
            view.set_status(format!("Error: {e:#}"));
        }
        view.sync(panel.state());
    }

    Ok(())
}

/// Applies one view event to the panel, reporting progress on the status line.
async fn apply_event<S>(
    panel: &mut SettingsPanel<S>,
    view: &mut SettingsView,
    panel_event: PanelEvent,
) -> Result<()>
where
    S: PreferenceStore + CustomItemStore,
{
    match panel_event {
        PanelEvent::Selected { kind, id } => {
            panel.select(kind, &id).await?;
            view.set_status(format!("{} set to {id}", kind.display_name()));
        }
        PanelEvent::Add(kind) => {
            let request = panel.request_add(kind);
            open_builder(panel, view, &request).await?;
        }
        PanelEvent::Edit(kind) => {
            if let Some(request) = panel.request_edit(kind) {
                open_builder(panel, view, &request).await?;
            } else {
                view.set_status(format!("Built-in {}s cannot be edited", kind.noun()));
            }
        }
        PanelEvent::Delete(kind) => {
            if let Some(request) = panel.request_delete(kind) {
                view.prompt(request);
            } else {
                view.set_status(format!("Built-in {}s cannot be deleted", kind.noun()));
            }
        }
        PanelEvent::Confirmed { action, target_id } => {
            delete_confirmed(panel, view, action, &target_id).await?;
        }
        PanelEvent::Migrate => match panel.migrate().await {
            MigrationOutcome::Succeeded => view.set_status("Legacy settings copied"),
            MigrationOutcome::Failed => view.set_status("Migration failed, see log"),
        },
        PanelEvent::Quit => {}
    }
    Ok(())
}

/// Terminal stand-in for the theme and key builders.
///
/// Create mode adds a custom item with a generated name; edit mode has
/// nothing to change from a terminal and only reports the target.
async fn open_builder<S>(
    panel: &mut SettingsPanel<S>,
    view: &mut SettingsView,
    request: &EditorRequest,
) -> Result<()>
where
    S: PreferenceStore + CustomItemStore,
{
    let (EditorRequest::ThemeBuilder {
        edit_mode,
        current_id,
    }
    | EditorRequest::KeyBuilder {
        edit_mode,
        current_id,
    }) = request
    else {
        return Ok(());
    };
    let kind = request.kind();

    if *edit_mode {
        let target = current_id.as_deref().unwrap_or("-");
        view.set_status(format!(
            "Editing {target}: use the Newt {} builder",
            kind.noun()
        ));
        return Ok(());
    }

    let count = panel.state().domain(kind).control.options.len();
    let name = format!("Custom {} {}", kind.noun(), count + 1);
    let item = panel.store().add_custom(kind, &name)?;
    panel.editor_completed(kind).await?;
    view.set_status(format!("Created {} ({})", item.name, item.id));
    Ok(())
}

async fn delete_confirmed<S>(
    panel: &mut SettingsPanel<S>,
    view: &mut SettingsView,
    action: ConfirmAction,
    target_id: &str,
) -> Result<()>
where
    S: PreferenceStore + CustomItemStore,
{
    let kind = action.kind();
    let removed = panel.store().remove_custom(kind, target_id)?;
    panel.editor_completed(kind).await?;
    view.set_status(format!("Deleted {}", removed.name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, ItemKind, PreferenceKey};
    use crate::store::MemoryStore;
    use std::sync::Arc;

    async fn panel(store: MemoryStore) -> (SettingsPanel<MemoryStore>, SettingsView) {
        let panel = SettingsPanel::open(Arc::new(store)).await.unwrap();
        let view = SettingsView::new(panel.state());
        (panel, view)
    }

    #[tokio::test]
    async fn test_add_creates_item_of_focused_kind() {
        let (mut panel, mut view) = panel(MemoryStore::new()).await;

        apply_event(&mut panel, &mut view, PanelEvent::Add(ItemKind::Shortcuts))
            .await
            .unwrap();

        let options = &panel.state().shortcuts.control.options;
        let created = options.last().unwrap();
        assert!(created.is_custom());
        assert!(created.id.starts_with("customkey-"));
        assert_eq!(created.name, "Custom key 4");
        assert!(panel.state().theme.control.options.iter().all(|item| !item.is_custom()));
        assert!(view.status().unwrap().starts_with("Created Custom key 4"));
    }

    #[tokio::test]
    async fn test_edit_builtin_only_reports() {
        let (mut panel, mut view) = panel(MemoryStore::new()).await;

        apply_event(&mut panel, &mut view, PanelEvent::Edit(ItemKind::Theme))
            .await
            .unwrap();
        assert_eq!(view.status(), Some("Built-in themes cannot be edited"));
    }

    #[tokio::test]
    async fn test_edit_custom_leaves_store_untouched() {
        let store = MemoryStore::new()
            .with_customs(ItemKind::Theme, vec![Item::custom("customtheme-7", "Sunset")])
            .with_selection(PreferenceKey::SelectedTheme, "customtheme-7");
        let (mut panel, mut view) = panel(store).await;

        apply_event(&mut panel, &mut view, PanelEvent::Edit(ItemKind::Theme))
            .await
            .unwrap();
        assert_eq!(
            view.status(),
            Some("Editing customtheme-7: use the Newt theme builder")
        );
        assert_eq!(panel.state().theme.control.options.len(), 4);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refreshes_domain() {
        let store = MemoryStore::new()
            .with_customs(ItemKind::Theme, vec![Item::custom("customtheme-7", "Sunset")])
            .with_selection(PreferenceKey::SelectedTheme, "customtheme-7");
        let (mut panel, mut view) = panel(store).await;

        apply_event(&mut panel, &mut view, PanelEvent::Delete(ItemKind::Theme))
            .await
            .unwrap();
        assert!(view.is_prompting());

        apply_event(
            &mut panel,
            &mut view,
            PanelEvent::Confirmed {
                action: ConfirmAction::DeleteTheme,
                target_id: "customtheme-7".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(panel.selected(ItemKind::Theme), Some("theme-light"));
        assert_eq!(view.status(), Some("Deleted Sunset"));
    }
}
