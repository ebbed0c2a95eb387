//! Component trait pattern for TUI components.
//!
//! Components own only view state. Anything that has to reach the store is
//! emitted as an event and applied by the event loop.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::editor::ConfirmAction;
use crate::models::ItemKind;
use crate::tui::Theme;

/// A component that can be rendered and handle input.
pub trait Component {
    /// Event type this component can emit
    type Event;

    /// Handle keyboard input.
    ///
    /// Returns `Some(Event)` if the component wants to signal something to the parent.
    /// Returns `None` if input was handled internally without needing parent action.
    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event>;

    /// Render the component within the provided area.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Events emitted by the settings panel view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// User moved the selection of a domain
    Selected {
        /// Domain changed
        kind: ItemKind,
        /// Newly selected id
        id: String,
    },
    /// User asked to build a new item
    Add(ItemKind),
    /// User asked to edit the selected item
    Edit(ItemKind),
    /// User asked to delete the selected item
    Delete(ItemKind),
    /// User accepted a confirmation prompt
    Confirmed {
        /// Confirmed action
        action: ConfirmAction,
        /// Item the action applies to
        target_id: String,
    },
    /// User triggered the legacy migration
    Migrate,
    /// User quit the panel
    Quit,
}
