//! Terminal rendering of the settings panel.
//!
//! The view is a projection of [`PanelState`] plus a little view-only state
//! (focus, status line, open confirmation prompt). It never talks to the
//! store; user intent leaves as [`PanelEvent`]s.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::component::{Component, PanelEvent};
use super::Theme;
use crate::editor::{ConfirmAction, EditorRequest};
use crate::migration::CONFIRMATION_MESSAGE;
use crate::models::ItemKind;
use crate::panel::{DomainView, PanelState};

/// Explanation shown above the migration action.
const MIGRATION_NOTE: &str = "All Newt settings (preferences and custom themes) are stored in synced \
storage, so a change here reaches your other computers within about a minute. Settings from the \
first computer used after the update were copied over automatically and the old settings were left \
intact. To copy the old settings of this computer instead, press m.";

/// Confirmation prompt waiting for y/n.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingConfirm {
    message: String,
    action: ConfirmAction,
    target_id: String,
}

/// View state of the settings panel.
#[derive(Debug, Clone)]
pub struct SettingsView {
    state: PanelState,
    focus: ItemKind,
    status: Option<String>,
    pending: Option<PendingConfirm>,
}

impl SettingsView {
    /// Creates a view of the given panel state with the theme row focused.
    #[must_use]
    pub fn new(state: PanelState) -> Self {
        Self {
            state,
            focus: ItemKind::Theme,
            status: None,
            pending: None,
        }
    }

    /// Replaces the projected panel state.
    pub fn sync(&mut self, state: PanelState) {
        self.state = state;
    }

    /// Domain that receives navigation keys.
    #[must_use]
    pub fn focus(&self) -> ItemKind {
        self.focus
    }

    /// Sets the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Opens a confirmation prompt. Other requests are ignored.
    pub fn prompt(&mut self, request: EditorRequest) {
        if let EditorRequest::Confirm {
            message,
            action,
            target_id,
        } = request
        {
            self.pending = Some(PendingConfirm {
                message,
                action,
                target_id,
            });
        }
    }

    /// Whether a confirmation prompt is open.
    #[must_use]
    pub fn is_prompting(&self) -> bool {
        self.pending.is_some()
    }

    fn focused(&self) -> &DomainView {
        self.state.domain(self.focus)
    }

    fn move_selection(&self, forward: bool) -> Option<PanelEvent> {
        let view = self.focused();
        let options = &view.control.options;
        if options.is_empty() {
            return None;
        }

        let current = view.control.selected_index();
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(index), true) => (index + 1).min(options.len() - 1),
            (Some(index), false) => index.saturating_sub(1),
        };

        if current == Some(next) {
            return None;
        }

        Some(PanelEvent::Selected {
            kind: self.focus,
            id: options[next].id.clone(),
        })
    }

    fn handle_prompt_input(&mut self, key: KeyEvent) -> Option<PanelEvent> {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                let pending = self.pending.take()?;
                Some(PanelEvent::Confirmed {
                    action: pending.action,
                    target_id: pending.target_id,
                })
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.pending = None;
                self.set_status("Delete cancelled");
                None
            }
            _ => None,
        }
    }

    fn render_domain(&self, f: &mut Frame, area: Rect, view: &DomainView, theme: &Theme) {
        let focused = view.kind == self.focus;

        let mut actions = vec![Span::raw(" [a] add ")];
        if view.affordances.can_edit {
            actions.push(Span::raw("[e] edit "));
        }
        if view.affordances.can_delete {
            actions.push(Span::styled("[d] delete ", Style::default().fg(theme.danger)));
        }

        let mut title = vec![Span::styled(
            format!(" {} ", view.kind.display_name()),
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )];
        title.extend(actions);

        let border_style = if focused {
            Style::default().fg(theme.focus)
        } else {
            Style::default().fg(theme.muted)
        };

        let items: Vec<ListItem> = view
            .control
            .options
            .iter()
            .map(|item| {
                let marker = if item.is_custom() {
                    Span::styled("* ", Style::default().fg(theme.custom_marker))
                } else {
                    Span::raw("  ")
                };
                ListItem::new(Line::from(vec![
                    marker,
                    Span::styled(item.name.as_str(), Style::default().fg(theme.text)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(Line::from(title)),
            )
            .highlight_style(
                Style::default()
                    .fg(theme.focus)
                    .bg(theme.selection_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default().with_selected(view.control.selected_index());
        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_migration(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines = vec![Line::from(Span::styled(
            MIGRATION_NOTE,
            Style::default().fg(theme.muted),
        ))];
        if self.state.migration_confirmed {
            lines.push(Line::from(Span::styled(
                CONFIRMATION_MESSAGE,
                Style::default()
                    .fg(theme.confirmation)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Sync "));
        f.render_widget(paragraph, area);
    }

    fn render_prompt(&self, f: &mut Frame, area: Rect, pending: &PendingConfirm, theme: &Theme) {
        let width = area.width.min(60);
        let height = 5.min(area.height);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        let text = vec![
            Line::from(pending.message.as_str()),
            Line::from(Span::styled(
                "y: delete  |  n: cancel",
                Style::default().fg(theme.muted),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.danger))
                    .title(" Confirm "),
            );

        f.render_widget(Clear, popup);
        f.render_widget(paragraph, popup);
    }
}

impl Component for SettingsView {
    type Event = PanelEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<PanelEvent> {
        // A status message lasts until the next key press
        self.status = None;

        if self.pending.is_some() {
            return self.handle_prompt_input(key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(PanelEvent::Quit),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    ItemKind::Theme => ItemKind::Shortcuts,
                    ItemKind::Shortcuts => ItemKind::Theme,
                };
                None
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char('a') => Some(PanelEvent::Add(self.focus)),
            KeyCode::Char('e') => Some(PanelEvent::Edit(self.focus)),
            KeyCode::Char('d') => Some(PanelEvent::Delete(self.focus)),
            KeyCode::Char('m') => Some(PanelEvent::Migrate),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let background = Block::default().style(Style::default().bg(theme.background));
        f.render_widget(background, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(5),    // Theme
                Constraint::Min(5),    // Keyboard shortcuts
                Constraint::Length(9), // Sync note
                Constraint::Length(1), // Status / help
            ])
            .split(area);

        let title = Paragraph::new("Settings")
            .style(
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        self.render_domain(f, chunks[1], &self.state.theme, theme);
        self.render_domain(f, chunks[2], &self.state.shortcuts, theme);
        self.render_migration(f, chunks[3], theme);

        let help = self.status.clone().unwrap_or_else(|| {
            "↑↓: Select  |  Tab: Switch  |  a/e/d: Add/Edit/Delete  |  m: Migrate  |  q: Quit"
                .to_string()
        });
        f.render_widget(
            Paragraph::new(help)
                .style(Style::default().fg(theme.muted))
                .alignment(Alignment::Center),
            chunks[4],
        );

        if let Some(pending) = &self.pending {
            self.render_prompt(f, area, pending, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, PreferenceKey};
    use crate::panel::SettingsPanel;
    use crate::store::MemoryStore;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render_to_string(view: &SettingsView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                view.render(f, area, &Theme::dark());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    async fn panel_with_custom_theme(selected: &str) -> SettingsPanel<MemoryStore> {
        let store = MemoryStore::new()
            .with_customs(ItemKind::Theme, vec![Item::custom("customtheme-7", "Sunset")])
            .with_selection(PreferenceKey::SelectedTheme, selected);
        SettingsPanel::open(Arc::new(store)).await.unwrap()
    }

    #[tokio::test]
    async fn test_builtin_selection_hides_edit_and_delete() {
        let panel = panel_with_custom_theme("theme-dark").await;
        let output = render_to_string(&SettingsView::new(panel.state()));

        assert!(output.contains("Settings"));
        assert!(output.contains("Sunset"));
        assert!(output.contains("[a] add"));
        assert!(!output.contains("[e] edit"));
        assert!(!output.contains("[d] delete"));
    }

    #[tokio::test]
    async fn test_custom_selection_shows_edit_and_delete() {
        let panel = panel_with_custom_theme("customtheme-7").await;
        let output = render_to_string(&SettingsView::new(panel.state()));

        assert!(output.contains("[e] edit"));
        assert!(output.contains("[d] delete"));
    }

    #[tokio::test]
    async fn test_confirmation_rendered_after_migration() {
        let mut panel = panel_with_custom_theme("theme-dark").await;
        let mut view = SettingsView::new(panel.state());
        assert!(!render_to_string(&view).contains("Successfully migrated"));

        panel.migrate().await;
        view.sync(panel.state());
        assert!(render_to_string(&view).contains("Successfully migrated"));
    }

    #[tokio::test]
    async fn test_navigation_emits_selection() {
        let panel = panel_with_custom_theme("theme-dark").await;
        let mut view = SettingsView::new(panel.state());

        assert_eq!(
            view.handle_input(key(KeyCode::Down)),
            Some(PanelEvent::Selected {
                kind: ItemKind::Theme,
                id: "theme-solarized".to_string()
            })
        );
        assert_eq!(
            view.handle_input(key(KeyCode::Up)),
            Some(PanelEvent::Selected {
                kind: ItemKind::Theme,
                id: "theme-light".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_navigation_stops_at_ends() {
        let panel = panel_with_custom_theme("theme-light").await;
        let mut view = SettingsView::new(panel.state());
        assert_eq!(view.handle_input(key(KeyCode::Up)), None);
    }

    #[tokio::test]
    async fn test_tab_switches_focus() {
        let panel = panel_with_custom_theme("theme-light").await;
        let mut view = SettingsView::new(panel.state());

        assert_eq!(view.handle_input(key(KeyCode::Tab)), None);
        assert_eq!(view.focus(), ItemKind::Shortcuts);
        assert_eq!(
            view.handle_input(key(KeyCode::Char('a'))),
            Some(PanelEvent::Add(ItemKind::Shortcuts))
        );
    }

    #[tokio::test]
    async fn test_status_cleared_by_next_key() {
        let panel = panel_with_custom_theme("theme-light").await;
        let mut view = SettingsView::new(panel.state());
        view.set_status("Theme set to theme-light");
        assert!(render_to_string(&view).contains("Theme set to theme-light"));

        assert_eq!(view.handle_input(key(KeyCode::Tab)), None);
        assert_eq!(view.status(), None);
        let output = render_to_string(&view);
        assert!(!output.contains("Theme set to theme-light"));
        assert!(output.contains("q: Quit"));
    }

    #[tokio::test]
    async fn test_prompt_confirm_and_cancel() {
        let panel = panel_with_custom_theme("customtheme-7").await;
        let mut view = SettingsView::new(panel.state());
        let request = panel.request_delete(ItemKind::Theme).unwrap();

        view.prompt(request.clone());
        assert!(view.is_prompting());
        assert!(render_to_string(&view).contains("Are you sure you want to delete this theme?"));
        // Navigation is swallowed while prompting
        assert_eq!(view.handle_input(key(KeyCode::Down)), None);
        assert_eq!(view.handle_input(key(KeyCode::Char('n'))), None);
        assert!(!view.is_prompting());
        assert_eq!(view.status(), Some("Delete cancelled"));

        view.prompt(request);
        assert_eq!(
            view.handle_input(key(KeyCode::Char('y'))),
            Some(PanelEvent::Confirmed {
                action: ConfirmAction::DeleteTheme,
                target_id: "customtheme-7".to_string()
            })
        );
    }
}
