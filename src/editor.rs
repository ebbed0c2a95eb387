//! Requests sent to the external builder and confirmation collaborators.

use serde::Serialize;

use crate::models::ItemKind;

/// Action tag attached to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfirmAction {
    /// Delete the target custom theme
    #[serde(rename = "deleteTheme")]
    DeleteTheme,
    /// Delete the target custom shortcut profile
    #[serde(rename = "deleteKey")]
    DeleteKey,
}

impl ConfirmAction {
    /// Returns the delete action for a kind.
    #[must_use]
    pub const fn delete(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Theme => Self::DeleteTheme,
            ItemKind::Shortcuts => Self::DeleteKey,
        }
    }

    /// Returns the tag the confirmation dialog dispatches on.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::DeleteTheme => "deleteTheme",
            Self::DeleteKey => "deleteKey",
        }
    }

    /// Kind of item the action targets.
    #[must_use]
    pub const fn kind(self) -> ItemKind {
        match self {
            Self::DeleteTheme => ItemKind::Theme,
            Self::DeleteKey => ItemKind::Shortcuts,
        }
    }
}

/// A request for an external editor or dialog.
///
/// When the editor finishes it reports back through
/// [`SettingsPanel::editor_completed`](crate::panel::SettingsPanel::editor_completed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EditorRequest {
    /// Open the theme builder
    ThemeBuilder {
        /// Edit `current_id` instead of creating a new theme
        edit_mode: bool,
        /// Currently selected theme id
        current_id: Option<String>,
    },
    /// Open the key builder
    KeyBuilder {
        /// Edit `current_id` instead of creating a new profile
        edit_mode: bool,
        /// Currently selected shortcut profile id
        current_id: Option<String>,
    },
    /// Ask the user to confirm a destructive action
    Confirm {
        /// Prompt text
        message: String,
        /// Action to dispatch on confirmation
        action: ConfirmAction,
        /// Item the action applies to
        target_id: String,
    },
}

impl EditorRequest {
    /// Builds the builder request for a kind.
    #[must_use]
    pub fn builder(kind: ItemKind, edit_mode: bool, current_id: Option<&str>) -> Self {
        let current_id = current_id.map(str::to_string);
        match kind {
            ItemKind::Theme => Self::ThemeBuilder {
                edit_mode,
                current_id,
            },
            ItemKind::Shortcuts => Self::KeyBuilder {
                edit_mode,
                current_id,
            },
        }
    }

    /// Builds the delete confirmation for a custom item.
    #[must_use]
    pub fn confirm_delete(kind: ItemKind, target_id: &str) -> Self {
        Self::Confirm {
            message: format!("Are you sure you want to delete this {}?", kind.noun()),
            action: ConfirmAction::delete(kind),
            target_id: target_id.to_string(),
        }
    }

    /// Kind of item the request concerns.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::ThemeBuilder { .. } => ItemKind::Theme,
            Self::KeyBuilder { .. } => ItemKind::Shortcuts,
            Self::Confirm { action, .. } => action.kind(),
        }
    }
}
