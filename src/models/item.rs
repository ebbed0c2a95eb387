//! Selectable items (themes and shortcut profiles) and their preference keys.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of an item display name.
const MAX_NAME_LEN: usize = 50;

/// The two list-backed preference domains of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Visual themes
    Theme,
    /// Keyboard-shortcut profiles
    Shortcuts,
}

impl ItemKind {
    /// Returns both kinds in panel order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Theme, Self::Shortcuts]
    }

    /// Returns the preference key holding the selection for this kind.
    #[must_use]
    pub const fn preference_key(self) -> PreferenceKey {
        match self {
            Self::Theme => PreferenceKey::SelectedTheme,
            Self::Shortcuts => PreferenceKey::SelectedKey,
        }
    }

    /// Returns the prefix used when generating ids for new custom items.
    ///
    /// The prefix is only a naming convention. Whether an item is custom is
    /// always decided by membership in the custom list.
    #[must_use]
    pub const fn custom_id_prefix(self) -> &'static str {
        match self {
            Self::Theme => "customtheme",
            Self::Shortcuts => "customkey",
        }
    }

    /// Returns display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Theme => "Theme",
            Self::Shortcuts => "Keyboard Shortcuts",
        }
    }

    /// Returns the singular noun used in prompts ("theme", "key").
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Shortcuts => "key",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Theme => f.write_str("theme"),
            Self::Shortcuts => f.write_str("shortcuts"),
        }
    }
}

/// Keys of the list-backed preference selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PreferenceKey {
    /// Selected theme id
    #[serde(rename = "selectedTheme")]
    SelectedTheme,
    /// Selected keyboard-shortcut profile id
    #[serde(rename = "selectedKey")]
    SelectedKey,
}

impl PreferenceKey {
    /// Returns the storage name of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelectedTheme => "selectedTheme",
            Self::SelectedKey => "selectedKey",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Bundled with the application, immutable
    #[default]
    BuiltIn,
    /// Created by the user, editable and deletable
    Custom,
}

/// A selectable theme or shortcut profile.
///
/// # Validation
///
/// - ID must be non-empty and contain no whitespace
/// - Name must be non-empty, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier, unique within its kind (e.g., "theme-dark")
    pub id: String,
    /// Display label
    pub name: String,
    /// Built-in or custom
    #[serde(default)]
    pub origin: Origin,
}

impl Item {
    /// Creates a new Item with validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use newt_settings::models::{Item, Origin};
    ///
    /// let item = Item::new("customtheme-7", "Sunset", Origin::Custom).unwrap();
    /// assert_eq!(item.name, "Sunset");
    /// assert!(Item::new("", "Nameless", Origin::Custom).is_err());
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>, origin: Origin) -> Result<Self> {
        let id = id.into();
        let name = name.into();

        Self::validate_id(&id)?;
        Self::validate_name(&name)?;

        Ok(Self { id, name, origin })
    }

    /// Creates a built-in item without validation.
    #[must_use]
    pub fn builtin(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            origin: Origin::BuiltIn,
        }
    }

    /// Creates a custom item without validation.
    #[must_use]
    pub fn custom(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            origin: Origin::Custom,
        }
    }

    /// Returns true if the item was created by the user.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.origin == Origin::Custom
    }

    fn validate_id(id: &str) -> Result<()> {
        if id.is_empty() {
            anyhow::bail!("Item ID cannot be empty");
        }
        if id.chars().any(char::is_whitespace) {
            anyhow::bail!("Item ID '{id}' cannot contain whitespace");
        }
        Ok(())
    }

    /// Checks a display name without building an item.
    pub fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Item name cannot be empty");
        }
        if name.chars().count() > MAX_NAME_LEN {
            anyhow::bail!("Item name cannot exceed {MAX_NAME_LEN} characters");
        }
        Ok(())
    }
}

/// Built-in and custom items of one kind, as read from a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemLists {
    /// Items supplied by the environment, in display order
    pub builtins: Vec<Item>,
    /// User-created items, in creation order
    pub customs: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_new_valid() {
        let item = Item::new("customkey-1", "Vim-ish", Origin::Custom).unwrap();
        assert_eq!(item.id, "customkey-1");
        assert!(item.is_custom());
    }

    #[test]
    fn test_item_new_rejects_bad_input() {
        assert!(Item::new("", "Name", Origin::Custom).is_err());
        assert!(Item::new("has space", "Name", Origin::Custom).is_err());
        assert!(Item::new("ok", "   ", Origin::Custom).is_err());
        assert!(Item::new("ok", "x".repeat(51), Origin::Custom).is_err());
        assert!(Item::new("ok", "x".repeat(50), Origin::Custom).is_ok());
    }

    #[test]
    fn test_kind_keys_and_prefixes() {
        assert_eq!(ItemKind::Theme.preference_key(), PreferenceKey::SelectedTheme);
        assert_eq!(ItemKind::Shortcuts.preference_key(), PreferenceKey::SelectedKey);
        assert_eq!(ItemKind::Theme.custom_id_prefix(), "customtheme");
        assert_eq!(ItemKind::Shortcuts.custom_id_prefix(), "customkey");
    }

    #[test]
    fn test_preference_key_serde_name() {
        let json = serde_json::to_string(&PreferenceKey::SelectedKey).unwrap();
        assert_eq!(json, "\"selectedKey\"");
        assert_eq!(PreferenceKey::SelectedTheme.to_string(), "selectedTheme");
    }

    #[test]
    fn test_origin_defaults_to_builtin_when_missing() {
        let item: Item = serde_json::from_str(r#"{"id":"theme-light","name":"Light"}"#).unwrap();
        assert_eq!(item.origin, Origin::BuiltIn);
    }
}
