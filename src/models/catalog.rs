//! Built-in themes and shortcut profiles bundled with the extension.

use super::{Item, ItemKind};

/// Built-in themes as `(id, name)` pairs, in display order.
pub const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("theme-light", "Light"),
    ("theme-dark", "Dark"),
    ("theme-solarized", "Solarized"),
];

/// Built-in shortcut profiles as `(id, name)` pairs, in display order.
pub const BUILTIN_KEYS: &[(&str, &str)] = &[
    ("key-default", "Default"),
    ("key-vim", "Vim"),
    ("key-emacs", "Emacs"),
];

/// Returns the bundled items for a kind.
#[must_use]
pub fn builtins(kind: ItemKind) -> Vec<Item> {
    let table = match kind {
        ItemKind::Theme => BUILTIN_THEMES,
        ItemKind::Shortcuts => BUILTIN_KEYS,
    };
    table.iter().map(|(id, name)| Item::builtin(id, name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtins_are_builtin_and_unique() {
        for kind in ItemKind::all() {
            let items = builtins(kind);
            assert!(!items.is_empty());
            assert!(items.iter().all(|item| !item.is_custom()));

            let ids: HashSet<_> = items.iter().map(|item| item.id.as_str()).collect();
            assert_eq!(ids.len(), items.len());
        }
    }

    #[test]
    fn test_builtin_ids_do_not_use_custom_prefix() {
        for kind in ItemKind::all() {
            assert!(builtins(kind)
                .iter()
                .all(|item| !item.id.starts_with(kind.custom_id_prefix())));
        }
    }
}
