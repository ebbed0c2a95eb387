//! List reconciliation for built-in and custom items.
//!
//! These functions are pure: they build the merged list shown in a selection
//! control and decide whether an id belongs to the custom subset.

use std::collections::HashSet;

use crate::models::Item;

/// Outcome of matching a stored selection against a merged list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The stored id is present in the list
    Matched(String),
    /// The stored id is absent (or was never set); the first entry is used
    Fallback {
        /// Stored id that could not be found, if any was stored
        missing: Option<String>,
        /// First entry of the merged list
        chosen: String,
    },
    /// The merged list has no entries
    Empty,
}

impl Resolution {
    /// Returns the id the control should show, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::Matched(id) | Self::Fallback { chosen: id, .. } => Some(id),
            Self::Empty => None,
        }
    }
}

/// Merges built-in and custom items into one selectable list.
///
/// Built-ins always precede customs and each group keeps its input order.
/// Duplicate ids are kept; use [`find_duplicate`] to detect them.
///
/// # Examples
///
/// ```
/// use newt_settings::models::Item;
/// use newt_settings::reconcile::merge;
///
/// let merged = merge(
///     &[Item::builtin("theme-light", "Light")],
///     &[Item::custom("customtheme-7", "Sunset")],
/// );
/// let ids: Vec<_> = merged.iter().map(|item| item.id.as_str()).collect();
/// assert_eq!(ids, ["theme-light", "customtheme-7"]);
/// ```
#[must_use]
pub fn merge(builtins: &[Item], customs: &[Item]) -> Vec<Item> {
    builtins.iter().chain(customs).cloned().collect()
}

/// Returns true iff `id` equals the id of some custom item.
///
/// Membership is exact: an id that merely contains, or is contained in, a
/// custom id does not match.
#[must_use]
pub fn is_custom(id: &str, customs: &[Item]) -> bool {
    customs.iter().any(|item| item.id == id)
}

/// Returns the first id that occurs more than once.
#[must_use]
pub fn find_duplicate(items: &[Item]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .map(|item| item.id.as_str())
        .find(|id| !seen.insert(*id))
}

/// Matches a stored selection against a merged list.
#[must_use]
pub fn resolve_selection(merged: &[Item], stored: Option<&str>) -> Resolution {
    if let Some(id) = stored {
        if merged.iter().any(|item| item.id == id) {
            return Resolution::Matched(id.to_string());
        }
    }

    match merged.first() {
        Some(first) => Resolution::Fallback {
            missing: stored.map(str::to_string),
            chosen: first.id.clone(),
        },
        None => Resolution::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn test_merge_builtins_precede_customs() {
        let builtins = [
            Item::builtin("theme-light", "Light"),
            Item::builtin("theme-dark", "Dark"),
        ];
        let customs = [
            Item::custom("customtheme-2", "B"),
            Item::custom("customtheme-1", "A"),
        ];

        let merged = merge(&builtins, &customs);
        assert_eq!(
            ids(&merged),
            ["theme-light", "theme-dark", "customtheme-2", "customtheme-1"]
        );
    }

    #[test]
    fn test_merge_empty_groups() {
        let builtins = [Item::builtin("theme-light", "Light")];
        assert_eq!(merge(&builtins, &[]), builtins.to_vec());
        assert_eq!(merge(&[], &builtins), builtins.to_vec());
        assert!(merge(&[], &[]).is_empty());
    }

    #[test]
    fn test_is_custom_exact_match() {
        let customs = [Item::custom("customtheme-7", "Sunset")];
        assert!(is_custom("customtheme-7", &customs));
        assert!(!is_custom("theme-light", &customs));
        assert!(!is_custom("", &customs));
    }

    #[test]
    fn test_is_custom_rejects_substrings() {
        let customs = [Item::custom("customtheme-7", "Sunset")];

        // Proper substring of a custom id
        assert!(!is_custom("customtheme", &customs));
        assert!(!is_custom("customtheme-", &customs));
        // Custom id is a substring of the candidate
        assert!(!is_custom("customtheme-77", &customs));
        assert!(!is_custom("builtin-customtheme-7", &customs));
    }

    #[test]
    fn test_builtin_containing_custom_prefix_is_not_custom() {
        let customs = [Item::custom("customtheme-1", "Mine")];
        assert!(!is_custom("legacy-customtheme-classic", &customs));
    }

    #[test]
    fn test_find_duplicate() {
        let unique = [
            Item::builtin("theme-light", "Light"),
            Item::custom("customtheme-1", "Mine"),
        ];
        assert_eq!(find_duplicate(&unique), None);

        let dup = merge(
            &[Item::builtin("theme-light", "Light")],
            &[Item::custom("theme-light", "Copy")],
        );
        assert_eq!(find_duplicate(&dup), Some("theme-light"));
    }

    #[test]
    fn test_resolve_selection_matched() {
        let merged = [
            Item::builtin("theme-light", "Light"),
            Item::builtin("theme-dark", "Dark"),
        ];
        let resolution = resolve_selection(&merged, Some("theme-dark"));
        assert_eq!(resolution, Resolution::Matched("theme-dark".to_string()));
        assert_eq!(resolution.selected(), Some("theme-dark"));
    }

    #[test]
    fn test_resolve_selection_falls_back_to_first() {
        let merged = [
            Item::builtin("theme-light", "Light"),
            Item::builtin("theme-dark", "Dark"),
        ];

        assert_eq!(
            resolve_selection(&merged, Some("customtheme-9")),
            Resolution::Fallback {
                missing: Some("customtheme-9".to_string()),
                chosen: "theme-light".to_string(),
            }
        );
        assert_eq!(
            resolve_selection(&merged, None),
            Resolution::Fallback {
                missing: None,
                chosen: "theme-light".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_selection_empty_list() {
        let resolution = resolve_selection(&[], Some("theme-light"));
        assert_eq!(resolution, Resolution::Empty);
        assert_eq!(resolution.selected(), None);
    }
}
