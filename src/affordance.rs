//! Edit/delete affordances gated on the origin of the current selection.

use serde::Serialize;

use crate::models::{Item, ItemKind};
use crate::reconcile::is_custom;

/// Actions available for the current selection of one domain.
///
/// Adding is always available and therefore not tracked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Affordances {
    /// Selected item can be opened in its builder for editing
    pub can_edit: bool,
    /// Selected item can be deleted
    pub can_delete: bool,
}

impl Affordances {
    /// No actions (built-in or missing selection).
    pub const NONE: Self = Self {
        can_edit: false,
        can_delete: false,
    };

    /// Edit and delete (custom selection).
    pub const ALL: Self = Self {
        can_edit: true,
        can_delete: true,
    };
}

/// Derives the affordances for a selection.
///
/// Both actions are available iff the selected id is one of `customs`.
/// A built-in selection never exposes destructive actions.
#[must_use]
pub fn derive_affordances(kind: ItemKind, selected: Option<&str>, customs: &[Item]) -> Affordances {
    let custom = selected.is_some_and(|id| is_custom(id, customs));
    tracing::trace!(%kind, ?selected, custom, "derived affordances");

    if custom {
        Affordances::ALL
    } else {
        Affordances::NONE
    }
}
