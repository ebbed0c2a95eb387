//! Selection binder: keeps one selection control in sync with one preference key.
//!
//! Reads flow store -> reconciler -> control, writes flow control -> store,
//! and affordances are re-derived after every write. The binder never caches
//! authoritative state across a refresh: `initialize` and `refresh` rebuild
//! everything from the store.

use std::sync::Arc;

use serde::Serialize;

use crate::affordance::{derive_affordances, Affordances};
use crate::error::{SettingsError, SettingsResult};
use crate::models::{Item, ItemKind};
use crate::reconcile::{find_duplicate, merge, resolve_selection, Resolution};
use crate::store::PreferenceStore;

/// Lifecycle of a preference domain while the panel is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainState {
    /// Constructed, not yet read from the store
    #[default]
    Uninitialized,
    /// Control, selection and affordances are consistent
    Ready,
}

/// State of a drop-down style selection control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionControl {
    /// Options in display order (the merged list)
    pub options: Vec<Item>,
    /// Id of the selected option
    pub value: Option<String>,
}

impl SelectionControl {
    /// Returns true if an option with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.options.iter().any(|item| item.id == id)
    }

    /// Index of the selected option.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        let value = self.value.as_deref()?;
        self.options.iter().position(|item| item.id == value)
    }
}

/// How `initialize` or `refresh` settled the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Stored selection was valid and is shown
    Kept(String),
    /// Stored selection was missing or stale; the first entry was persisted
    FellBack {
        /// Stale id, if one was stored
        missing: Option<String>,
        /// Id now selected and stored
        selected: String,
    },
    /// No items available; nothing is selected
    Empty,
}

/// Binds one selection control to the preference key of one [`ItemKind`].
#[derive(Debug)]
pub struct SelectionBinder<S> {
    store: Arc<S>,
    kind: ItemKind,
    state: DomainState,
    control: SelectionControl,
    customs: Vec<Item>,
    affordances: Affordances,
}

impl<S: PreferenceStore> SelectionBinder<S> {
    /// Creates an uninitialized binder.
    pub fn new(store: Arc<S>, kind: ItemKind) -> Self {
        Self {
            store,
            kind,
            state: DomainState::Uninitialized,
            control: SelectionControl::default(),
            customs: Vec::new(),
            affordances: Affordances::NONE,
        }
    }

    /// Domain of this binder.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Lifecycle state.
    pub fn state(&self) -> DomainState {
        self.state
    }

    /// Current control state.
    pub fn control(&self) -> &SelectionControl {
        &self.control
    }

    /// Current affordances.
    pub fn affordances(&self) -> Affordances {
        self.affordances
    }

    /// Selected id, if any.
    pub fn selected(&self) -> Option<&str> {
        self.control.value.as_deref()
    }

    /// Loads items and the stored selection, then populates the control.
    ///
    /// A stale or missing stored selection falls back to the first entry of
    /// the merged list and the fallback is persisted. Nothing is modified if
    /// any store read fails or if two items share an id.
    pub async fn initialize(&mut self) -> SettingsResult<SelectionOutcome> {
        let key = self.kind.preference_key();
        let lists = self.store.get(self.kind).await?;
        let merged = merge(&lists.builtins, &lists.customs);

        if let Some(id) = find_duplicate(&merged) {
            return Err(SettingsError::DuplicateIdentifier {
                kind: self.kind,
                id: id.to_string(),
            });
        }

        let stored = self.store.get_selection(key).await?;
        let resolution = resolve_selection(&merged, stored.as_deref());

        if let Resolution::Fallback { missing, chosen } = &resolution {
            tracing::warn!(
                kind = %self.kind,
                missing = ?missing,
                fallback = %chosen,
                "stored selection not available, falling back to first entry"
            );
            self.store.set_selection(key, chosen).await?;
        }

        self.control = SelectionControl {
            options: merged,
            value: resolution.selected().map(str::to_string),
        };
        self.customs = lists.customs;
        self.rederive();
        self.state = DomainState::Ready;

        tracing::debug!(
            kind = %self.kind,
            options = self.control.options.len(),
            selected = ?self.control.value,
            "selection control initialized"
        );

        Ok(match resolution {
            Resolution::Matched(id) => SelectionOutcome::Kept(id),
            Resolution::Fallback { missing, chosen } => SelectionOutcome::FellBack {
                missing,
                selected: chosen,
            },
            Resolution::Empty => SelectionOutcome::Empty,
        })
    }

    /// Applies a selection made in the control.
    ///
    /// The value must be one of the control's options. The store is written
    /// first; the control and affordances only change once the write
    /// succeeded, so a failed write leaves them as they were.
    pub async fn on_change(&mut self, new_value: &str) -> SettingsResult<Affordances> {
        if !self.control.contains(new_value) {
            return Err(SettingsError::MissingReference {
                kind: self.kind,
                id: new_value.to_string(),
            });
        }

        self.store
            .set_selection(self.kind.preference_key(), new_value)
            .await?;

        self.control.value = Some(new_value.to_string());
        self.rederive();

        tracing::debug!(kind = %self.kind, selected = new_value, "selection changed");
        Ok(self.affordances)
    }

    /// Rebuilds the control from the store and re-persists the selection.
    ///
    /// Used after items were added, edited or deleted elsewhere. The stored
    /// selection always references an existing item afterwards.
    pub async fn refresh(&mut self) -> SettingsResult<SelectionOutcome> {
        let outcome = self.initialize().await?;

        if let SelectionOutcome::Kept(id) = &outcome {
            self.store
                .set_selection(self.kind.preference_key(), id)
                .await?;
        }

        Ok(outcome)
    }

    fn rederive(&mut self) {
        self.affordances = derive_affordances(self.kind, self.selected(), &self.customs);
    }
}
