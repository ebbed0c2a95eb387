//! Settings panel composition.
//!
//! The panel owns one [`SelectionBinder`] per preference domain and one
//! [`MigrationTrigger`]. All of them share the injected store. Rendering reads
//! [`PanelState`], which is a plain snapshot of the component state.

use std::sync::Arc;

use serde::Serialize;

use crate::affordance::Affordances;
use crate::binder::{DomainState, SelectionBinder, SelectionControl, SelectionOutcome};
use crate::editor::EditorRequest;
use crate::error::SettingsResult;
use crate::migration::{MigrationOutcome, MigrationTrigger};
use crate::models::ItemKind;
use crate::store::PreferenceStore;

/// Snapshot of one domain for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainView {
    /// Domain shown
    pub kind: ItemKind,
    /// Lifecycle state
    pub state: DomainState,
    /// Control options and selected value
    pub control: SelectionControl,
    /// Edit/delete availability
    pub affordances: Affordances,
}

/// Snapshot of the whole panel for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelState {
    /// Theme domain
    pub theme: DomainView,
    /// Keyboard-shortcut domain
    pub shortcuts: DomainView,
    /// Whether the migration confirmation is visible
    pub migration_confirmed: bool,
}

impl PanelState {
    /// Returns the view of a domain.
    #[must_use]
    pub fn domain(&self, kind: ItemKind) -> &DomainView {
        match kind {
            ItemKind::Theme => &self.theme,
            ItemKind::Shortcuts => &self.shortcuts,
        }
    }
}

/// The settings panel for themes and keyboard shortcuts.
#[derive(Debug)]
pub struct SettingsPanel<S> {
    store: Arc<S>,
    themes: SelectionBinder<S>,
    shortcuts: SelectionBinder<S>,
    migration: MigrationTrigger<S>,
}

impl<S: PreferenceStore> SettingsPanel<S> {
    /// Creates a panel with both domains uninitialized.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            themes: SelectionBinder::new(Arc::clone(&store), ItemKind::Theme),
            shortcuts: SelectionBinder::new(Arc::clone(&store), ItemKind::Shortcuts),
            migration: MigrationTrigger::new(Arc::clone(&store)),
            store,
        }
    }

    /// Creates a panel and initializes both domains.
    pub async fn open(store: Arc<S>) -> SettingsResult<Self> {
        let mut panel = Self::new(store);
        panel.mount().await?;
        Ok(panel)
    }

    /// Initializes both domains from the store.
    ///
    /// Domains are independent: a domain that fails stays `Uninitialized`
    /// while the other is still mounted. The first failure is returned.
    pub async fn mount(&mut self) -> SettingsResult<()> {
        let mut first_error = None;
        for kind in ItemKind::all() {
            if let Err(err) = self.binder_mut(kind).initialize().await {
                tracing::warn!(%kind, error = %err, "domain failed to initialize");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Store shared by all panel components.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the binder of a domain.
    pub fn binder(&self, kind: ItemKind) -> &SelectionBinder<S> {
        match kind {
            ItemKind::Theme => &self.themes,
            ItemKind::Shortcuts => &self.shortcuts,
        }
    }

    fn binder_mut(&mut self, kind: ItemKind) -> &mut SelectionBinder<S> {
        match kind {
            ItemKind::Theme => &mut self.themes,
            ItemKind::Shortcuts => &mut self.shortcuts,
        }
    }

    /// Selected id of a domain.
    pub fn selected(&self, kind: ItemKind) -> Option<&str> {
        self.binder(kind).selected()
    }

    /// Affordances of a domain.
    pub fn affordances(&self, kind: ItemKind) -> Affordances {
        self.binder(kind).affordances()
    }

    /// Whether the migration confirmation is visible.
    pub fn migration_confirmed(&self) -> bool {
        self.migration.confirmed()
    }

    /// Applies a selection change from the control.
    pub async fn select(&mut self, kind: ItemKind, id: &str) -> SettingsResult<Affordances> {
        self.binder_mut(kind).on_change(id).await
    }

    /// Rebuilds a domain from the store.
    pub async fn refresh(&mut self, kind: ItemKind) -> SettingsResult<SelectionOutcome> {
        self.binder_mut(kind).refresh().await
    }

    /// Called when a builder or confirmed delete finished for `kind`.
    pub async fn editor_completed(&mut self, kind: ItemKind) -> SettingsResult<SelectionOutcome> {
        tracing::debug!(%kind, "editor completed, refreshing");
        self.refresh(kind).await
    }

    /// Runs the legacy migration.
    pub async fn migrate(&mut self) -> MigrationOutcome {
        self.migration.migrate().await
    }

    /// Request for the "add" action: open the builder in create mode.
    pub fn request_add(&self, kind: ItemKind) -> EditorRequest {
        EditorRequest::builder(kind, false, self.selected(kind))
    }

    /// Request for the "edit" action; only offered for custom selections.
    pub fn request_edit(&self, kind: ItemKind) -> Option<EditorRequest> {
        if !self.affordances(kind).can_edit {
            return None;
        }
        Some(EditorRequest::builder(kind, true, self.selected(kind)))
    }

    /// Request for the "delete" action; only offered for custom selections.
    pub fn request_delete(&self, kind: ItemKind) -> Option<EditorRequest> {
        if !self.affordances(kind).can_delete {
            return None;
        }
        self.selected(kind)
            .map(|id| EditorRequest::confirm_delete(kind, id))
    }

    /// Snapshot of the panel for rendering.
    pub fn state(&self) -> PanelState {
        let view = |binder: &SelectionBinder<S>| DomainView {
            kind: binder.kind(),
            state: binder.state(),
            control: binder.control().clone(),
            affordances: binder.affordances(),
        };

        PanelState {
            theme: view(&self.themes),
            shortcuts: view(&self.shortcuts),
            migration_confirmed: self.migration.confirmed(),
        }
    }
}
