//! User-initiated migration of legacy preferences into the synced store.

use std::sync::Arc;

use serde::Serialize;

use crate::models::MigrationStatus;
use crate::store::PreferenceStore;

/// Text shown once a migration has succeeded.
pub const CONFIRMATION_MESSAGE: &str = "Successfully migrated old settings from this PC!";

/// Result of one migration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MigrationOutcome {
    /// The store reported success; the confirmation is visible
    Succeeded,
    /// The store failed; nothing changed and the user may retry
    Failed,
}

/// Runs the store migration and tracks the confirmation banner.
///
/// The confirmation is only shown after the store completes, and once shown
/// it stays visible for the lifetime of the trigger.
#[derive(Debug)]
pub struct MigrationTrigger<S> {
    store: Arc<S>,
    confirmed: bool,
}

impl<S: PreferenceStore> MigrationTrigger<S> {
    /// Creates a trigger with the confirmation hidden.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            confirmed: false,
        }
    }

    /// Whether the confirmation is visible.
    pub fn confirmed(&self) -> bool {
        self.confirmed
    }

    /// Invokes the store migration.
    ///
    /// Store failures are not propagated: they are logged and reported as
    /// [`MigrationOutcome::Failed`] so the action can simply be retried.
    pub async fn migrate(&mut self) -> MigrationOutcome {
        match self.store.migrate().await {
            Ok(status) => {
                match status {
                    MigrationStatus::Migrated {
                        items_copied,
                        selections_copied,
                    } => tracing::info!(
                        items_copied,
                        selections_copied,
                        "legacy settings migrated to synced storage"
                    ),
                    MigrationStatus::AlreadyCurrent => {
                        tracing::info!("legacy settings already migrated");
                    }
                }
                self.confirmed = true;
                MigrationOutcome::Succeeded
            }
            Err(err) => {
                tracing::warn!(error = %err, "legacy settings migration failed");
                MigrationOutcome::Failed
            }
        }
    }
}
