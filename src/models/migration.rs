//! Migration status of the legacy-to-synced preference copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version written by the current migration routine.
///
/// A store whose record is below this version runs the implicit first-run
/// migration.
pub const CURRENT_MIGRATION_VERSION: u32 = 1;

/// Persistent record of the legacy-to-synced migration.
///
/// Created implicitly on first run, never destroyed, and only updated by a
/// successful migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MigrationRecord {
    /// Migration version applied (0 = never migrated)
    #[serde(default)]
    pub version: u32,
    /// Time of the most recent successful migration
    #[serde(default)]
    pub migrated_at: Option<DateTime<Utc>>,
    /// Number of successful migration runs
    #[serde(default)]
    pub runs: u32,
}

impl MigrationRecord {
    /// Returns true if the current migration version has been applied.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.version >= CURRENT_MIGRATION_VERSION
    }

    /// Marks a successful migration run.
    pub fn mark_migrated(&mut self, at: DateTime<Utc>) {
        self.version = CURRENT_MIGRATION_VERSION;
        self.migrated_at = Some(at);
        self.runs = self.runs.saturating_add(1);
    }
}

/// Terminal result of a successful store migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
    /// Legacy data was copied into the synced store
    Migrated {
        /// Number of custom items copied from the legacy store
        items_copied: usize,
        /// Number of selections copied from the legacy store
        selections_copied: usize,
    },
    /// Nothing to do; the record is already current
    AlreadyCurrent,
}
