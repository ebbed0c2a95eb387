//! Data models for selectable items, preference keys, and migration status.
//!
//! This module contains the data structures shared by the reconciler, the
//! selection binders, and the preference stores. Models are independent of
//! rendering and of any particular storage engine.

pub mod catalog;
pub mod item;
pub mod migration;

// Re-export all model types
pub use item::{Item, ItemKind, ItemLists, Origin, PreferenceKey};
pub use migration::{MigrationRecord, MigrationStatus, CURRENT_MIGRATION_VERSION};
