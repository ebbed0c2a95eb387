//! Error types for the settings core and its preference stores.

use std::path::PathBuf;

use crate::models::ItemKind;

/// Errors reported by a [`PreferenceStore`](crate::store::PreferenceStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing a backing file failed
    #[error("failed to access {path}: {source}")]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// A backing document could not be parsed or serialized
    #[error("invalid preference document {path}: {source}")]
    Parse {
        /// Document that failed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
    /// A legacy local-storage value was not in the expected format
    #[error("legacy value for {key} is malformed: {source}")]
    LegacyFormat {
        /// Legacy key holding the bad value
        key: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
    /// A legacy custom item reuses the id of a built-in item
    #[error("legacy custom {kind} item {id} has the id of a built-in item")]
    LegacyConflict {
        /// Kind of the conflicting item
        kind: ItemKind,
        /// Shared id
        id: String,
    },
    /// The item to modify does not exist or is not a custom item
    #[error("no custom {kind} item with id {id}")]
    UnknownItem {
        /// Kind searched
        kind: ItemKind,
        /// Requested id
        id: String,
    },
    /// The store is temporarily unable to serve the request
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the settings core.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A selection referenced an id that is not in the merged list
    #[error("{kind} selection {id} is not in the list of available items")]
    MissingReference {
        /// Domain of the selection
        kind: ItemKind,
        /// Unknown id
        id: String,
    },
    /// The preference store failed
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
    /// Two items of one kind share an id
    #[error("duplicate {kind} id {id} across built-in and custom items")]
    DuplicateIdentifier {
        /// Domain containing the duplicate
        kind: ItemKind,
        /// Duplicated id
        id: String,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result alias for settings-core operations.
pub type SettingsResult<T> = std::result::Result<T, SettingsError>;
