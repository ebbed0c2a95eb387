//! Shared CLI error type and exit codes.

use crate::error::{SettingsError, StoreError};
use crate::models::ItemKind;

/// Process exit codes used by CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input: unknown id, invalid name, built-in target
    ValidationError = 1,
    /// Store could not be read or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands, carrying its exit code.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    message: String,
    exit_code: ExitCode,
}

impl CliError {
    /// Invalid user input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationError,
        }
    }

    /// Storage or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::IoError,
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::StoreUnavailable(inner) => inner.into(),
            other => Self::validation(other.to_string()),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownItem { .. } => Self::validation(err.to_string()),
            other => Self::io(other.to_string()),
        }
    }
}

/// Result alias for CLI commands.
pub type CliResult<T> = std::result::Result<T, CliError>;

/// Domain argument accepted on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// Themes
    Theme,
    /// Keyboard-shortcut profiles
    Keys,
}

impl From<KindArg> for ItemKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Theme => ItemKind::Theme,
            KindArg::Keys => ItemKind::Shortcuts,
        }
    }
}
