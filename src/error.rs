//! Error types shared by the organizer, the move log and undo.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while sorting a directory or undoing a sort.
#[derive(Error, Debug)]
pub enum OrganizeError {
    /// The target path does not exist or is not a directory.
    #[error("'{}' is not a valid directory", path.display())]
    NotADirectory { path: PathBuf },

    /// The target directory could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a category directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to move a file.
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The move log exists but could not be read.
    #[error("Failed to read move log {}: {source}", path.display())]
    LogReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The move log exists but does not hold a valid session stack.
    #[error("Move log {} is corrupted: {reason}", path.display())]
    CorruptedLog { path: PathBuf, reason: String },

    /// The move log could not be written or removed.
    #[error("Failed to write move log {}: {source}", path.display())]
    LogWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A move failed and the moves completed before it could not be logged.
    #[error(
        "{source}; the {moved} file(s) already moved were not recorded in the move log and cannot be undone ({log_error})"
    )]
    UnrecordedMoves {
        moved: usize,
        #[source]
        source: Box<OrganizeError>,
        log_error: Box<OrganizeError>,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl OrganizeError {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            OrganizeError::NotADirectory { .. } => 3,
            OrganizeError::CorruptedLog { .. } => 4,
            _ => 1,
        }
    }
}

/// Result type for organize and undo operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;
