//! Error taxonomy.
//!
//! Two tiers:
//! - [`ConfigError`] is fatal. The binary prints it and exits non-zero.
//! - [`EntryError`] covers a single directory or file. It is logged, recorded
//!   in the report as a [`Failure`](crate::report::Failure), and the run
//!   moves on to the next entry.
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal configuration errors, detected before anything is written.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error: Specify the path to the source directory.")]
    MissingSource,

    #[error("Path does not exist or is not a directory: {}", .path.display())]
    InvalidSource { path: PathBuf },

    #[error(
        "Destination {} is the source directory. Choose a different destination.",
        .path.display()
    )]
    DestinationIsSource { path: PathBuf },
}

/// The step that failed for a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureOperation {
    CreateDirectory,
    CopyFile,
    ReadDirectory,
}

/// Coarse classification of the underlying I/O error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    PermissionDenied,
    NotFound,
    Other,
}

impl FailureKind {
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Other,
        }
    }
}

/// A non-fatal failure on one directory or file.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("No access rights: {}", .path.display())]
    CopyDenied { path: PathBuf, source: io::Error },

    #[error("File not found: {}", .path.display())]
    CopyNotFound { path: PathBuf, source: io::Error },

    #[error("Error while copying {}: {source}", .path.display())]
    Copy { path: PathBuf, source: io::Error },

    #[error("No access to directory: {}", .path.display())]
    ReadDirDenied { path: PathBuf, source: io::Error },

    #[error("Directory not found: {}", .path.display())]
    ReadDirNotFound { path: PathBuf, source: io::Error },

    #[error("Reading error {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
}

impl EntryError {
    /// Copying `path` failed.
    pub fn copy(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match FailureKind::from_io(&source) {
            FailureKind::PermissionDenied => Self::CopyDenied { path, source },
            FailureKind::NotFound => Self::CopyNotFound { path, source },
            FailureKind::Other => Self::Copy { path, source },
        }
    }

    /// Listing the directory `path` failed.
    pub fn read_dir(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match FailureKind::from_io(&source) {
            FailureKind::PermissionDenied => Self::ReadDirDenied { path, source },
            FailureKind::NotFound => Self::ReadDirNotFound { path, source },
            FailureKind::Other => Self::ReadDir { path, source },
        }
    }

    /// Creating the directory `path` failed.
    pub fn create_dir(path: &Path, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::CopyDenied { path, .. }
            | Self::CopyNotFound { path, .. }
            | Self::Copy { path, .. }
            | Self::ReadDirDenied { path, .. }
            | Self::ReadDirNotFound { path, .. }
            | Self::ReadDir { path, .. }
            | Self::CreateDir { path, .. } => path,
        }
    }

    pub fn operation(&self) -> FailureOperation {
        match self {
            Self::CopyDenied { .. } | Self::CopyNotFound { .. } | Self::Copy { .. } => {
                FailureOperation::CopyFile
            }
            Self::ReadDirDenied { .. } | Self::ReadDirNotFound { .. } | Self::ReadDir { .. } => {
                FailureOperation::ReadDirectory
            }
            Self::CreateDir { .. } => FailureOperation::CreateDirectory,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::CopyDenied { source, .. }
            | Self::CopyNotFound { source, .. }
            | Self::Copy { source, .. }
            | Self::ReadDirDenied { source, .. }
            | Self::ReadDirNotFound { source, .. }
            | Self::ReadDir { source, .. }
            | Self::CreateDir { source, .. } => FailureKind::from_io(source),
        }
    }
}

/// Errors writing the JSON report or the CSV manifest.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV manifest: {0}")]
    Csv(#[from] csv::Error),
}
