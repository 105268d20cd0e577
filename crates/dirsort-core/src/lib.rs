//! dirsort Core — traversal, classification, and placement.
//!
//! This crate contains all organizer logic with zero CLI dependencies.
//! The binary in the workspace root is a thin shell around [`Organizer`].
//!
//! # Modules
//!
//! - [`config`] — Explicit run configuration and source validation.
//! - [`bucket`] — Maps a file name to its per-extension destination folder.
//! - [`organizer`] — Directory walk and file placement.
//! - [`report`] — Structured run results, summary text and exports.
//! - [`error`] — Fatal configuration errors and per-entry failures.
pub mod bucket;
pub mod config;
pub mod error;
pub mod organizer;
pub mod report;

pub use bucket::{classify_file, FALLBACK_BUCKET};
pub use config::{OrganizeConfig, DEFAULT_DESTINATION};
pub use error::{ConfigError, EntryError, FailureKind, FailureOperation, ReportError};
pub use organizer::Organizer;
pub use report::{BucketStats, CopiedFile, Failure, OrganizeReport};
