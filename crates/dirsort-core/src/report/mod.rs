//! Run report — the structured record of what a run copied and what failed.
//!
//! Failures are collected here as data rather than only printed, so callers
//! and tests can assert on exact paths and error kinds.
pub mod export;
pub mod summary;

use crate::config::OrganizeConfig;
use crate::error::{EntryError, FailureKind, FailureOperation};
use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::time::Duration;

/// One file duplicated into its bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedFile {
    #[serde(serialize_with = "serialize_lossy")]
    pub source: PathBuf,
    #[serde(serialize_with = "serialize_lossy")]
    pub destination: PathBuf,
    #[serde(serialize_with = "serialize_lossy")]
    pub bucket: OsString,
    pub bytes: u64,
    pub overwritten: bool,
}

/// One non-fatal failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    #[serde(serialize_with = "serialize_lossy")]
    pub path: PathBuf,
    pub operation: FailureOperation,
    pub kind: FailureKind,
    /// The message shown to the user.
    pub message: String,
}

impl From<&EntryError> for Failure {
    fn from(err: &EntryError) -> Self {
        Self {
            path: err.path().to_path_buf(),
            operation: err.operation(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// File count and byte total for a single bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketStats {
    pub file_count: u64,
    pub total_size: u64,
}

/// Everything a run did.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizeReport {
    #[serde(serialize_with = "serialize_lossy")]
    pub source: PathBuf,
    #[serde(serialize_with = "serialize_lossy")]
    pub destination: PathBuf,
    pub started_at: DateTime<Local>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// Directories walked, the source root included.
    pub directories_visited: u64,
    pub files_copied: u64,
    pub bytes_copied: u64,
    /// Copies that replaced a file of the same name already in the bucket.
    pub files_overwritten: u64,
    /// Entries that were neither files nor directories.
    pub entries_skipped: u64,
    #[serde(serialize_with = "serialize_bucket_map")]
    pub buckets: BTreeMap<OsString, BucketStats>,
    pub copied: Vec<CopiedFile>,
    pub failures: Vec<Failure>,
}

impl OrganizeReport {
    pub fn new(config: &OrganizeConfig) -> Self {
        Self {
            source: config.source.clone(),
            destination: config.destination.clone(),
            started_at: Local::now(),
            elapsed: Duration::ZERO,
            directories_visited: 0,
            files_copied: 0,
            bytes_copied: 0,
            files_overwritten: 0,
            entries_skipped: 0,
            buckets: BTreeMap::new(),
            copied: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn record_copy(&mut self, copied: CopiedFile) {
        let stats = self.buckets.entry(copied.bucket.clone()).or_default();
        stats.file_count += 1;
        stats.total_size += copied.bytes;

        self.files_copied += 1;
        self.bytes_copied += copied.bytes;
        if copied.overwritten {
            self.files_overwritten += 1;
        }
        self.copied.push(copied);
    }

    pub fn record_failure(&mut self, err: &EntryError) {
        self.failures.push(Failure::from(err));
    }

    /// `true` when nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Buckets sorted by total size descending, ties broken by name.
    pub fn buckets_by_size(&self) -> Vec<(&OsString, &BucketStats)> {
        let mut buckets: Vec<_> = self.buckets.iter().collect();
        buckets.sort_by(|a, b| b.1.total_size.cmp(&a.1.total_size).then(a.0.cmp(b.0)));
        buckets
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Paths and bucket names are written lossily; bytes that are not valid
/// UTF-8 become U+FFFD instead of failing the export.
pub(crate) fn serialize_lossy<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<OsStr>,
    S: Serializer,
{
    serializer.serialize_str(&value.as_ref().to_string_lossy())
}

fn serialize_bucket_map<S: Serializer>(
    buckets: &BTreeMap<OsString, BucketStats>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        buckets
            .iter()
            .map(|(name, stats)| (name.to_string_lossy(), stats)),
    )
}
