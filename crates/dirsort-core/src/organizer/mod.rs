//! Organizer — walks the source tree and files every regular file into its
//! bucket under the destination root.
//!
//! The run is single-threaded. Every failure below the configuration level
//! is caught at the entry it concerns, logged, recorded in the
//! [`OrganizeReport`], and the walk continues with the next entry.
pub mod place;
pub mod walk;

use crate::bucket::classify_file;
use crate::config::OrganizeConfig;
use crate::error::{ConfigError, EntryError};
use crate::report::{CopiedFile, OrganizeReport};
use place::{copy_into, ensure_directory};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, trace, warn};
use walk::{traverse, WalkEvent};

/// A validated, ready-to-run organizer.
#[derive(Debug)]
pub struct Organizer {
    config: OrganizeConfig,
    /// Buckets known to exist, so each is created at most once per run.
    created_buckets: HashSet<OsString>,
    report: OrganizeReport,
}

impl Organizer {
    /// Validate `config` and prepare a run. Nothing is written yet.
    pub fn new(config: OrganizeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let report = OrganizeReport::new(&config);
        Ok(Self {
            config,
            created_buckets: HashSet::new(),
            report,
        })
    }

    /// Copy every file under the source into its bucket and return the report.
    pub fn run(mut self) -> OrganizeReport {
        let start = Instant::now();
        info!(
            "Organizing {} into {}",
            self.config.source.display(),
            self.config.destination.display()
        );

        if let Err(err) = ensure_directory(&self.config.destination) {
            self.record_failure(err);
        }

        let source = self.config.source.clone();
        let excluded = excluded_subtree(&source, &self.config.destination);
        if let Some(excluded) = &excluded {
            debug!(
                "Destination lies inside the source; skipping {}",
                excluded.display()
            );
        }

        self.report.directories_visited += 1;
        traverse(&source, excluded.as_deref(), |event| match event {
            WalkEvent::Directory(_) => self.report.directories_visited += 1,
            WalkEvent::File(path) => self.place_file(&path),
            WalkEvent::Skipped(path) => {
                trace!("Skipping {}", path.display());
                self.report.entries_skipped += 1;
            }
            WalkEvent::Failed(err) => self.record_failure(err),
        });

        self.report.elapsed = start.elapsed();
        info!(
            "Copied {} files into {} buckets in {:?} ({} failures)",
            self.report.files_copied,
            self.report.buckets.len(),
            self.report.elapsed,
            self.report.failures.len()
        );
        self.report
    }

    /// Classify `file`, make sure its bucket exists, and copy it there.
    fn place_file(&mut self, file: &Path) {
        let bucket = classify_file(file);
        let bucket_dir = self.config.destination.join(&bucket);

        if !self.created_buckets.contains(&bucket) {
            if let Err(err) = ensure_directory(&bucket_dir) {
                self.record_failure(err);
                return;
            }
            self.created_buckets.insert(bucket.clone());
        }

        match copy_into(file, &bucket_dir) {
            Ok(placed) => {
                debug!("{} -> {}", file.display(), placed.target.display());
                self.report.record_copy(CopiedFile {
                    source: file.to_path_buf(),
                    destination: placed.target,
                    bucket,
                    bytes: placed.bytes,
                    overwritten: placed.overwritten,
                });
            }
            Err(err) => self.record_failure(err),
        }
    }

    fn record_failure(&mut self, err: EntryError) {
        warn!("{err}");
        self.report.record_failure(&err);
    }
}

/// Location of `destination` relative to `source` when it lies strictly
/// inside it. Both paths must exist to be compared.
fn excluded_subtree(source: &Path, destination: &Path) -> Option<PathBuf> {
    let source = fs::canonicalize(source).ok()?;
    let destination = fs::canonicalize(destination).ok()?;
    let relative = destination.strip_prefix(&source).ok()?;
    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative.to_path_buf())
    }
}
