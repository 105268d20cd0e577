//! File placement — bucket directories and metadata-preserving copies.
use crate::error::EntryError;
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result of one successful copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Full path of the new copy.
    pub target: PathBuf,
    /// Bytes written.
    pub bytes: u64,
    /// A file with the same name was already in the bucket and got replaced.
    pub overwritten: bool,
}

/// Create `path` and any missing ancestors. Succeeds if it already exists.
pub fn ensure_directory(path: &Path) -> Result<(), EntryError> {
    fs::create_dir_all(path).map_err(|err| EntryError::create_dir(path, err))
}

/// Copy `file` into `target_dir` under its original file name.
///
/// Content, permission bits and access/modification times are carried over.
/// An existing file at the target is replaced, unless it is `file` itself:
/// that is refused, since opening the target would truncate the source.
/// Failing to restore timestamps or permissions is logged but does not fail
/// the copy.
pub fn copy_into(file: &Path, target_dir: &Path) -> Result<Placement, EntryError> {
    let Some(file_name) = file.file_name() else {
        return Err(EntryError::copy(
            file,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        ));
    };
    let target = target_dir.join(file_name);
    let overwritten = target.exists();

    if overwritten && is_same_file(file, &target) {
        return Err(EntryError::copy(
            file,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is the same file", target.display()),
            ),
        ));
    }

    let bytes = copy_contents(file, &target).map_err(|err| EntryError::copy(file, err))?;

    Ok(Placement {
        target,
        bytes,
        overwritten,
    })
}

fn copy_contents(source: &Path, target: &Path) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    let metadata = reader.metadata()?;
    let mut writer = File::create(target)?;
    let bytes = io::copy(&mut reader, &mut writer)?;

    // Times go through the open handle, before permissions can make the
    // target read-only.
    if let Err(err) = writer.set_times(file_times(&metadata)) {
        warn!("Could not preserve timestamps on {}: {err}", target.display());
    }
    drop(writer);

    if let Err(err) = fs::set_permissions(target, metadata.permissions()) {
        warn!("Could not preserve permissions on {}: {err}", target.display());
    }
    Ok(bytes)
}

/// `true` when both paths name the same file, hard links included.
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

/// `true` when both paths canonicalise to the same location.
#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn file_times(metadata: &fs::Metadata) -> FileTimes {
    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    times
}
