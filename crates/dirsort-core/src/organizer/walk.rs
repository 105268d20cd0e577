//! Serial directory walk built on `jwalk`.
//!
//! The walk keeps its own queue of pending directories, so tree depth is
//! bounded by memory rather than by the call stack. Entries are sorted by
//! file name within each directory so repeated runs visit files in the same
//! order.
//!
//! Symbolic links are not followed. A link is reported as
//! [`WalkEvent::Skipped`], which also rules out cycles through links that
//! point back at an ancestor.
use crate::error::EntryError;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

/// One step of the walk.
#[derive(Debug)]
pub enum WalkEvent {
    /// A subdirectory below the root. Its children follow.
    Directory(PathBuf),
    /// A regular file.
    File(PathBuf),
    /// Neither file nor directory (symlink, socket, device, fifo).
    Skipped(PathBuf),
    /// A directory could not be listed. Its subtree is abandoned. For a
    /// subdirectory this follows its `Directory` event.
    Failed(EntryError),
}

/// Walk `root` depth-first, reporting every entry below it to `on_event`.
///
/// The root itself is not reported. When `excluded` is set, entries whose
/// path relative to `root` starts with it are dropped silently, along with
/// their descendants.
pub fn traverse<F>(root: &Path, excluded: Option<&Path>, mut on_event: F)
where
    F: FnMut(WalkEvent),
{
    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::Serial);

    for entry_result in walker {
        let mut entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                on_event(WalkEvent::Failed(listing_failure(root, &err)));
                continue;
            }
        };

        let path = entry.path();

        // jwalk lists a directory before yielding it and parks any listing
        // error on the entry itself.
        let listing_error = entry
            .read_children_error
            .take()
            .map(|err| listing_failure(&path, &err));

        if entry.depth == 0 {
            if let Some(err) = listing_error {
                on_event(WalkEvent::Failed(err));
            }
            continue;
        }

        if let Some(excluded) = excluded {
            let inside = path
                .strip_prefix(root)
                .is_ok_and(|relative| relative.starts_with(excluded));
            if inside {
                trace!("Excluded {}", path.display());
                continue;
            }
        }

        let file_type = entry.file_type();
        let event = if file_type.is_dir() {
            WalkEvent::Directory(path)
        } else if file_type.is_file() {
            WalkEvent::File(path)
        } else {
            WalkEvent::Skipped(path)
        };
        on_event(event);

        if let Some(err) = listing_error {
            on_event(WalkEvent::Failed(err));
        }
    }
}

/// Convert a jwalk error into a `read_directory` failure. `fallback` names
/// the directory when the error carries no path.
fn listing_failure(fallback: &Path, err: &jwalk::Error) -> EntryError {
    let path = err.path().unwrap_or(fallback);
    let source = match err.io_error() {
        Some(io_err) => io::Error::new(io_err.kind(), io_err.to_string()),
        None => io::Error::other(err.to_string()),
    };
    EntryError::read_dir(path, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FailureKind, FailureOperation};
    use std::fs;
    use tempfile::TempDir;

    fn collect(root: &Path, excluded: Option<&Path>) -> Vec<WalkEvent> {
        let mut events = Vec::new();
        traverse(root, excluded, |e| events.push(e));
        events
    }

    fn relative_files(root: &Path, events: &[WalkEvent]) -> Vec<PathBuf> {
        events
            .iter()
            .filter_map(|e| match e {
                WalkEvent::File(p) => Some(p.strip_prefix(root).unwrap().to_path_buf()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn visits_every_file_once_at_every_depth() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("top.txt"), b"1").unwrap();
        fs::write(root.join("a/mid.txt"), b"2").unwrap();
        fs::write(root.join("a/b/c/deep.txt"), b"3").unwrap();

        let events = collect(root, None);
        let mut files = relative_files(root, &events);
        files.sort();
        assert_eq!(
            files,
            vec![
                PathBuf::from("a/b/c/deep.txt"),
                PathBuf::from("a/mid.txt"),
                PathBuf::from("top.txt"),
            ]
        );

        let dirs = events
            .iter()
            .filter(|e| matches!(e, WalkEvent::Directory(_)))
            .count();
        assert_eq!(dirs, 3, "a, a/b and a/b/c");
    }

    #[test]
    fn root_is_not_reported() {
        let tmp = TempDir::new().unwrap();
        let events = collect(tmp.path(), None);
        assert!(events.is_empty(), "empty root yields no events");
    }

    #[test]
    fn excluded_subtree_is_dropped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("dist/txt")).unwrap();
        fs::write(root.join("dist/txt/copy.txt"), b"x").unwrap();
        fs::write(root.join("keep.txt"), b"x").unwrap();

        let events = collect(root, Some(Path::new("dist")));
        assert_eq!(relative_files(root, &events), vec![PathBuf::from("keep.txt")]);
        assert!(
            !events.iter().any(|e| matches!(e, WalkEvent::Directory(_))),
            "excluded directories are not reported"
        );
    }

    #[test]
    fn sibling_with_shared_prefix_is_not_excluded() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("distant")).unwrap();
        fs::write(root.join("distant/a.txt"), b"x").unwrap();

        let events = collect(root, Some(Path::new("dist")));
        assert_eq!(
            relative_files(root, &events),
            vec![PathBuf::from("distant/a.txt")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_skipped_not_followed() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("real")).unwrap();
        fs::write(root.join("real/a.txt"), b"x").unwrap();
        // A loop back to the root and a link to a file.
        std::os::unix::fs::symlink(root, root.join("real/loop")).unwrap();
        std::os::unix::fs::symlink(root.join("real/a.txt"), root.join("link.txt")).unwrap();

        let events = collect(root, None);
        assert_eq!(
            relative_files(root, &events),
            vec![PathBuf::from("real/a.txt")]
        );
        let skipped = events
            .iter()
            .filter(|e| matches!(e, WalkEvent::Skipped(_)))
            .count();
        assert_eq!(skipped, 2);
    }

    /// A directory that disappears after its parent was listed must surface
    /// as a listing failure, with files before it still reported.
    #[test]
    fn directory_vanishing_before_listing_is_reported() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.txt"), b"x").unwrap();
        fs::create_dir_all(root.join("z_dir")).unwrap();
        fs::write(root.join("z_dir/lost.txt"), b"x").unwrap();

        let mut events = Vec::new();
        traverse(root, None, |event| {
            if matches!(&event, WalkEvent::File(p) if p.ends_with("a.txt")) {
                fs::remove_dir_all(root.join("z_dir")).unwrap();
            }
            events.push(event);
        });

        assert_eq!(relative_files(root, &events), vec![PathBuf::from("a.txt")]);
        let failures: Vec<&EntryError> = events
            .iter()
            .filter_map(|e| match e {
                WalkEvent::Failed(err) => Some(err),
                _ => None,
            })
            .collect();
        assert_eq!(failures.len(), 1, "events: {events:?}");
        assert_eq!(failures[0].operation(), FailureOperation::ReadDirectory);
        assert_eq!(failures[0].kind(), FailureKind::NotFound);
        assert!(failures[0].path().ends_with("z_dir"));
        assert!(failures[0].to_string().starts_with("Directory not found"));
    }

    #[test]
    fn missing_root_is_reported() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("gone");

        let events = collect(&root, None);

        assert_eq!(events.len(), 1, "events: {events:?}");
        match &events[0] {
            WalkEvent::Failed(err) => {
                assert_eq!(err.operation(), FailureOperation::ReadDirectory);
                assert_eq!(err.kind(), FailureKind::NotFound);
            }
            other => panic!("expected a failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let closed = root.join("closed");
        fs::create_dir_all(&closed).unwrap();
        fs::set_permissions(&closed, fs::Permissions::from_mode(0o000)).unwrap();
        let enforced = fs::read_dir(&closed).is_err();

        let events = collect(root, None);
        fs::set_permissions(&closed, fs::Permissions::from_mode(0o755)).unwrap();
        if !enforced {
            return;
        }

        assert!(events.iter().any(|e| matches!(
            e,
            WalkEvent::Failed(err) if err.kind() == FailureKind::PermissionDenied
        )));
    }
}
