//! Bucket classification.
//!
//! A bucket is the destination subfolder shared by every file with the same
//! extension. Classification looks at the file name only, so a file's depth
//! in the source tree never changes where it lands.
use std::ffi::OsString;
use std::path::Path;

/// Bucket for files whose name carries no extension.
pub const FALLBACK_BUCKET: &str = "no_extension";

/// Return the bucket name for `path`.
///
/// The bucket is the final suffix of the file name, lowercased and without
/// the dot. Names with no suffix map to [`FALLBACK_BUCKET`]:
///
/// - `README` has no dot at all;
/// - `.bashrc` only has a leading dot;
/// - `notes.` ends in a dot with nothing after it.
///
/// Only the last suffix counts, so `backup.tar.gz` lands in `gz`.
///
/// Extensions that are not valid UTF-8 keep their raw bytes with only the
/// ASCII letters lowercased, so distinct extensions never share a bucket.
pub fn classify_file(path: &Path) -> OsString {
    match path.extension() {
        Some(ext) if !ext.is_empty() => match ext.to_str() {
            Some(text) => OsString::from(text.to_lowercase()),
            None => ext.to_ascii_lowercase(),
        },
        _ => OsString::from(FALLBACK_BUCKET),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(name: &str) -> OsString {
        classify_file(Path::new(name))
    }

    #[test]
    fn plain_extensions_are_kept() {
        assert_eq!(bucket("b.jpeg"), "jpeg");
        assert_eq!(bucket("main.rs"), "rs");
    }

    /// Extension matching must be case-insensitive so "TXT" == "txt".
    #[test]
    fn extensions_are_lowercased() {
        assert_eq!(bucket("a.TXT"), "txt");
        assert_eq!(bucket("Photo.JpEg"), "jpeg");
    }

    #[test]
    fn extensionless_names_use_fallback() {
        assert_eq!(bucket("README"), FALLBACK_BUCKET);
        assert_eq!(bucket("Makefile"), FALLBACK_BUCKET);
    }

    #[test]
    fn dotfiles_without_suffix_use_fallback() {
        assert_eq!(bucket(".bashrc"), FALLBACK_BUCKET);
        assert_eq!(bucket(".config.toml"), "toml");
    }

    #[test]
    fn trailing_dot_uses_fallback() {
        assert_eq!(bucket("notes."), FALLBACK_BUCKET);
    }

    #[test]
    fn only_last_suffix_counts() {
        assert_eq!(bucket("backup.tar.gz"), "gz");
        assert_eq!(bucket("a..b"), "b");
    }

    /// Directory components never influence the bucket.
    #[test]
    fn depth_does_not_matter() {
        assert_eq!(bucket("c.txt"), bucket("deep/nested/dir.d/c.txt"));
        assert_eq!(bucket("dir.d/README"), FALLBACK_BUCKET);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_extensions_keep_distinct_buckets() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let ff = classify_file(Path::new(OsStr::from_bytes(b"a.\xffX")));
        let fe = classify_file(Path::new(OsStr::from_bytes(b"b.\xfeX")));

        assert_eq!(ff.as_bytes(), b"\xffx");
        assert_eq!(fe.as_bytes(), b"\xfex");
        assert_ne!(ff, fe);
    }
}
