//! Run configuration.
//!
//! Built once at startup from the two positional inputs and handed by value
//! to the [`Organizer`](crate::Organizer). Nothing in the core reads process
//! arguments or the environment.
use crate::error::ConfigError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination used when none is given, relative to the working directory.
pub const DEFAULT_DESTINATION: &str = "dist";

/// Source tree to read and destination root to fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizeConfig {
    #[serde(serialize_with = "crate::report::serialize_lossy")]
    pub source: PathBuf,
    #[serde(serialize_with = "crate::report::serialize_lossy")]
    pub destination: PathBuf,
}

impl OrganizeConfig {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Build a configuration from optional inputs.
    ///
    /// The source is required. The destination falls back to
    /// [`DEFAULT_DESTINATION`].
    pub fn resolve(
        source: Option<PathBuf>,
        destination: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let source = source.ok_or(ConfigError::MissingSource)?;
        let destination = destination.unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION));
        Ok(Self {
            source,
            destination,
        })
    }

    /// Check the configuration against the filesystem without modifying it.
    ///
    /// The source must be an existing directory, and the destination may not
    /// resolve to that same directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.source.is_dir() {
            return Err(ConfigError::InvalidSource {
                path: self.source.clone(),
            });
        }
        if same_directory(&self.source, &self.destination) {
            return Err(ConfigError::DestinationIsSource {
                path: self.destination.clone(),
            });
        }
        Ok(())
    }
}

/// `true` when both paths exist and canonicalise to the same location.
fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolve_requires_source() {
        let err = OrganizeConfig::resolve(None, Some(PathBuf::from("out"))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSource));
    }

    #[test]
    fn resolve_defaults_destination_to_dist() {
        let config = OrganizeConfig::resolve(Some(PathBuf::from("in")), None).unwrap();
        assert_eq!(config.source, PathBuf::from("in"));
        assert_eq!(config.destination, PathBuf::from(DEFAULT_DESTINATION));
    }

    #[test]
    fn resolve_keeps_explicit_destination() {
        let config =
            OrganizeConfig::resolve(Some(PathBuf::from("in")), Some(PathBuf::from("out"))).unwrap();
        assert_eq!(config, OrganizeConfig::new("in", "out"));
    }

    #[test]
    fn validate_rejects_missing_source() {
        let tmp = TempDir::new().unwrap();
        let config = OrganizeConfig::new(tmp.path().join("nope"), tmp.path().join("out"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSource { .. })
        ));
    }

    #[test]
    fn validate_rejects_file_as_source() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        let config = OrganizeConfig::new(&file, tmp.path().join("out"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSource { .. })
        ));
    }

    #[test]
    fn validate_rejects_destination_equal_to_source() {
        let tmp = TempDir::new().unwrap();
        let config = OrganizeConfig::new(tmp.path(), tmp.path().join("."));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DestinationIsSource { .. })
        ));
    }

    #[test]
    fn validate_accepts_missing_destination() {
        let tmp = TempDir::new().unwrap();
        let config = OrganizeConfig::new(tmp.path(), tmp.path().join("out"));
        assert!(config.validate().is_ok());
        assert!(!tmp.path().join("out").exists(), "validate must not create");
    }
}
