//! Report exports — pretty JSON report and CSV manifest of copied files.
use super::OrganizeReport;
use crate::error::ReportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column order of the manifest; matches the field order of `CopiedFile`.
pub const MANIFEST_HEADER: [&str; 5] = ["source", "destination", "bucket", "bytes", "overwritten"];

impl OrganizeReport {
    /// Write the full report to `writer` as pretty-printed JSON.
    pub fn to_json_writer<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write one CSV row per copied file to `writer`, header first.
    ///
    /// The header is always written, even when nothing was copied.
    pub fn to_manifest_writer<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut out = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        out.write_record(MANIFEST_HEADER)?;
        for copied in &self.copied {
            out.serialize(copied)?;
        }
        out.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let mut writer = create(path)?;
        self.to_json_writer(&mut writer)?;
        writer.flush().map_err(|source| io_error(path, source))
    }

    pub fn write_manifest(&self, path: &Path) -> Result<(), ReportError> {
        let mut writer = create(path)?;
        self.to_manifest_writer(&mut writer)?;
        writer.flush().map_err(|source| io_error(path, source))
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ReportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: path.to_path_buf(),
        source,
    }
}
