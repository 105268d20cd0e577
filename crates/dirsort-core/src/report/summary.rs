//! Human-readable run summary.
//!
//! All sizes are `u64` bytes. Floating point is only used at the
//! display-formatting boundary.
use super::OrganizeReport;
use std::fmt::Write;

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Format a byte count with a binary-scaled unit.
///
/// Units step by 1024 but carry the short labels users expect (KB, MB…).
/// GB and above get two decimals.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit >= 2 {
        format!("{value:.2} {}", UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Format a count with thousands separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render the end-of-run summary printed by the binary.
///
/// Buckets are listed largest first; every failure message is repeated at the
/// end so the offending paths are visible even with logging turned down.
pub fn render_summary(report: &OrganizeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Copied {} files ({}) into {} buckets under {}",
        format_count(report.files_copied),
        format_size(report.bytes_copied),
        report.buckets.len(),
        report.destination.display()
    );
    for (name, stats) in report.buckets_by_size() {
        let _ = writeln!(
            out,
            "  {:<16} {:>10} files  {:>10}",
            name.to_string_lossy(),
            format_count(stats.file_count),
            format_size(stats.total_size)
        );
    }
    if report.files_overwritten > 0 {
        let _ = writeln!(
            out,
            "{} files replaced an existing file of the same name",
            format_count(report.files_overwritten)
        );
    }
    if report.is_clean() {
        let _ = writeln!(out, "No errors");
    } else {
        let _ = writeln!(out, "{} errors:", format_count(report.failures.len() as u64));
        for failure in &report.failures {
            let _ = writeln!(out, "  {}", failure.message);
        }
    }
    out
}
