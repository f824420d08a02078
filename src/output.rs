//! File exports for the report downloads.
//!
//! The report embeds its downloads as in-page blobs; this module writes the
//! same two files to disk for pipelines that want them as plain artifacts.
//! Absent artifacts are skipped, never fatal.

use crate::artifacts::{ArtifactSet, EXEC_SUMMARY_MD};
use std::path::{Path, PathBuf};

/// File name of the re-serialized summary download.
pub const DOWNLOAD_SUMMARY_CSV: &str = "equal_vs_optimized_summary.csv";

/// What an export run produced.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<String>,
}

/// Write the two downloads into `dir`.
///
/// The summary CSV is written only when the summary table loaded; the
/// executive summary markdown only when the upstream file exists. Skipped
/// files are reported by name so the CLI can print why.
pub fn export_downloads(
    set: &ArtifactSet,
    dir: &Path,
) -> Result<ExportOutcome, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;

    let mut outcome = ExportOutcome {
        written: Vec::new(),
        skipped: Vec::new(),
    };

    match &set.summary {
        Some(table) => {
            let path = dir.join(DOWNLOAD_SUMMARY_CSV);
            std::fs::write(&path, table.to_csv_string())?;
            outcome.written.push(path);
        }
        None => outcome.skipped.push(DOWNLOAD_SUMMARY_CSV.to_string()),
    }

    match &set.executive_summary {
        Some(text) => {
            let path = dir.join(EXEC_SUMMARY_MD);
            std::fs::write(&path, text)?;
            outcome.written.push(path);
        }
        None => outcome.skipped.push(EXEC_SUMMARY_MD.to_string()),
    }

    Ok(outcome)
}
