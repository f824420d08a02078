//! Artifact loading for the Part-5/Part-6 output directory.
//!
//! Everything here is deliberately forgiving: the report renders whatever
//! subset of artifacts exists, so every load failure (missing file,
//! unreadable file, bad CSV, zero data rows) normalizes to "absent" and
//! nothing propagates past this boundary. Callers cannot tell a missing
//! file from a corrupt one.

use crate::config::PathsConfig;
use crate::table::DataTable;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const SUMMARY_PART6: &str = "part6_equal_vs_optimized_summary.csv";
pub const SUMMARY_PART5: &str = "part5_equal_vs_optimized_summary.csv";
pub const MARGINAL_ROI: &str = "marginal_roi_summary.csv";
pub const SPEND_CONVERSIONS: &str = "optimal_spend_conversions.csv";
pub const SPEND_REACH: &str = "optimal_spend_reach.csv";
pub const IMG_CONVERSIONS: &str = "p6_equal_vs_opt_conversions.png";
pub const IMG_REACH: &str = "p6_equal_vs_opt_reach.png";
pub const IMG_MARGINAL_ROI: &str = "p6_marginal_roi.png";
pub const EXEC_SUMMARY_MD: &str = "OnePlan_Executive_Summary.md";

/// Load a CSV artifact, or `None` if the file is missing, unreadable,
/// unparseable, or has no data rows.
pub fn load_table(path: &Path) -> Option<DataTable> {
    let text = std::fs::read_to_string(path).ok()?;
    let table = DataTable::from_csv_str(&text).ok()?;
    if table.is_empty() {
        None
    } else {
        Some(table)
    }
}

/// Read-through table cache keyed by path.
///
/// The first request for a path hits the file system; every later request
/// returns the cached parse, including cached absence. The cache lives as
/// long as the invocation, so re-reads of an unchanged (or even changed)
/// path are idempotent.
#[derive(Debug, Default)]
pub struct ArtifactCache {
    entries: HashMap<PathBuf, Option<DataTable>>,
}

impl ArtifactCache {
    pub fn new() -> Self {
        ArtifactCache::default()
    }

    /// Table for `path`, loading it on first request.
    pub fn get(&mut self, path: &Path) -> Option<&DataTable> {
        if !self.entries.contains_key(path) {
            let loaded = load_table(path);
            self.entries.insert(path.to_path_buf(), loaded);
        }
        self.entries.get(path).and_then(|entry| entry.as_ref())
    }
}

/// The expected artifact layout, as paths relative to a root directory.
///
/// File names are fixed by the upstream pipeline; the directory names come
/// from configuration and default to the pipeline's own layout.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub root: PathBuf,
    pub summary_primary: PathBuf,
    pub summary_fallback: PathBuf,
    pub marginal_roi: PathBuf,
    pub spend_conversions: PathBuf,
    pub spend_reach: PathBuf,
    pub image_conversions: PathBuf,
    pub image_reach: PathBuf,
    pub image_marginal_roi: PathBuf,
    pub executive_summary: PathBuf,
}

impl ArtifactPaths {
    pub fn new(root: &Path, cfg: &PathsConfig) -> ArtifactPaths {
        let data = PathBuf::from(&cfg.data_dir);
        let assets = PathBuf::from(&cfg.assets_dir);
        let reports = PathBuf::from(&cfg.reports_dir);
        ArtifactPaths {
            root: root.to_path_buf(),
            summary_primary: data.join(SUMMARY_PART6),
            summary_fallback: data.join(SUMMARY_PART5),
            marginal_roi: data.join(MARGINAL_ROI),
            spend_conversions: data.join(SPEND_CONVERSIONS),
            spend_reach: data.join(SPEND_REACH),
            image_conversions: assets.join(IMG_CONVERSIONS),
            image_reach: assets.join(IMG_REACH),
            image_marginal_roi: assets.join(IMG_MARGINAL_ROI),
            executive_summary: reports.join(EXEC_SUMMARY_MD),
        }
    }

    /// Absolute location of a relative artifact path.
    pub fn full(&self, rel: &Path) -> PathBuf {
        self.root.join(rel)
    }
}

/// Which file supplied the equal-vs-optimized summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    Part6,
    Part5,
}

/// Everything the renderer consumes, loaded once per invocation.
///
/// Each field is independently optional; one absent artifact never affects
/// the others.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub summary: Option<DataTable>,
    pub summary_source: Option<SummarySource>,
    pub marginal_roi: Option<DataTable>,
    pub spend_conversions: Option<DataTable>,
    pub spend_reach: Option<DataTable>,
    pub image_conversions: Option<Vec<u8>>,
    pub image_reach: Option<Vec<u8>>,
    pub image_marginal_roi: Option<Vec<u8>>,
    pub executive_summary: Option<String>,
    pub paths: ArtifactPaths,
}

impl ArtifactSet {
    /// Load every artifact through the cache.
    ///
    /// The summary falls back from the part6 file to the part5 file; the
    /// fallback is consulted only when the primary is unusable.
    pub fn load(paths: &ArtifactPaths, cache: &mut ArtifactCache) -> ArtifactSet {
        let (summary, summary_source) =
            match cache.get(&paths.full(&paths.summary_primary)).cloned() {
                Some(table) => (Some(table), Some(SummarySource::Part6)),
                None => match cache.get(&paths.full(&paths.summary_fallback)).cloned() {
                    Some(table) => (Some(table), Some(SummarySource::Part5)),
                    None => (None, None),
                },
            };

        ArtifactSet {
            summary,
            summary_source,
            marginal_roi: cache.get(&paths.full(&paths.marginal_roi)).cloned(),
            spend_conversions: cache.get(&paths.full(&paths.spend_conversions)).cloned(),
            spend_reach: cache.get(&paths.full(&paths.spend_reach)).cloned(),
            image_conversions: load_image(&paths.full(&paths.image_conversions)),
            image_reach: load_image(&paths.full(&paths.image_reach)),
            image_marginal_roi: load_image(&paths.full(&paths.image_marginal_roi)),
            executive_summary: std::fs::read_to_string(paths.full(&paths.executive_summary)).ok(),
            paths: paths.clone(),
        }
    }

    /// Relative path of the file that supplied the summary, for the report's
    /// source note.
    pub fn summary_rel_path(&self) -> Option<&Path> {
        match self.summary_source? {
            SummarySource::Part6 => Some(&self.paths.summary_primary),
            SummarySource::Part5 => Some(&self.paths.summary_fallback),
        }
    }
}

/// Raw image bytes, or `None` if missing, unreadable, or empty.
fn load_image(path: &Path) -> Option<Vec<u8>> {
    let bytes = std::fs::read(path).ok()?;
    if bytes.is_empty() {
        None
    } else {
        Some(bytes)
    }
}
