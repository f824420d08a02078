//! Presence checker for the expected artifact set.
//!
//! Purely operator-facing: which of the expected files exist under the root,
//! and when they last changed. Feeds the `status` subcommand and the
//! report's collapsible diagnostics panel. Existence here never gates
//! rendering; the loader makes its own (stricter) call per artifact.

use crate::artifacts::ArtifactPaths;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

/// Presence record for one expected artifact.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactStatus {
    /// File name as shown in the diagnostics panel.
    pub label: String,
    /// Path relative to the invocation root.
    pub rel_path: String,
    pub exists: bool,
    /// Last-modified timestamp, when the file exists and the file system
    /// reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Check every expected artifact path.
///
/// Both summary candidates (part6 and part5) get their own line, so the
/// panel shows which of the two the fallback could draw from.
pub fn check_artifacts(paths: &ArtifactPaths) -> Vec<ArtifactStatus> {
    [
        &paths.summary_primary,
        &paths.summary_fallback,
        &paths.marginal_roi,
        &paths.spend_conversions,
        &paths.spend_reach,
        &paths.image_conversions,
        &paths.image_reach,
        &paths.image_marginal_roi,
        &paths.executive_summary,
    ]
    .into_iter()
    .map(|rel| status_for(paths, rel))
    .collect()
}

fn status_for(paths: &ArtifactPaths, rel: &Path) -> ArtifactStatus {
    let full = paths.full(rel);
    let exists = full.exists();
    ArtifactStatus {
        label: rel
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| rel.display().to_string()),
        rel_path: rel.display().to_string(),
        exists,
        modified: if exists { modified_timestamp(&full) } else { None },
    }
}

/// Formatted mtime, or `None` when the file system does not provide one.
fn modified_timestamp(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Terminal rendering: one line per artifact, found/missing marker first.
pub fn render_terminal(statuses: &[ArtifactStatus]) -> String {
    let width = statuses
        .iter()
        .map(|s| s.rel_path.len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Files found:\n");
    for s in statuses {
        let marker = if s.exists { "[OK]     " } else { "[MISSING]" };
        match &s.modified {
            Some(ts) => out.push_str(&format!(
                "  {} {:<w$}  modified {}\n",
                marker,
                s.rel_path,
                ts,
                w = width
            )),
            None => out.push_str(&format!("  {} {}\n", marker, s.rel_path)),
        }
    }
    out
}
