//! Executive report builder for OnePlan media budget optimization artifacts.
//!
//! The Part-5/Part-6 pipeline drops CSV tables, PNG charts, and a markdown
//! executive summary into a local directory tree. This crate loads that tree
//! defensively and renders a single self-contained HTML report: headline
//! KPIs, spend and marginal-ROI bar charts, the equal-vs-optimized images,
//! and downloadable copies of the summary artifacts. Nothing is computed
//! here; absent or malformed artifacts degrade to inline placeholders.

pub mod artifacts;
pub mod config;
pub mod diagnostics;
pub mod output;
pub mod report;
pub mod summary;
pub mod table;
