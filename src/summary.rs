//! Impact metrics from the equal-vs-optimized summary table.
//!
//! The upstream summary has one row per objective: conversions and
//! deduplicated reach fraction, with `equal_split`, `optimized`, and `lift_%`
//! columns. Rows attach by metric label when the table carries one, and by
//! position (row 0 = conversions, row 1 = reach) when it does not; some
//! pipeline versions emit only the positional layout.

use crate::table::DataTable;

const METRIC_CONVERSIONS: &str = "conversions";
const METRIC_REACH: &str = "deduped_reach_fraction";

const COL_LIFT: &str = "lift_%";
const COL_OPTIMIZED: &str = "optimized";

/// The three headline numbers of the executive report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactMetrics {
    pub conversions_lift_pct: f64,
    pub reach_lift_pct: f64,
    pub optimized_conversions: f64,
}

/// Extract the headline metrics from a summary table.
///
/// Returns `None` when the table has fewer than two rows, lacks the
/// `lift_%` or `optimized` column, or the required cells do not parse as
/// numbers. The renderer maps `None` to the setup warning.
pub fn impact_from_summary(table: &DataTable) -> Option<ImpactMetrics> {
    if table.len() < 2 {
        return None;
    }

    let conversions_row = metric_row(table, METRIC_CONVERSIONS, 0);
    let reach_row = metric_row(table, METRIC_REACH, 1);

    Some(ImpactMetrics {
        conversions_lift_pct: table.numeric(conversions_row, COL_LIFT)?,
        reach_lift_pct: table.numeric(reach_row, COL_LIFT)?,
        optimized_conversions: table.numeric(conversions_row, COL_OPTIMIZED)?,
    })
}

/// Row carrying the named metric label in the first column, or the
/// positional fallback when no row is labeled with it.
fn metric_row(table: &DataTable, label: &str, fallback: usize) -> usize {
    (0..table.len())
        .find(|&row| {
            table
                .cell(row, 0)
                .map(|v| v.trim().eq_ignore_ascii_case(label))
                .unwrap_or(false)
        })
        .unwrap_or(fallback)
}
