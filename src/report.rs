//! Executive HTML report.
//!
//! One self-contained document: inline CSS, Chart.js from CDN, PNGs embedded
//! as base64 data URIs, downloads embedded as JSON-escaped blobs. Sections
//! are independent; an absent artifact renders as that section's placeholder
//! and never suppresses the rest of the page.

use crate::artifacts::ArtifactSet;
use crate::config::ReportOptions;
use crate::diagnostics::{self, ArtifactStatus};
use crate::summary::impact_from_summary;
use crate::table::DataTable;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Local;
use std::path::Path;

// ═══════════════════════════════════════════════════════════════════════
// HTML and JS helpers
// ═══════════════════════════════════════════════════════════════════════

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// JSON string literal, usable verbatim inside a script block. `</` becomes
/// `<\/` so embedded artifact text cannot terminate the script element.
fn js_str(s: &str) -> String {
    serde_json::to_string(s)
        .expect("json-escape string")
        .replace("</", "<\\/")
}

fn js_array_str(items: &[String]) -> String {
    let parts: Vec<String> = items.iter().map(|s| js_str(s)).collect();
    format!("[{}]", parts.join(","))
}

fn js_array_f64(data: &[f64]) -> String {
    let items: Vec<String> = data.iter().map(|v| format!("{:.4}", v)).collect();
    format!("[{}]", items.join(","))
}

fn info_box(message: &str) -> String {
    format!("<div class=\"info\">{}</div>", html_escape(message))
}

fn warning_box(message: &str) -> String {
    format!("<div class=\"warning\">{}</div>", html_escape(message))
}

// ═══════════════════════════════════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════════════════════════════════

const SUMMARY_WARNING: &str =
    "Processed summary files not found. Please run Parts 5–6 and push the CSV outputs.";
const IMPACT_CAPTION: &str =
    "Optimizing for conversions can reduce reach — a deliberate efficiency trade-off.";

/// KPI grid with the three headline metrics, or the setup warning when the
/// summary is absent or unusable.
fn impact_section(set: &ArtifactSet) -> String {
    let metrics = match set.summary.as_ref().and_then(impact_from_summary) {
        Some(m) => m,
        None => return warning_box(SUMMARY_WARNING),
    };

    let source_note = match set.summary_rel_path() {
        Some(rel) => format!(
            "<p class=\"source-note\">Summary source: {}</p>",
            html_escape(&rel.display().to_string())
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="metrics-grid">
 <div class="metric"><span class="label">Conversions Lift</span><span class="value">{conv_lift:.1}%</span></div>
 <div class="metric"><span class="label">Reach Lift</span><span class="value">{reach_lift:.1}%</span></div>
 <div class="metric"><span class="label">Optimized Conversions</span><span class="value">{opt_conv:.1}</span></div>
</div>
<p class="caption">{caption}</p>
{source_note}"#,
        conv_lift = metrics.conversions_lift_pct,
        reach_lift = metrics.reach_lift_pct,
        opt_conv = metrics.optimized_conversions,
        caption = html_escape(IMPACT_CAPTION),
        source_note = source_note,
    )
}

/// One bar chart: a canvas plus its script, or a placeholder naming the
/// artifact when the table is absent or lacks a required column.
struct ChartBlock {
    html: String,
    script: String,
}

fn bar_chart(
    table: Option<&DataTable>,
    rel: &Path,
    canvas_id: &str,
    heading: &str,
    value_col: &str,
    y_label: &str,
    color: &str,
) -> ChartBlock {
    let table = match table {
        Some(t) if t.has_columns(&["channel", value_col]) => t,
        _ => {
            return ChartBlock {
                html: format!(
                    "<div class=\"chart-box\"><h4>{}</h4>{}</div>",
                    html_escape(heading),
                    info_box(&format!("Missing or malformed: {}", rel.display())),
                ),
                script: String::new(),
            }
        }
    };

    // Bars run highest-first; rows without a numeric value are dropped.
    let mut labels = Vec::new();
    let mut values = Vec::new();
    for row in table.sorted_desc_by(value_col) {
        if let (Some(channel), Some(value)) =
            (table.value(row, "channel"), table.numeric(row, value_col))
        {
            labels.push(channel.to_string());
            values.push(value);
        }
    }

    let html = format!(
        "<div class=\"chart-box\"><h4>{}</h4><canvas id=\"{}\"></canvas></div>",
        html_escape(heading),
        canvas_id,
    );
    let script = format!(
        "new Chart(document.getElementById('{id}'),{{type:'bar',data:{{labels:{labels},datasets:[{{label:{label},data:{values},backgroundColor:'{color}cc',borderColor:'{color}',borderWidth:1}}]}},options:barOpts({label})}});\n",
        id = canvas_id,
        labels = js_array_str(&labels),
        label = js_str(y_label),
        values = js_array_f64(&values),
        color = color,
    );
    ChartBlock { html, script }
}

/// The "Why the Budget Shifted" chart grid. Returns the section body and the
/// accumulated chart scripts.
fn charts_section(set: &ArtifactSet) -> (String, String) {
    let spend_conv = bar_chart(
        set.spend_conversions.as_ref(),
        &set.paths.spend_conversions,
        "c1",
        "Optimal Spend by Channel (Conversions Objective)",
        "optimal_spend_conversions",
        "USD",
        "#4285f4",
    );
    let mroi = bar_chart(
        set.marginal_roi.as_ref(),
        &set.paths.marginal_roi,
        "c2",
        "Marginal ROI by Channel",
        "marginal_roi_per_dollar",
        "Δ Conversions per $1",
        "#ea8c00",
    );
    let spend_reach = bar_chart(
        set.spend_reach.as_ref(),
        &set.paths.spend_reach,
        "c3",
        "Optimal Spend by Channel (Reach Objective)",
        "optimal_spend_reach",
        "USD",
        "#34a853",
    );

    let html = format!(
        "<div class=\"chart-row\">\n{}\n{}\n</div>\n<div class=\"chart-row\">\n{}\n</div>",
        spend_conv.html, mroi.html, spend_reach.html,
    );
    let script = format!("{}{}{}", spend_conv.script, mroi.script, spend_reach.script);
    (html, script)
}

/// Embedded image with caption, or the missing-asset placeholder.
fn image_figure(bytes: Option<&[u8]>, rel: &Path, caption: &str) -> String {
    match bytes {
        Some(data) => format!(
            "<figure class=\"figure-box\"><img src=\"data:image/png;base64,{}\" alt=\"{caption}\"><figcaption>{caption}</figcaption></figure>",
            STANDARD.encode(data),
            caption = html_escape(caption),
        ),
        None => format!(
            "<div class=\"figure-box\">{}</div>",
            info_box(&format!("Missing: {}", rel.display())),
        ),
    }
}

fn images_section(set: &ArtifactSet) -> String {
    format!(
        "<div class=\"figure-row\">\n{}\n{}\n</div>\n<div class=\"figure-row\">\n{}\n</div>",
        image_figure(
            set.image_conversions.as_deref(),
            &set.paths.image_conversions,
            "Conversions: Equal vs Optimized",
        ),
        image_figure(
            set.image_reach.as_deref(),
            &set.paths.image_reach,
            "Reach: Equal vs Optimized",
        ),
        image_figure(
            set.image_marginal_roi.as_deref(),
            &set.paths.image_marginal_roi,
            "Marginal ROI by Channel",
        ),
    )
}

/// Download buttons plus the script constants backing them.
fn downloads_section(set: &ArtifactSet) -> (String, String) {
    let mut html = String::new();
    let mut script = String::new();

    match &set.executive_summary {
        Some(text) => {
            html.push_str(
                "<button class=\"dl\" onclick=\"downloadExec()\">Download Executive Summary</button>\n",
            );
            script.push_str(&format!("const EXEC_MD={};\n", js_str(text)));
            script.push_str(&format!(
                "function downloadExec(){{downloadBlob(EXEC_MD,{},'text/markdown')}}\n",
                js_str(crate::artifacts::EXEC_SUMMARY_MD),
            ));
        }
        None => html.push_str(&info_box(&format!(
            "Generate {} in Part-6 to enable this download.",
            set.paths.executive_summary.display(),
        ))),
    }

    if let Some(summary) = &set.summary {
        html.push_str(
            "<button class=\"dl\" onclick=\"downloadSummaryCsv()\">Download Summary CSV</button>\n",
        );
        script.push_str(&format!(
            "const SUMMARY_CSV={};\n",
            js_str(&summary.to_csv_string()),
        ));
        script.push_str(&format!(
            "function downloadSummaryCsv(){{downloadBlob(SUMMARY_CSV,{},'text/csv')}}\n",
            js_str(crate::output::DOWNLOAD_SUMMARY_CSV),
        ));
    }

    (html, script)
}

/// Collapsible diagnostics panel listing every expected artifact.
fn diagnostics_panel(statuses: &[ArtifactStatus]) -> String {
    let mut rows = String::new();
    for s in statuses {
        let (class, text) = if s.exists {
            ("found", "Found")
        } else {
            ("missing", "Missing")
        };
        rows.push_str(&format!(
            "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
            html_escape(&s.rel_path),
            class,
            text,
            s.modified.as_deref().unwrap_or(""),
        ));
    }
    format!(
        r#"<details>
<summary>Diagnostic status (for setup/troubleshooting)</summary>
<p>Files found:</p>
<table>
<tr><th>Artifact</th><th>Status</th><th>Modified</th></tr>
{rows}</table>
</details>"#,
        rows = rows,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// Document assembly
// ═══════════════════════════════════════════════════════════════════════

const REPORT_CSS: &str = r#"*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#f5f5f5;color:#333}
header{background:#1a1a2e;color:#fff;padding:24px 32px}
header h1{font-size:1.4em;font-weight:500}
header h2{font-size:1.05em;font-weight:300;opacity:0.8;margin-top:4px}
main{max-width:1400px;margin:0 auto;padding:24px}
section{background:#fff;border-radius:8px;box-shadow:0 1px 3px rgba(0,0,0,0.1);padding:24px;margin-bottom:20px}
section h3{font-size:1.1em;margin-bottom:16px;color:#1a1a2e;border-bottom:2px solid #e0e0e0;padding-bottom:8px}
.metrics-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:12px}
.metric{background:#f8f9fa;border-radius:6px;padding:14px;text-align:center}
.metric .label{display:block;font-size:0.75em;color:#666;text-transform:uppercase;letter-spacing:0.5px}
.metric .value{display:block;font-size:1.5em;font-weight:600;margin-top:4px}
.caption{margin-top:12px;font-size:0.85em;color:#666}
.source-note{margin-top:6px;font-size:0.75em;color:#999}
.info{background:#e8f0fe;border-left:4px solid #4285f4;border-radius:4px;padding:12px 16px;font-size:0.9em;color:#1a56a8}
.warning{background:#fef7e0;border-left:4px solid #ea8c00;border-radius:4px;padding:12px 16px;font-size:0.9em;color:#8a5a00}
.chart-row{display:grid;grid-template-columns:1fr 1fr;gap:20px;margin-bottom:20px}
@media(max-width:900px){.chart-row{grid-template-columns:1fr}.figure-row{grid-template-columns:1fr}}
.chart-box{background:#fff;border:1px solid #eee;border-radius:8px;padding:16px}
.chart-box h4{font-size:0.95em;margin-bottom:8px;color:#555}
canvas{width:100%!important;height:300px!important}
.figure-row{display:grid;grid-template-columns:1fr 1fr;gap:20px;margin-bottom:20px}
.figure-box{background:#fff;border:1px solid #eee;border-radius:8px;padding:16px;text-align:center}
.figure-box img{max-width:100%;border-radius:4px}
.figure-box figcaption{margin-top:8px;font-size:0.85em;color:#666}
table{width:100%;border-collapse:collapse;font-size:0.9em}
th,td{padding:8px 12px;text-align:left;border-bottom:1px solid #e0e0e0}
th{background:#f8f9fa;font-weight:600}
.found{color:#34a853;font-weight:600}
.missing{color:#ea4335;font-weight:600}
details summary{cursor:pointer;font-weight:600;color:#1a1a2e;margin-bottom:12px}
details p{margin-bottom:8px;font-size:0.9em;color:#666}
.dl{padding:8px 20px;background:#4285f4;color:#fff;border:none;border-radius:4px;cursor:pointer;font-size:0.9em;margin-right:12px}
.dl:hover{background:#3367d6}
footer{text-align:center;padding:16px;color:#999;font-size:0.8em}"#;

const REPORT_JS_HELPERS: &str = r#"const barOpts=(yLabel)=>({responsive:true,maintainAspectRatio:false,plugins:{legend:{display:false}},scales:{x:{title:{display:true,text:'Channel'}},y:{title:{display:true,text:yLabel},beginAtZero:true}}});
function downloadBlob(data,filename,mime){
 const blob=new Blob([data],{type:mime});
 const url=URL.createObjectURL(blob);
 const a=document.createElement('a');
 a.href=url;a.download=filename;a.click();
 URL.revokeObjectURL(url);
}"#;

/// Render the full executive report document.
pub fn render_report(set: &ArtifactSet, opts: &ReportOptions) -> String {
    let statuses = diagnostics::check_artifacts(&set.paths);
    let (charts_html, charts_script) = charts_section(set);
    let (downloads_html, downloads_script) = downloads_section(set);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
<style>{css}</style>
</head>
<body>
<header>
 <h1>{title}</h1>
 <h2>{subtitle}</h2>
</header>
<main>

<section>
<h3>Overall Impact</h3>
{impact}
</section>

<section>
<h3>Why the Budget Shifted</h3>
{charts}
</section>

<section>
<h3>Equal vs Optimized</h3>
{images}
</section>

<section>
<h3>Downloads</h3>
{downloads}
</section>

<section>
{diagnostics}
</section>

</main>
<footer>Generated by oneplan-report at {timestamp}</footer>
<script>
{js_helpers}
{charts_script}
{downloads_script}
</script>
</body>
</html>"#,
        title = html_escape(&opts.title),
        subtitle = html_escape(&opts.subtitle),
        css = REPORT_CSS,
        impact = impact_section(set),
        charts = charts_html,
        images = images_section(set),
        downloads = downloads_html,
        diagnostics = diagnostics_panel(&statuses),
        timestamp = Local::now().format("%Y-%m-%d %H:%M:%S"),
        js_helpers = REPORT_JS_HELPERS,
        charts_script = charts_script,
        downloads_script = downloads_script,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// File I/O
// ═══════════════════════════════════════════════════════════════════════

pub fn save_report(html: &str, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}
