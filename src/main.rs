use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use oneplan_report::artifacts::{ArtifactCache, ArtifactPaths, ArtifactSet};
use oneplan_report::config::ReportConfig;
use oneplan_report::diagnostics;
use oneplan_report::output;
use oneplan_report::report;

#[derive(Parser)]
#[command(
    name = "oneplan-report",
    about = "Executive report builder for OnePlan media budget optimization artifacts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the executive HTML report
    Render {
        /// Artifact tree root (holds data/processed, assets, reports)
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Optional TOML config overriding layout and headings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output HTML file
        #[arg(long, default_value = "output/executive_report.html")]
        output: PathBuf,
    },

    /// Show which expected artifacts are present
    Status {
        /// Artifact tree root
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Optional TOML config overriding layout
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of the terminal table
        #[arg(long)]
        json: bool,
    },

    /// Write the report downloads as plain files
    Export {
        /// Artifact tree root
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Optional TOML config overriding layout
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the exported files
        #[arg(long, default_value = "output/downloads")]
        output_dir: PathBuf,
    },
}

/// Load the optional config file; config problems are operator errors.
fn load_config(path: &Option<PathBuf>) -> ReportConfig {
    match path {
        Some(p) => match ReportConfig::load(p) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error loading config {}: {}", p.display(), e);
                process::exit(1);
            }
        },
        None => ReportConfig::default(),
    }
}

fn loaded_or_absent(present: bool) -> &'static str {
    if present {
        "loaded"
    } else {
        "absent"
    }
}

fn print_load_status(set: &ArtifactSet) {
    let summary = match set.summary_rel_path() {
        Some(rel) => format!("loaded ({})", rel.display()),
        None => "absent".to_string(),
    };
    let images = [
        &set.image_conversions,
        &set.image_reach,
        &set.image_marginal_roi,
    ]
    .iter()
    .filter(|img| img.is_some())
    .count();

    println!("  summary table:       {}", summary);
    println!(
        "  marginal ROI:        {}",
        loaded_or_absent(set.marginal_roi.is_some())
    );
    println!(
        "  spend (conversions): {}",
        loaded_or_absent(set.spend_conversions.is_some())
    );
    println!(
        "  spend (reach):       {}",
        loaded_or_absent(set.spend_reach.is_some())
    );
    println!("  chart images:        {}/3", images);
    println!(
        "  executive summary:   {}",
        loaded_or_absent(set.executive_summary.is_some())
    );
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            root,
            config,
            output,
        } => {
            let cfg = load_config(&config);
            let paths = ArtifactPaths::new(&root, &cfg.paths);
            let mut cache = ArtifactCache::new();

            println!("Loading artifacts from {}", root.display());
            let set = ArtifactSet::load(&paths, &mut cache);
            print_load_status(&set);

            let html = report::render_report(&set, &cfg.report);
            match report::save_report(&html, &output) {
                Ok(()) => println!("Report written to {}", output.display()),
                Err(e) => {
                    eprintln!("Error writing report: {}", e);
                    process::exit(1);
                }
            }
        }

        Commands::Status { root, config, json } => {
            let cfg = load_config(&config);
            let paths = ArtifactPaths::new(&root, &cfg.paths);
            let statuses = diagnostics::check_artifacts(&paths);

            if json {
                match serde_json::to_string_pretty(&statuses) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Error serializing status: {}", e);
                        process::exit(1);
                    }
                }
            } else {
                print!("{}", diagnostics::render_terminal(&statuses));
            }
        }

        Commands::Export {
            root,
            config,
            output_dir,
        } => {
            let cfg = load_config(&config);
            let paths = ArtifactPaths::new(&root, &cfg.paths);
            let mut cache = ArtifactCache::new();
            let set = ArtifactSet::load(&paths, &mut cache);

            match output::export_downloads(&set, &output_dir) {
                Ok(outcome) => {
                    for path in &outcome.written {
                        println!("  wrote {}", path.display());
                    }
                    for name in &outcome.skipped {
                        println!("  skipped {} (artifact not available)", name);
                    }
                }
                Err(e) => {
                    eprintln!("Error exporting downloads: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
