//! Command-line interface for OPTICS ordering.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::{InputConfig, OpticsConfig};
use crate::core::distance::DistanceMetric;
use crate::PipelineConfig;

#[derive(Parser)]
#[command(name = "optics-ordering")]
#[command(about = "OPTICS cluster ordering and reachability plots", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Order the points of a CSV file and write reachability and cluster CSVs
    Order {
        /// Input CSV file, one point per row
        input_csv: PathBuf,
        /// Output directory for result CSVs
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Neighborhood radius
        #[arg(long)]
        epsilon: Option<f64>,
        /// Minimum neighbors for a core point
        #[arg(long)]
        min_pts: Option<usize>,
        /// Distance metric (euclidean, manhattan, chebyshev)
        #[arg(long)]
        metric: Option<DistanceMetric>,
        /// Treat the first CSV row as a header
        #[arg(long)]
        has_headers: bool,
    },

    /// Write the default configuration as YAML
    InitConfig {
        /// Output YAML path
        path: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<60} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.chars().count() > 38 {
            let head: String = value.chars().take(35).collect();
            format!("{}...", head)
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<38} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    match cli.command {
        Commands::Order {
            input_csv,
            output_dir,
            epsilon,
            min_pts,
            metric,
            has_headers,
        } => {
            cmd_order(
                &input_csv,
                output_dir,
                epsilon,
                min_pts,
                metric,
                has_headers,
                &config,
            );
        }
        Commands::InitConfig { path } => {
            cmd_init_config(&path, &config);
        }
    }
}

fn cmd_order(
    input_csv: &PathBuf,
    output_dir: Option<PathBuf>,
    epsilon: Option<f64>,
    min_pts: Option<usize>,
    metric: Option<DistanceMetric>,
    has_headers: bool,
    config: &PipelineConfig,
) {
    use crate::processors::optics;

    let start = Instant::now();

    // Command-line values override the config file
    let run_config = PipelineConfig {
        optics: OpticsConfig {
            epsilon: epsilon.unwrap_or(config.optics.epsilon),
            min_pts: min_pts.unwrap_or(config.optics.min_pts),
            metric: metric.unwrap_or(config.optics.metric),
        },
        input: InputConfig {
            has_headers: has_headers || config.input.has_headers,
            delimiter: config.input.delimiter,
        },
    };

    let effective_output_dir = output_dir.unwrap_or_else(|| {
        input_csv
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    println!("Running OPTICS ordering...");
    println!("Input: {}", input_csv.display());
    println!("Output directory: {}", effective_output_dir.display());
    println!("Parameters:");
    println!("  epsilon: {}", run_config.optics.epsilon);
    println!("  min_pts: {}", run_config.optics.min_pts);
    println!("  metric: {}", run_config.optics.metric);

    let spinner = create_spinner("Ordering points...");

    match optics::process_csv_ordering(input_csv, Some(&effective_output_dir), &run_config) {
        Ok(report) => {
            spinner.finish_and_clear();

            print_summary(
                "Ordering Complete",
                &[
                    ("Input file", input_csv.display().to_string()),
                    ("Reachability CSV", report.reachability_csv.display().to_string()),
                    ("Clusters CSV", report.clusters_csv.display().to_string()),
                    ("Points ordered", report.points.to_string()),
                    ("Clusters found", report.clusters.to_string()),
                    ("Undefined reach", report.undefined.to_string()),
                    ("epsilon", run_config.optics.epsilon.to_string()),
                    ("min_pts", run_config.optics.min_pts.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Ordering failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_init_config(path: &PathBuf, config: &PipelineConfig) {
    match config.to_yaml(path) {
        Ok(()) => println!("Config written to {}", path.display()),
        Err(e) => {
            error!("Failed to write config to {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
