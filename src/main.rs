use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use focalstat::cli::{
    parse_crop_override, run_crop_list, run_crop_reset, run_crop_set, run_crop_unset,
    run_options, run_stats, CropSource, GroupBy, StatsOptions,
};
use focalstat::config::{default_settings_path, Settings};
use focalstat::filter::{FilterOption, PhotoFilter};
use focalstat::logging::{init_logging, LOG_ENV};
use focalstat::report::render_chart;
use focalstat::serve::run_serve;

#[derive(Parser)]
#[command(name = "focalstat")]
#[command(about = "Focal length and gear statistics for a photo folder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, env = "FOCALSTAT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chart photos by focal length or another attribute
    Stats {
        /// Photo folder to scan
        #[arg(default_value = ".")]
        path: PathBuf,
        /// What the bars represent
        #[arg(long, value_enum, default_value_t = GroupBy::FocalLength)]
        group_by: GroupBy,
        /// Focal length ranges, e.g. "16-35, 50, 70-200+300-400, other"
        #[arg(long)]
        ranges: Option<String>,
        /// One bar per millimeter instead of ranges
        #[arg(long)]
        continuous: bool,
        /// Crop factor override for this run (MODEL=FACTOR, repeatable)
        #[arg(long, value_parser = parse_crop_override)]
        crop: Vec<(String, String)>,
        /// Only include these folders (repeatable)
        #[arg(long)]
        folder: Vec<String>,
        /// Only include these camera models (repeatable, "Unknown" for none)
        #[arg(long)]
        model: Vec<String>,
        /// Only include these lenses (repeatable, "Unknown" for none)
        #[arg(long)]
        lens: Vec<String>,
        /// Print JSON instead of a text chart
        #[arg(long)]
        json: bool,
    },
    /// List folders, camera models and lenses usable as filters
    Options {
        /// Photo folder to scan
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage per-model crop factors
    Crop {
        #[command(subcommand)]
        action: CropCommand,
    },
    /// Serve the statistics UI over HTTP
    Serve {
        /// Photo folder to scan
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Subcommand)]
enum CropCommand {
    /// Show effective crop factors
    List,
    /// Set a crop factor (invalid values become 1.0)
    Set { model: String, factor: String },
    /// Remove an override
    Unset { model: String },
    /// Remove all overrides
    Reset,
}

fn main() -> Result<()> {
    // Initialize logging - guard must be held for logs to flush
    let _guard = init_logging().ok();
    let verbose = std::env::var(LOG_ENV).is_ok();
    let start = Instant::now();

    let cli = Cli::parse();

    let result = run_command(cli);

    if verbose {
        let elapsed = start.elapsed();
        eprintln!("Completed in {:.2?}", elapsed);
    }

    result
}

fn run_command(cli: Cli) -> Result<()> {
    let settings_path = match cli.config {
        Some(path) => path,
        None => default_settings_path()?,
    };

    match cli.command {
        Commands::Stats {
            path,
            group_by,
            ranges,
            continuous,
            crop,
            folder,
            model,
            lens,
            json,
        } => {
            let settings = Settings::load(&settings_path)?;
            let options = StatsOptions {
                group_by,
                ranges,
                continuous,
                crop_overrides: crop,
                filter: PhotoFilter {
                    folders: selection(folder),
                    models: selection(model),
                    lenses: selection(lens),
                },
            };
            let report = run_stats(&path, &settings, options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            match &report.chart {
                Some(chart) => print!("{}", render_chart(chart, &report.title)),
                None => println!("{}\nNo focal length data", report.title),
            }
            if report.matched != report.photos {
                println!("({} of {} photos matched the filter)", report.matched, report.photos);
            }
        }
        Commands::Options { path, json } => {
            let options = run_options(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&options)?);
                return Ok(());
            }
            print_options("Folders", &options.folders);
            print_options("Models", &options.models);
            print_options("Lenses", &options.lenses);
        }
        Commands::Crop { action } => match action {
            CropCommand::List => {
                for entry in run_crop_list(&settings_path)? {
                    let marker = match entry.source {
                        CropSource::User => " (user)",
                        CropSource::Default => "",
                    };
                    println!("{}: {}{}", entry.model, entry.factor, marker);
                }
            }
            CropCommand::Set { model, factor } => {
                let effective = run_crop_set(&settings_path, &model, &factor)?;
                println!("{}: {}", model, effective);
            }
            CropCommand::Unset { model } => match run_crop_unset(&settings_path, &model)? {
                Some(default) => println!("{}: {} (default)", model, default),
                None => println!("{}: no crop factor (full frame)", model),
            },
            CropCommand::Reset => {
                let removed = run_crop_reset(&settings_path)?;
                println!("Removed {} overrides", removed);
            }
        },
        Commands::Serve { path, port } => {
            run_serve(&path, &settings_path, port)
                .with_context(|| format!("Failed to serve {}", path.display()))?;
        }
    }

    Ok(())
}

/// Repeatable filter flags: none given means everything is selected
fn selection(values: Vec<String>) -> Option<BTreeSet<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.into_iter().collect())
    }
}

fn print_options(title: &str, options: &[FilterOption]) {
    println!("{}:", title);
    for option in options {
        println!("  {} ({})", option.value, option.count);
    }
}
