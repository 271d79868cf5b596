//! Article Charts CLI
//!
//! Usage:
//!   article-charts [OPTIONS] example [--out DIR]
//!   article-charts [OPTIONS] plot <CSV> <OUT> [--preset P] [--no-header]
//!
//! Options:
//!   -s, --stylesheet <FILE>  House style file (TOML format)
//!   -v, --verbose            Enable debug logging
//!   -h, --help               Print help

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use article_charts::demo::{plot_csv, write_example};
use article_charts::{HouseStyle, Preset, SaveOptions};

#[derive(Parser)]
#[command(name = "article-charts")]
#[command(about = "House-styled charts, tables and animations for articles")]
struct Cli {
    /// House style file (TOML format)
    #[arg(short, long, global = true)]
    stylesheet: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the sample chart and tables
    Example {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Plot the columns of a CSV file against its first column
    Plot {
        /// Input CSV file
        csv: PathBuf,
        /// Output path; `.svg` and `.png` select one format, anything else writes all variants
        out: PathBuf,
        /// Figure size preset (small, medium, tall, short, wide, full)
        #[arg(short, long, default_value = "medium")]
        preset: Preset,
        /// Treat the first row as data instead of labels
        #[arg(long)]
        no_header: bool,
        /// Resolution for PNG output
        #[arg(long)]
        dpi: Option<u32>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // stdout carries the written file paths
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let house = match &cli.stylesheet {
        Some(path) => match HouseStyle::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => HouseStyle::default(),
    };

    let result = match cli.command {
        Commands::Example { out } => write_example(&out, &house),
        Commands::Plot {
            csv,
            out,
            preset,
            no_header,
            dpi,
        } => {
            let mut options = SaveOptions::new().with_house_style(house);
            if let Some(dpi) = dpi {
                options = options.with_dpi(dpi);
            }
            plot_csv(&csv, &out, preset, !no_header, options)
        }
    };

    match result {
        Ok(written) => tracing::debug!(files = written.len(), "done"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
