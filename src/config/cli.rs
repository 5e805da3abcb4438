//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// shellac - record-label isolation for archival 78 RPM photos
///
/// Locates the circular paper label in a record photo, crops and masks it
/// into a square label image, derives display colors, and can simulate the
/// spinning-platter animation headlessly. Outputs PNG images and a JSON
/// report.
#[derive(Parser, Debug)]
#[command(name = "shellac")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Archive identifier or archive.org/details/<id> URL to resolve and fetch
    #[arg(short = 'I', long, value_name = "ID", conflicts_with = "image")]
    pub identifier: Option<String>,

    /// Local record photo to analyze instead of fetching
    #[arg(short = 'i', long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Record title (used for the placeholder label; defaults to the file stem)
    #[arg(short, long, value_name = "TITLE", requires = "image")]
    pub title: Option<String>,

    /// Output directory for PNG/JSON files
    #[arg(short, long, value_name = "DIR", default_value = "./output")]
    pub output: PathBuf,

    /// Run the platter animation headlessly for N seconds after analysis
    #[arg(long, value_name = "SECS")]
    pub simulate: Option<f64>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}
