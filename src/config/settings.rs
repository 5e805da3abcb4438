//! Runtime configuration settings

use crate::animation::AnimationConfig;
use crate::vision::hough::HoughParams;
use std::path::PathBuf;
use std::time::Duration;

/// Where the record photo comes from
#[derive(Debug, Clone)]
pub enum RecordSource {
    /// Resolve an archive identifier over HTTP
    Identifier(String),
    /// Analyze a local image file
    File {
        path: PathBuf,
        title: Option<String>,
    },
}

/// Runtime settings for the label-isolation pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Record photo source
    pub source: RecordSource,
    /// Output directory
    pub output: PathBuf,
    /// Side of the square working buffer the photo is normalized into
    pub processing_size: u32,
    /// Side of the square label output
    pub output_size: u32,
    /// Circle detection parameters
    pub hough: HoughParams,
    /// Rotation and flip-book timing
    pub animation: AnimationConfig,
    /// Headless animation run length, if requested
    pub simulate: Option<Duration>,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> crate::error::Result<Self> {
        let source = match (&cli.identifier, &cli.image) {
            (Some(id), None) => RecordSource::Identifier(id.clone()),
            (None, Some(path)) => RecordSource::File {
                path: path.clone(),
                title: cli.title.clone(),
            },
            _ => {
                return Err(crate::error::ShellacError::Config(
                    "pass exactly one of --identifier or --image".to_string(),
                ))
            }
        };

        Ok(Self {
            source,
            output: cli.output.clone(),
            simulate: cli.simulate.map(Duration::from_secs_f64),
            ..Self::default()
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: RecordSource::File {
                path: PathBuf::from("record.jpg"),
                title: None,
            },
            output: PathBuf::from("./output"),
            processing_size: 640,
            output_size: 600,
            hough: HoughParams::default(),
            animation: AnimationConfig::default(),
            simulate: None,
        }
    }
}
