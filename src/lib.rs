//! shellac - 78 RPM Record Label Extraction
//!
//! A command-line utility that isolates the circular center label from a
//! photograph of a 78 RPM record. Records come either from a local image
//! file or from an archive.org item identifier, in which case the item
//! image and a streamable MP3 are resolved from the archive's metadata.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `archive`: archive.org identifier normalization and metadata resolution
//! - `vision`: normalization, circle detection, label extraction, colors
//! - `animation`: turntable rotation and platter flip-book timing
//! - `pipeline`: end-to-end orchestration
//! - `export`: PNG artifacts and JSON report output
//!
//! # Example
//!
//! ```no_run
//! use shellac::{config::Settings, pipeline};
//!
//! let settings = Settings::default();
//! let result = pipeline::run(&settings).expect("Analysis failed");
//! println!("Analyzed: {}", result.title);
//! ```

pub mod animation;
pub mod archive;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod types;
pub mod vision;

// Re-export key types at crate root
pub use error::{Result, ShellacError};
pub use types::{Circle, PageColors, ProcessingFrame, RecordInfo, Rgb};
