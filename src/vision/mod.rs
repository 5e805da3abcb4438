//! The label-isolation pipeline components
//!
//! Geometry normalization, circle detection, label extraction, placeholder
//! generation, and color derivation. The trait abstractions allow swapping
//! detection and sampling backends without changing pipeline code.

pub mod color;
pub mod extract;
pub mod hough;
pub mod normalize;
pub mod placeholder;
pub mod traits;

pub use hough::{GradientHoughDetector, HoughParams};
pub use traits::{CircleDetector, ColorSampler};
