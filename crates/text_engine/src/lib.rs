//! Text Engine - Standard font metrics and word wrapping
//!
//! This crate measures text set in the standard PDF faces and breaks it into
//! lines that fit a given width.
//!
//! # Modules
//!
//! - `metrics`: Per-character advance widths and string measurement
//! - `wrap`: Greedy line filling at Unicode break opportunities

mod metrics;
mod wrap;

pub use metrics::*;
pub use wrap::*;
