//! Drawing surface
//!
//! The primitives the transcript layout needs from a document backend. The
//! PDF implementation lives in the `store` crate.
//!
//! Coordinates are in the document unit (millimetres) with the origin at the
//! top-left corner of the page; `draw_text` places the text baseline at `y`.

use crate::{ImageKind, Rgb};
use std::error::Error;
use text_engine::wrap_to_width;

pub use text_engine::{FontFamily, FontWeight};

pub trait DrawingSurface {
    /// Error returned by fallible operations
    type Error: Error + Send + Sync + 'static;

    /// Width of `text` in the current font at `font_size` points
    fn measure_text(&self, text: &str, font_size: f64) -> f64;

    /// Current font size in points
    fn font_size(&self) -> f64;

    /// Wrap `text` into lines no wider than `max_width` in the current font
    fn wrap_text(&self, text: &str, max_width: f64) -> Vec<String> {
        let size = self.font_size();
        wrap_to_width(text, max_width, |s| self.measure_text(s, size))
    }

    fn set_font(&mut self, family: FontFamily, weight: FontWeight);

    fn set_font_size(&mut self, size: f64);

    fn set_text_color(&mut self, color: Rgb);

    /// Place `text` with its baseline at (`x`, `y`)
    fn draw_text(&mut self, text: &str, x: f64, y: f64);

    /// Place a raster image with its top-left corner at (`x`, `y`)
    fn draw_image(
        &mut self,
        data_url: &str,
        format: ImageKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), Self::Error>;

    /// Append a blank page and make it current
    fn new_page(&mut self);

    /// Serialize every page to `file_name`
    fn save(&mut self, file_name: &str) -> Result<(), Self::Error>;
}
