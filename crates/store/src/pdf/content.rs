//! PDF Content Stream Generation
//!
//! Builder for the page operators the transcript renderer uses:
//! - BT/ET, Tf, Tm, Tj for text
//! - rg for fill color
//! - q/Q, cm, Do for image placement
//!
//! Coordinates here are already PDF user space (points, origin bottom-left).

use super::objects::{format_number, write_literal};

#[derive(Debug, Clone, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// q
    pub fn save_state(&mut self) -> &mut Self {
        self.op("q")
    }

    /// Q
    pub fn restore_state(&mut self) -> &mut Self {
        self.op("Q")
    }

    /// cm
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.numbers(&[a, b, c, d, e, f]);
        self.op("cm")
    }

    /// rg, components in 0..=1
    pub fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.numbers(&[r, g, b]);
        self.op("rg")
    }

    pub fn begin_text(&mut self) -> &mut Self {
        self.op("BT")
    }

    pub fn end_text(&mut self) -> &mut Self {
        self.op("ET")
    }

    /// Tf with a font resource name such as `F1`
    pub fn set_font(&mut self, resource: &str, size: f64) -> &mut Self {
        self.name(resource);
        self.numbers(&[size]);
        self.op("Tf")
    }

    /// Tm with an unscaled matrix at (`x`, `y`)
    pub fn set_text_position(&mut self, x: f64, y: f64) -> &mut Self {
        self.numbers(&[1.0, 0.0, 0.0, 1.0, x, y]);
        self.op("Tm")
    }

    /// Tj with bytes already in the font's encoding
    pub fn show_text(&mut self, encoded: &[u8]) -> &mut Self {
        write_literal(encoded, &mut self.data);
        self.data.push(b' ');
        self.op("Tj")
    }

    /// Do with an XObject resource name such as `Im0`
    pub fn draw_xobject(&mut self, resource: &str) -> &mut Self {
        self.name(resource);
        self.op("Do")
    }

    fn name(&mut self, name: &str) {
        self.data.push(b'/');
        self.data.extend_from_slice(name.as_bytes());
        self.data.push(b' ');
    }

    fn numbers(&mut self, values: &[f64]) {
        for value in values {
            self.data.extend_from_slice(format_number(*value).as_bytes());
            self.data.push(b' ');
        }
    }

    fn op(&mut self, operator: &str) -> &mut Self {
        self.data.extend_from_slice(operator.as_bytes());
        self.data.push(b'\n');
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &ContentStream) -> String {
        String::from_utf8(content.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_text_object() {
        let mut content = ContentStream::new();
        content
            .begin_text()
            .set_font("F2", 12.0)
            .set_fill_rgb(1.0, 0.0, 0.5)
            .set_text_position(56.6929, 700.0)
            .show_text(b"User: (a)")
            .end_text();

        assert_eq!(
            text(&content),
            "BT\n/F2 12 Tf\n1 0 0.5 rg\n1 0 0 1 56.6929 700 Tm\n(User: \\(a\\)) Tj\nET\n"
        );
    }

    #[test]
    fn test_image_placement() {
        let mut content = ContentStream::new();
        content
            .save_state()
            .transform(113.0, 0.0, 0.0, 34.0, 241.0, 730.0)
            .draw_xobject("Im0")
            .restore_state();

        assert_eq!(text(&content), "q\n113 0 0 34 241 730 cm\n/Im0 Do\nQ\n");
    }

    #[test]
    fn test_empty() {
        assert!(ContentStream::new().is_empty());
    }
}
