//! PDF drawing surface
//!
//! Implements `DrawingSurface` on top of the page and resource model. Layout
//! coordinates are millimetres from the top-left corner; they are converted
//! to points from the bottom-left corner as operators are emitted.

use super::document::{image_resource_name, write_document, PdfPage};
use super::fonts::{encode_win_ansi, StandardFont};
use super::images::ImageXObject;
use super::options::PdfWriteOptions;
use super::writer::{PdfError, Result};
use layout_engine::{
    DrawingSurface, FontFamily, FontWeight, ImageKind, LayoutConfig, Rgb, MM_PER_POINT,
};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use text_engine::text_width;

fn to_points(mm: f64) -> f64 {
    mm / MM_PER_POINT
}

pub struct PdfSurface {
    /// Page size in points
    width: f64,
    height: f64,
    pages: Vec<PdfPage>,
    images: Vec<ImageXObject>,
    /// Data URL to index in `images`
    image_cache: HashMap<String, usize>,
    family: FontFamily,
    weight: FontWeight,
    font_size: f64,
    color: Rgb,
    options: PdfWriteOptions,
}

impl PdfSurface {
    /// Surface sized for `config`, titled after it
    pub fn new(config: &LayoutConfig) -> Self {
        let options = PdfWriteOptions::new().with_title(config.title.clone());
        Self::with_options(config, options)
    }

    pub fn with_options(config: &LayoutConfig, options: PdfWriteOptions) -> Self {
        let width = to_points(config.page_width);
        let height = to_points(config.page_height);
        Self {
            width,
            height,
            pages: vec![PdfPage::new(width, height)],
            images: Vec::new(),
            image_cache: HashMap::new(),
            family: FontFamily::Helvetica,
            weight: FontWeight::Normal,
            font_size: 16.0,
            color: Rgb::BLACK,
            options,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of distinct images decoded so far
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn write_to<W: Write>(&self, out: W) -> Result<W> {
        write_document(&self.pages, &self.images, &self.options, out)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.write_to(Vec::new())
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = self.write_to(BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }

    fn current_page(&mut self) -> &mut PdfPage {
        if self.pages.is_empty() {
            self.pages.push(PdfPage::new(self.width, self.height));
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn image_index(&mut self, data_url: &str, format: ImageKind) -> Result<usize> {
        if let Some(&index) = self.image_cache.get(data_url) {
            return Ok(index);
        }
        let image = ImageXObject::from_data_url(data_url, format)?;
        let index = self.images.len();
        self.images.push(image);
        self.image_cache.insert(data_url.to_string(), index);
        Ok(index)
    }
}

impl DrawingSurface for PdfSurface {
    type Error = PdfError;

    fn measure_text(&self, text: &str, font_size: f64) -> f64 {
        text_width(text, self.family, self.weight, font_size) * MM_PER_POINT
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn set_font(&mut self, family: FontFamily, weight: FontWeight) {
        self.family = family;
        self.weight = weight;
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) {
        let font = StandardFont::new(self.family, self.weight);
        let (size, color) = (self.font_size, self.color);
        let x = to_points(x);
        let y = self.height - to_points(y);
        let encoded = encode_win_ansi(text);

        let page = self.current_page();
        page.fonts.insert(font);
        page.content
            .begin_text()
            .set_font(font.resource_name(), size)
            .set_fill_rgb(
                color.r as f64 / 255.0,
                color.g as f64 / 255.0,
                color.b as f64 / 255.0,
            )
            .set_text_position(x, y)
            .show_text(&encoded)
            .end_text();
    }

    fn draw_image(
        &mut self,
        data_url: &str,
        format: ImageKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        let index = self.image_index(data_url, format)?;
        let (w, h) = (to_points(width), to_points(height));
        let left = to_points(x);
        let bottom = self.height - to_points(y) - h;

        let page = self.current_page();
        page.images.insert(index);
        page.content
            .save_state()
            .transform(w, 0.0, 0.0, h, left, bottom)
            .draw_xobject(&image_resource_name(index))
            .restore_state();
        Ok(())
    }

    fn new_page(&mut self) {
        self.pages.push(PdfPage::new(self.width, self.height));
    }

    fn save(&mut self, file_name: &str) -> Result<()> {
        self.save_to(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use layout_engine::ExportOptions;

    fn surface() -> PdfSurface {
        let config = ExportOptions::new().with_generated_on("now").resolve().unwrap();
        PdfSurface::with_options(&config, PdfWriteOptions::new().with_compression(false))
    }

    fn content(surface: &PdfSurface, page: usize) -> String {
        String::from_utf8(surface.pages[page].content.as_bytes().to_vec()).unwrap()
    }

    fn png_url() -> String {
        let img = image::RgbImage::from_pixel(4, 2, image::Rgb([200, 10, 10]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        format!("data:image/png;base64,{}", STANDARD.encode(out.into_inner()))
    }

    #[test]
    fn test_a4_in_points() {
        let surface = surface();
        assert!((surface.width - 595.2756).abs() < 1e-3);
        assert!((surface.height - 841.8898).abs() < 1e-3);
        assert_eq!(surface.page_count(), 1);
    }

    #[test]
    fn test_text_coordinates_flip_to_bottom_left() {
        let mut surface = surface();
        surface.set_font(FontFamily::Helvetica, FontWeight::Bold);
        surface.set_font_size(12.0);
        surface.set_text_color(Rgb::new(255, 0, 0));
        surface.draw_text("User:", 25.4, 25.4);

        let ops = content(&surface, 0);
        assert!(ops.contains("/F2 12 Tf"));
        assert!(ops.contains("1 0 0 rg"));
        assert!(ops.contains("1 0 0 1 72 769.8898 Tm"));
        assert!(ops.contains("(User:) Tj"));
    }

    #[test]
    fn test_measure_uses_current_face() {
        let mut surface = surface();
        surface.set_font(FontFamily::Helvetica, FontWeight::Normal);
        let normal = surface.measure_text("Hello", 10.0);
        surface.set_font(FontFamily::Helvetica, FontWeight::Bold);
        let bold = surface.measure_text("Hello", 10.0);
        assert!((normal - 22.78 * MM_PER_POINT).abs() < 1e-9);
        assert!(bold > normal);
    }

    #[test]
    fn test_new_page_receives_drawing() {
        let mut surface = surface();
        surface.draw_text("one", 20.0, 60.0);
        surface.new_page();
        surface.draw_text("two", 20.0, 60.0);

        assert_eq!(surface.page_count(), 2);
        assert!(content(&surface, 0).contains("(one)"));
        assert!(!content(&surface, 0).contains("(two)"));
        assert!(content(&surface, 1).contains("(two)"));
    }

    #[test]
    fn test_image_decoded_once() {
        let mut surface = surface();
        let url = png_url();
        surface.draw_image(&url, ImageKind::Png, 85.0, 20.0, 40.0, 12.0).unwrap();
        surface.new_page();
        surface.draw_image(&url, ImageKind::Png, 85.0, 20.0, 40.0, 12.0).unwrap();

        assert_eq!(surface.image_count(), 1);
        assert!(content(&surface, 1).contains("/Im0 Do"));
    }

    #[test]
    fn test_bad_image_draws_nothing() {
        let mut surface = surface();
        let result = surface.draw_image("data:image/png;base64,AAAA", ImageKind::Png, 0.0, 0.0, 1.0, 1.0);
        assert!(matches!(result, Err(PdfError::Image(_))));
        assert!(content(&surface, 0).is_empty());
        assert_eq!(surface.image_count(), 0);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");
        let mut surface = surface();
        surface.draw_text("x", 20.0, 60.0);
        let result = surface.save(path.to_str().unwrap());
        assert!(matches!(result, Err(PdfError::Io(_))));
    }
}
