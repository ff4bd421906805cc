//! In-memory drawing surface for layout tests

use crate::{DrawingSurface, FontFamily, FontWeight, ImageKind, Rgb, MM_PER_POINT};
use std::cell::RefCell;
use std::rc::Rc;
use text_engine::text_width;

#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("image rejected: {0}")]
    Image(String),
    #[error("save rejected: {0}")]
    Save(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub size: f64,
    pub weight: FontWeight,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default)]
pub struct RecordedPage {
    pub texts: Vec<DrawnText>,
    pub images: usize,
}

impl RecordedPage {
    pub fn find(&self, text: &str) -> Option<&DrawnText> {
        self.texts.iter().find(|t| t.text == text)
    }

    /// Texts excluding the header and the footer
    pub fn content_lines(&self) -> impl Iterator<Item = &DrawnText> {
        let count = self.texts.len();
        self.texts.iter().take(count.saturating_sub(1)).skip(2)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub pages: Vec<RecordedPage>,
    pub saved: Vec<String>,
    pub fail_images: bool,
    pub fail_save: bool,
}

pub struct RecordingSurface {
    recording: Rc<RefCell<Recording>>,
    family: FontFamily,
    weight: FontWeight,
    size: f64,
    color: Rgb,
}

impl RecordingSurface {
    /// A surface with one open page, plus a handle to what it records
    pub fn new() -> (Self, Rc<RefCell<Recording>>) {
        let recording = Rc::new(RefCell::new(Recording {
            pages: vec![RecordedPage::default()],
            ..Default::default()
        }));
        let surface = Self {
            recording: Rc::clone(&recording),
            family: FontFamily::Helvetica,
            weight: FontWeight::Normal,
            size: 16.0,
            color: Rgb::BLACK,
        };
        (surface, recording)
    }
}

impl DrawingSurface for RecordingSurface {
    type Error = RecordingError;

    fn measure_text(&self, text: &str, font_size: f64) -> f64 {
        text_width(text, self.family, self.weight, font_size) * MM_PER_POINT
    }

    fn font_size(&self) -> f64 {
        self.size
    }

    fn set_font(&mut self, family: FontFamily, weight: FontWeight) {
        self.family = family;
        self.weight = weight;
    }

    fn set_font_size(&mut self, size: f64) {
        self.size = size;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) {
        let drawn = DrawnText {
            text: text.to_string(),
            x,
            y,
            width: self.measure_text(text, self.size),
            size: self.size,
            weight: self.weight,
            color: self.color,
        };
        let mut recording = self.recording.borrow_mut();
        if let Some(page) = recording.pages.last_mut() {
            page.texts.push(drawn);
        }
    }

    fn draw_image(
        &mut self,
        data_url: &str,
        _format: ImageKind,
        _x: f64,
        _y: f64,
        _width: f64,
        _height: f64,
    ) -> Result<(), Self::Error> {
        let mut recording = self.recording.borrow_mut();
        if recording.fail_images {
            return Err(RecordingError::Image(data_url.to_string()));
        }
        if let Some(page) = recording.pages.last_mut() {
            page.images += 1;
        }
        Ok(())
    }

    fn new_page(&mut self) {
        self.recording.borrow_mut().pages.push(RecordedPage::default());
    }

    fn save(&mut self, file_name: &str) -> Result<(), Self::Error> {
        let mut recording = self.recording.borrow_mut();
        if recording.fail_save {
            return Err(RecordingError::Save(file_name.to_string()));
        }
        recording.saved.push(file_name.to_string());
        Ok(())
    }
}
