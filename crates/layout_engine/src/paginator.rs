//! Transcript Pagination
//!
//! Flows role-tagged messages onto fixed-size pages:
//! - Every page gets a header (logo, title, generation date) when it opens
//!   and a `Page N` footer when it closes
//! - Each line is placed before it is drawn; a line that would cross the
//!   content bottom closes the page and continues on a fresh one
//! - Message bodies are wrapped by the drawing surface, indented below the
//!   bold role line

use crate::{
    wrap_body, BodyLine, Cursor, DrawingSurface, FontFamily, FontWeight, LayoutConfig, Message,
    PageGeometry, Rgb, MESSAGE_GAP_LINES, MM_PER_POINT,
};
use text_engine::truncate_to_width;

/// Title baseline, measured down from the top margin
const TITLE_BASELINE: f64 = 22.0;
/// Date baseline, measured down from the top margin
const DATE_BASELINE: f64 = 29.0;

const TITLE_FONT_SIZE: f64 = 16.0;
const DATE_FONT_SIZE: f64 = 10.0;
const FOOTER_FONT_SIZE: f64 = 9.0;

/// Font, size and color applied before drawing
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextStyle {
    weight: FontWeight,
    size: f64,
    color: Rgb,
}

impl TextStyle {
    fn new(weight: FontWeight, size: f64, color: Rgb) -> Self {
        Self { weight, size, color }
    }
}

/// Counts reported after a layout run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub file_name: String,
    /// Number of pages produced
    pub pages: u32,
    /// Role and body text lines drawn (blank lines excluded)
    pub lines: usize,
}

/// Lays messages out on a drawing surface
pub struct TranscriptPaginator<'a, S: DrawingSurface> {
    config: &'a LayoutConfig,
    geometry: PageGeometry,
    surface: S,
    cursor: Cursor,
    lines: usize,
}

impl<'a, S: DrawingSurface> TranscriptPaginator<'a, S> {
    /// Create a paginator and stamp the first page's header
    pub fn new(config: &'a LayoutConfig, surface: S) -> Self {
        let geometry = config.geometry();
        let mut paginator = Self {
            config,
            geometry,
            surface,
            cursor: Cursor::start(&geometry),
            lines: 0,
        };
        paginator.stamp_header();
        paginator
    }

    /// Current cursor
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Render all messages in order, with a gap between consecutive ones
    pub fn render(&mut self, messages: &[Message]) {
        for (index, message) in messages.iter().enumerate() {
            self.render_message(message);
            if index + 1 < messages.len() {
                let gap = self.config.body_line_height() * MESSAGE_GAP_LINES;
                self.cursor = self.cursor.skip(gap);
            }
        }
    }

    /// Render one message: role line, then the wrapped body
    pub fn render_message(&mut self, message: &Message) {
        let config = self.config;
        let role_color = if message.role.is_user() {
            config.colors.user
        } else {
            config.colors.bot
        };
        let role_style = TextStyle::new(FontWeight::Bold, config.font_size.role, role_color);
        let body_style = TextStyle::new(FontWeight::Normal, config.font_size.body, config.colors.text);

        // Long role lines (long timestamps) wrap like body text
        self.apply_style(role_style);
        let role_height = config.role_line_height();
        for line in self.surface.wrap_text(&message.role_line(), config.content_width()) {
            let top = self.place(role_height);
            self.draw(&line, config.margin.left, top, role_style);
        }

        // Wrapping measures with the current font, so set the body font first
        self.apply_style(body_style);
        let width = config.body_width();
        let surface = &self.surface;
        let body = wrap_body(&message.text, |paragraph| surface.wrap_text(paragraph, width));

        let line_height = config.body_line_height();
        for line in body {
            match line {
                BodyLine::Text(text) => {
                    let top = self.place(line_height);
                    self.draw(&text, config.body_x(), top, body_style);
                }
                BodyLine::Blank => {
                    self.cursor = self.cursor.advance(line_height / 2.0, &self.geometry);
                }
            }
        }
    }

    /// Stamp the last page's footer and hand back the surface
    pub fn finish(mut self) -> (S, ExportSummary) {
        self.stamp_footer();
        let summary = ExportSummary {
            file_name: self.config.file_name.clone(),
            pages: self.cursor.page,
            lines: self.lines,
        };
        (self.surface, summary)
    }

    /// Reserve `height` for the next line, breaking the page if needed.
    /// Returns the line's top edge.
    fn place(&mut self, height: f64) -> f64 {
        let placement = self.cursor.place(height, &self.geometry);
        if placement.page_break {
            self.stamp_footer();
            self.surface.new_page();
            tracing::debug!("Starting page {}", placement.cursor.page);
        }
        self.cursor = placement.cursor;
        if placement.page_break {
            self.stamp_header();
        }
        placement.top
    }

    /// Draw a content line whose box starts at `top`
    fn draw(&mut self, text: &str, x: f64, top: f64, style: TextStyle) {
        self.apply_style(style);
        let baseline = top + style.size * MM_PER_POINT;
        self.surface.draw_text(text, x, baseline);
        self.lines += 1;
    }

    fn apply_style(&mut self, style: TextStyle) {
        self.surface.set_font(FontFamily::Helvetica, style.weight);
        self.surface.set_font_size(style.size);
        self.surface.set_text_color(style.color);
    }

    /// Draw one centered line, shortened to fit between the margins
    fn draw_centered(&mut self, text: &str, baseline: f64, style: TextStyle) {
        self.apply_style(style);
        let surface = &self.surface;
        let text = truncate_to_width(text, self.config.content_width(), |s| {
            surface.measure_text(s, style.size)
        });
        let text = text.as_str();
        let width = self.surface.measure_text(text, style.size);
        let x = (self.config.page_width - width) / 2.0;
        self.surface.draw_text(text, x, baseline);
    }

    fn stamp_header(&mut self) {
        let config = self.config;
        let top = config.margin.top;

        if let Some(logo) = &config.logo {
            let x = (config.page_width - logo.width) / 2.0;
            if let Err(e) = self
                .surface
                .draw_image(&logo.data_url, logo.format, x, top, logo.width, logo.height)
            {
                tracing::debug!("Skipping logo on page {}: {}", self.cursor.page, e);
            }
        }

        let title_style = TextStyle::new(FontWeight::Bold, TITLE_FONT_SIZE, Rgb::BLACK);
        self.draw_centered(&config.title, top + TITLE_BASELINE, title_style);

        let date_style = TextStyle::new(FontWeight::Normal, DATE_FONT_SIZE, Rgb::GRAY);
        let generated = format!("Generated on: {}", config.generated_on);
        self.draw_centered(&generated, top + DATE_BASELINE, date_style);
    }

    fn stamp_footer(&mut self) {
        let config = self.config;
        let baseline = config.page_height - config.margin.bottom / 2.0;
        let style = TextStyle::new(FontWeight::Normal, FOOTER_FONT_SIZE, Rgb::GRAY);
        let label = format!("Page {}", self.cursor.page);
        self.draw_centered(&label, baseline, style);
    }
}
