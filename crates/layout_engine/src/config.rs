//! Layout configuration
//!
//! `ExportOptions` is what callers pass: every field optional, deserializable
//! from partial JSON. `ExportOptions::resolve` merges it over the defaults and
//! validates the result into an immutable `LayoutConfig`.
//!
//! Merge rules:
//! - `margin`, `font_size` and `colors` merge key by key against their own
//!   defaults
//! - every other field replaces the default wholesale
//!
//! Lengths are millimetres, font sizes are points.

use crate::{LayoutError, PageGeometry, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point
pub const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Height reserved at the top of every page for logo, title and date
pub const HEADER_HEIGHT: f64 = 35.0;

/// Horizontal offset of message bodies relative to the role line
pub const BODY_INDENT: f64 = 5.0;

/// Vertical gap between consecutive messages, in body lines
pub const MESSAGE_GAP_LINES: f64 = 0.8;

pub const DEFAULT_FILE_NAME: &str = "chat_output.pdf";
pub const DEFAULT_TITLE: &str = "Chat Conversation";

/// An sRGB color with 8-bit channels, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const GRAY: Rgb = Rgb::new(110, 110, 110);
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

/// Four-sided page margin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

/// Font sizes in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSizes {
    /// Role label size
    pub role: f64,
    /// Message body size
    pub body: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            role: 12.0,
            body: 10.0,
        }
    }
}

/// Text colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    /// Label color for `User` messages
    pub user: Rgb,
    /// Label color for every other role
    pub bot: Rgb,
    /// Body text color
    pub text: Rgb,
}

impl Colors {
    /// Fixed scheme used by the research conversation exports
    pub fn research() -> Self {
        Self {
            user: Rgb::new(30, 64, 175),
            bot: Rgb::new(5, 150, 105),
            text: Rgb::new(17, 24, 39),
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            user: Rgb::new(37, 99, 235),
            bot: Rgb::new(22, 163, 74),
            text: Rgb::new(33, 33, 33),
        }
    }
}

/// Raster format of a branding image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

/// Branding image centered at the top of every page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    /// `data:image/...;base64,` URL or bare base64
    pub data_url: String,
    #[serde(default)]
    pub format: ImageKind,
    #[serde(default = "default_logo_width")]
    pub width: f64,
    #[serde(default = "default_logo_height")]
    pub height: f64,
}

fn default_logo_width() -> f64 {
    40.0
}

fn default_logo_height() -> f64 {
    12.0
}

impl Logo {
    pub fn new(data_url: impl Into<String>, format: ImageKind) -> Self {
        Self {
            data_url: data_url.into(),
            format,
            width: default_logo_width(),
            height: default_logo_height(),
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Effective configuration for one export run
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub file_name: String,
    pub title: String,
    pub page_width: f64,
    pub page_height: f64,
    pub margin: Margins,
    pub font_size: FontSizes,
    /// Multiplier applied to a font size to get a line's advance
    pub line_height: f64,
    pub colors: Colors,
    pub logo: Option<Logo>,
    /// Date string stamped under the title
    pub generated_on: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            title: DEFAULT_TITLE.to_string(),
            page_width: 210.0,
            page_height: 297.0,
            margin: Margins::default(),
            font_size: FontSizes::default(),
            line_height: 1.4,
            colors: Colors::default(),
            logo: None,
            generated_on: current_date_stamp(),
        }
    }
}

impl LayoutConfig {
    /// Vertical advance of a line set at `font_size` points
    pub fn line_advance(&self, font_size: f64) -> f64 {
        font_size * self.line_height * MM_PER_POINT
    }

    pub fn role_line_height(&self) -> f64 {
        self.line_advance(self.font_size.role)
    }

    pub fn body_line_height(&self) -> f64 {
        self.line_advance(self.font_size.body)
    }

    /// Left edge of message bodies
    pub fn body_x(&self) -> f64 {
        self.margin.left + BODY_INDENT
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> f64 {
        self.page_width - self.margin.left - self.margin.right
    }

    /// Maximum width of a wrapped body line
    pub fn body_width(&self) -> f64 {
        self.content_width() - BODY_INDENT
    }

    /// Vertical band that message lines may occupy
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            content_top: self.margin.top + HEADER_HEIGHT,
            content_bottom: self.page_height - self.margin.bottom,
        }
    }

    fn validate(&self) -> Result<()> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if !positive(self.page_width) || !positive(self.page_height) {
            return Err(LayoutError::InvalidPageSetup(format!(
                "page size must be positive, got {} x {}",
                self.page_width, self.page_height
            )));
        }

        let m = &self.margin;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(LayoutError::InvalidPageSetup(format!(
                "margins must be non-negative, got {:?}",
                m
            )));
        }

        let geometry = self.geometry();
        if geometry.content_bottom <= geometry.content_top {
            return Err(LayoutError::InvalidPageSetup(format!(
                "no room for content between {} and {}",
                geometry.content_top, geometry.content_bottom
            )));
        }

        if self.body_width() <= 0.0 {
            return Err(LayoutError::InvalidPageSetup(format!(
                "no room for message text: body width {}",
                self.body_width()
            )));
        }

        if !positive(self.font_size.role) || !positive(self.font_size.body) {
            return Err(LayoutError::InvalidPageSetup(format!(
                "font sizes must be positive, got {:?}",
                self.font_size
            )));
        }

        if !positive(self.line_height) {
            return Err(LayoutError::InvalidPageSetup(format!(
                "line height must be positive, got {}",
                self.line_height
            )));
        }

        Ok(())
    }
}

/// Date stamp printed under the title
pub fn current_date_stamp() -> String {
    Local::now().format("%m/%d/%Y, %-I:%M:%S %p").to_string()
}

/// Partial margin override
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginOverrides {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl MarginOverrides {
    pub fn apply(&self, base: Margins) -> Margins {
        Margins {
            top: self.top.unwrap_or(base.top),
            right: self.right.unwrap_or(base.right),
            bottom: self.bottom.unwrap_or(base.bottom),
            left: self.left.unwrap_or(base.left),
        }
    }
}

/// Partial font size override
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizeOverrides {
    pub role: Option<f64>,
    pub body: Option<f64>,
}

impl FontSizeOverrides {
    pub fn apply(&self, base: FontSizes) -> FontSizes {
        FontSizes {
            role: self.role.unwrap_or(base.role),
            body: self.body.unwrap_or(base.body),
        }
    }
}

/// Partial color override
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    pub user: Option<Rgb>,
    pub bot: Option<Rgb>,
    pub text: Option<Rgb>,
}

impl ColorOverrides {
    pub fn apply(&self, base: Colors) -> Colors {
        Colors {
            user: self.user.unwrap_or(base.user),
            bot: self.bot.unwrap_or(base.bot),
            text: self.text.unwrap_or(base.text),
        }
    }
}

impl From<Colors> for ColorOverrides {
    fn from(colors: Colors) -> Self {
        Self {
            user: Some(colors.user),
            bot: Some(colors.bot),
            text: Some(colors.text),
        }
    }
}

/// Caller-supplied options for an export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub file_name: Option<String>,
    pub title: Option<String>,
    pub page_width: Option<f64>,
    pub page_height: Option<f64>,
    pub margin: Option<MarginOverrides>,
    pub font_size: Option<FontSizeOverrides>,
    pub line_height: Option<f64>,
    pub colors: Option<ColorOverrides>,
    pub logo: Option<Logo>,
    pub generated_on: Option<String>,
}

impl ExportOptions {
    /// Create empty options (all defaults)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = Some(width);
        self.page_height = Some(height);
        self
    }

    pub fn with_margin(mut self, margin: MarginOverrides) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn with_font_size(mut self, font_size: FontSizeOverrides) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn with_colors(mut self, colors: ColorOverrides) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn with_generated_on(mut self, generated_on: impl Into<String>) -> Self {
        self.generated_on = Some(generated_on.into());
        self
    }

    /// Merge over the defaults and validate
    pub fn resolve(&self) -> Result<LayoutConfig> {
        let defaults = LayoutConfig {
            generated_on: String::new(),
            ..LayoutConfig::default()
        };

        let config = LayoutConfig {
            file_name: self.file_name.clone().unwrap_or(defaults.file_name),
            title: self.title.clone().unwrap_or(defaults.title),
            page_width: self.page_width.unwrap_or(defaults.page_width),
            page_height: self.page_height.unwrap_or(defaults.page_height),
            margin: self
                .margin
                .map_or(defaults.margin, |m| m.apply(defaults.margin)),
            font_size: self
                .font_size
                .map_or(defaults.font_size, |f| f.apply(defaults.font_size)),
            line_height: self.line_height.unwrap_or(defaults.line_height),
            colors: self
                .colors
                .map_or(defaults.colors, |c| c.apply(defaults.colors)),
            logo: self.logo.clone(),
            generated_on: self
                .generated_on
                .clone()
                .unwrap_or_else(current_date_stamp),
        };

        config.validate()?;
        Ok(config)
    }
}
