//! PDF writer options

use chrono::{DateTime, Utc};

/// Header version written by the document writer
pub const PDF_VERSION: &str = "1.4";

/// Knobs for serializing a drawn document
#[derive(Debug, Clone, PartialEq)]
pub struct PdfWriteOptions {
    pub title: Option<String>,
    pub creator: String,
    pub producer: String,
    /// Flate-compress page content streams
    pub compress: bool,
    /// Fixed creation date; the time of writing when unset
    pub creation_date: Option<DateTime<Utc>>,
}

impl Default for PdfWriteOptions {
    fn default() -> Self {
        Self {
            title: None,
            creator: "Sales Centri".to_string(),
            producer: concat!("chat-pdf ", env!("CARGO_PKG_VERSION")).to_string(),
            compress: true,
            creation_date: None,
        }
    }
}

impl PdfWriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Creation date in PDF date syntax, e.g. `D:20261014093000Z`
    pub fn pdf_date(&self) -> String {
        let date = self.creation_date.unwrap_or_else(Utc::now);
        date.format("D:%Y%m%d%H%M%SZ").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let options = PdfWriteOptions::default();
        assert!(options.compress);
        assert!(options.producer.starts_with("chat-pdf "));
        assert!(options.title.is_none());
        assert!(options.creation_date.is_none());
    }

    #[test]
    fn test_builders() {
        let options = PdfWriteOptions::new()
            .with_title("Chat")
            .with_compression(false);
        assert_eq!(options.title.as_deref(), Some("Chat"));
        assert!(!options.compress);
    }

    #[test]
    fn test_pdf_date() {
        let date = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 5).unwrap();
        let options = PdfWriteOptions::new().with_creation_date(date);
        assert_eq!(options.pdf_date(), "D:20261014093005Z");
    }
}
