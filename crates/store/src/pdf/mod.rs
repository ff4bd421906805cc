//! PDF Export Module
//!
//! Renders laid-out transcripts to PDF files.
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Stream, ObjectId)
//! - `content`: Content stream operators
//! - `fonts`: Standard Type 1 fonts and WinAnsi text encoding
//! - `images`: Data URL decoding and image XObjects
//! - `document`: Pages, shared resources and the object graph
//! - `writer`: File structure (objects, xref, trailer)
//! - `surface`: `DrawingSurface` implementation
//! - `options`: Writer configuration
//! - `api`: Public API for PDF export

mod api;
mod content;
mod document;
mod fonts;
mod images;
mod objects;
mod options;
mod surface;
mod writer;

pub use api::*;
pub use fonts::{encode_win_ansi, StandardFont};
pub use images::{ImageError, ImageXObject};
pub use options::*;
pub use surface::PdfSurface;
pub use writer::PdfError;

#[cfg(test)]
mod tests;
