//! Store - PDF output for chat transcripts
//!
//! This crate provides the PDF drawing surface used by the transcript layout
//! engine, the PDF file writer behind it and the file-level export API.

pub mod pdf;

pub use pdf::{
    export_conversation, export_conversations, export_conversations_with_separator,
    export_exchange, render_conversation_bytes, PdfError, PdfSurface, PdfWriteOptions,
};
