//! PDF Export Public API
//!
//! File-writing entry points backed by `PdfSurface`, plus an in-memory
//! variant for callers that stream the bytes elsewhere.

use super::surface::PdfSurface;
use super::writer::{PdfError, Result};
use layout_engine::{
    layout_conversation, Conversation, ExportOptions, ExportOutcome, LayoutError, Message,
    Separator,
};

/// Export a conversation to the PDF file named by `options`
///
/// # Example
///
/// ```ignore
/// use layout_engine::{ExportOptions, Message};
/// use store::pdf::export_conversation;
///
/// let messages = vec![Message::user("Hello"), Message::bot("Hi there")];
/// export_conversation(&messages, &ExportOptions::new().with_file_name("chat.pdf"))?;
/// ```
pub fn export_conversation(
    messages: &[Message],
    options: &ExportOptions,
) -> std::result::Result<ExportOutcome, LayoutError> {
    layout_engine::export_conversation(messages, options, PdfSurface::new)
}

/// Export a single query/response pair in the research layout
pub fn export_exchange(
    query: &str,
    response: &str,
    timestamp: Option<&str>,
    options: &ExportOptions,
) -> std::result::Result<ExportOutcome, LayoutError> {
    layout_engine::export_exchange(query, response, timestamp, options, PdfSurface::new)
}

/// Export a list of exchanges, separated by the default separator
pub fn export_conversations(
    conversations: &[Conversation],
    options: &ExportOptions,
) -> std::result::Result<ExportOutcome, LayoutError> {
    export_conversations_with_separator(conversations, &Separator::default(), options)
}

pub fn export_conversations_with_separator(
    conversations: &[Conversation],
    separator: &Separator,
    options: &ExportOptions,
) -> std::result::Result<ExportOutcome, LayoutError> {
    layout_engine::export_conversations(conversations, separator, options, PdfSurface::new)
}

/// Render a conversation to PDF bytes without touching the file system.
///
/// Returns `None` when there are no messages.
pub fn render_conversation_bytes(
    messages: &[Message],
    options: &ExportOptions,
) -> Result<Option<Vec<u8>>> {
    if messages.is_empty() {
        tracing::warn!("No messages to render");
        return Ok(None);
    }

    let config = options
        .resolve()
        .map_err(|e| PdfError::InvalidDocument(e.to_string()))?;
    let (surface, summary) = layout_conversation(messages, &config, PdfSurface::new(&config));
    let bytes = surface.to_bytes()?;
    tracing::debug!(
        "Rendered {} messages into {} pages ({} bytes)",
        messages.len(),
        summary.pages,
        bytes.len()
    );
    Ok(Some(bytes))
}
