//! Export entry points
//!
//! `export_conversation` lays out a message list and saves it through a
//! drawing surface. The exchange and conversation-list variants build the
//! message list themselves and render with the research palette.

use crate::{
    conversation_messages, exchange_messages, Colors, Conversation, DrawingSurface, ExportOptions,
    ExportSummary, LayoutConfig, LayoutError, Message, Result, Separator, TranscriptPaginator,
};

/// Default file name for a single query/response exchange
pub const EXCHANGE_FILE_NAME: &str = "Sales_Centri_research_conversation.pdf";
/// Default file name for a list of exchanges
pub const CONVERSATIONS_FILE_NAME: &str = "Sales_Centri_research_conversations.pdf";
/// Default title for research exports
pub const RESEARCH_TITLE: &str = "Sales Centri Research Conversation";

/// Result of an export call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to export; no document was created
    Skipped,
    Saved(ExportSummary),
}

impl ExportOutcome {
    pub fn summary(&self) -> Option<&ExportSummary> {
        match self {
            ExportOutcome::Skipped => None,
            ExportOutcome::Saved(summary) => Some(summary),
        }
    }
}

/// Lay `messages` out on `surface` without saving
pub fn layout_conversation<S: DrawingSurface>(
    messages: &[Message],
    config: &LayoutConfig,
    surface: S,
) -> (S, ExportSummary) {
    let mut paginator = TranscriptPaginator::new(config, surface);
    paginator.render(messages);
    paginator.finish()
}

/// Render `messages` and save the document under the configured file name.
///
/// `open_surface` is only called once there is something to draw, so an
/// empty message list creates no document at all.
pub fn export_conversation<S, F>(
    messages: &[Message],
    options: &ExportOptions,
    open_surface: F,
) -> Result<ExportOutcome>
where
    S: DrawingSurface,
    F: FnOnce(&LayoutConfig) -> S,
{
    if messages.is_empty() {
        tracing::warn!("No messages to export");
        return Ok(ExportOutcome::Skipped);
    }

    let config = options.resolve()?;
    let surface = open_surface(&config);
    let (mut surface, summary) = layout_conversation(messages, &config, surface);

    if let Err(e) = surface.save(&config.file_name) {
        tracing::error!("Failed to save PDF {}: {}", config.file_name, e);
        return Err(LayoutError::Save {
            file_name: config.file_name.clone(),
            source: Box::new(e),
        });
    }

    tracing::info!(
        "Exported {} messages to {} ({} pages)",
        messages.len(),
        summary.file_name,
        summary.pages
    );
    Ok(ExportOutcome::Saved(summary))
}

/// Export one query/response pair.
///
/// Without a timestamp the current local time (`3:07 PM`) is used.
pub fn export_exchange<S, F>(
    query: &str,
    response: &str,
    timestamp: Option<&str>,
    options: &ExportOptions,
    open_surface: F,
) -> Result<ExportOutcome>
where
    S: DrawingSurface,
    F: FnOnce(&LayoutConfig) -> S,
{
    let messages = exchange_messages(query, response, timestamp);
    let options = research_options(options, EXCHANGE_FILE_NAME);
    export_conversation(&messages, &options, open_surface)
}

/// Export several exchanges into one document, with `separator` between them
pub fn export_conversations<S, F>(
    conversations: &[Conversation],
    separator: &Separator,
    options: &ExportOptions,
    open_surface: F,
) -> Result<ExportOutcome>
where
    S: DrawingSurface,
    F: FnOnce(&LayoutConfig) -> S,
{
    let messages = conversation_messages(conversations, separator);
    let options = research_options(options, CONVERSATIONS_FILE_NAME);
    export_conversation(&messages, &options, open_surface)
}

/// Research exports always use the research palette
fn research_options(options: &ExportOptions, file_name: &str) -> ExportOptions {
    let mut options = options.clone();
    options.colors = Some(Colors::research().into());
    if options.file_name.is_none() {
        options.file_name = Some(file_name.to_string());
    }
    if options.title.is_none() {
        options.title = Some(RESEARCH_TITLE.to_string());
    }
    options
}
