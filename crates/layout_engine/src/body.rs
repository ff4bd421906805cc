//! Message body wrapping
//!
//! Bodies wrap in two levels. Explicit `\n` separators are kept as paragraph
//! breaks, then each non-blank paragraph is wrapped to the line width by the
//! drawing surface. One blank line follows every paragraph except the last.

/// One output line of a message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyLine {
    Text(String),
    /// Paragraph spacing; advances half a line
    Blank,
}

impl BodyLine {
    pub fn is_blank(&self) -> bool {
        matches!(self, BodyLine::Blank)
    }
}

/// Split `text` into body lines, wrapping each paragraph with `wrap`.
///
/// Empty and whitespace-only text yields a single blank line.
pub fn wrap_body<W>(text: &str, mut wrap: W) -> Vec<BodyLine>
where
    W: FnMut(&str) -> Vec<String>,
{
    if text.trim().is_empty() {
        return vec![BodyLine::Blank];
    }

    let paragraphs: Vec<&str> = text.split('\n').collect();
    let last = paragraphs.len() - 1;
    let mut lines = Vec::new();

    for (index, paragraph) in paragraphs.iter().enumerate() {
        let paragraph = paragraph.trim_end_matches('\r');
        if !paragraph.trim().is_empty() {
            lines.extend(wrap(paragraph).into_iter().map(BodyLine::Text));
        }
        if index < last {
            lines.push(BodyLine::Blank);
        }
    }

    lines
}
