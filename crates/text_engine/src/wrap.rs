//! Width-driven word wrapping
//!
//! Greedy line filling over Unicode line break opportunities (UAX #14):
//! 1. Split the text into segments at every break opportunity
//! 2. Append segments to the current line while its measured width fits
//! 3. Trailing whitespace never counts towards a line's width
//! 4. A segment wider than a whole line is split at grapheme boundaries
//!
//! The wrapper knows nothing about fonts; callers pass a measuring closure
//! that returns the width of a string in whatever unit `max_width` uses.

use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Wrap `text` into lines no wider than `max_width`.
///
/// Returns an empty vector for blank input. A single grapheme wider than
/// `max_width` is still emitted, alone on its line.
pub fn wrap_to_width<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    if text.trim().is_empty() {
        return lines;
    }

    let mut line = String::new();
    let mut start = 0;

    for (end, opportunity) in linebreaks(text) {
        let segment = &text[start..end];
        start = end;

        let mut candidate = line.clone();
        candidate.push_str(segment);

        if measure(candidate.trim_end()) <= max_width {
            line = candidate;
        } else {
            flush(&mut lines, &mut line);
            line = fit_segment(segment, max_width, &measure, &mut lines);
        }

        if opportunity == BreakOpportunity::Mandatory && end < text.len() {
            flush(&mut lines, &mut line);
        }
    }

    flush(&mut lines, &mut line);
    lines
}

/// Push the current line (without trailing whitespace) if it has content
fn flush(lines: &mut Vec<String>, line: &mut String) {
    let trimmed = line.trim_end();
    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
    line.clear();
}

/// Place a segment on a fresh line, splitting it at grapheme boundaries when
/// it is wider than the line. Returns whatever is left over for the next line.
fn fit_segment<F>(segment: &str, max_width: f64, measure: &F, lines: &mut Vec<String>) -> String
where
    F: Fn(&str) -> f64,
{
    if measure(segment.trim_end()) <= max_width {
        return segment.to_string();
    }

    let mut chunk = String::new();
    for grapheme in segment.graphemes(true) {
        let mut candidate = chunk.clone();
        candidate.push_str(grapheme);

        if measure(candidate.trim_end()) > max_width && !chunk.trim_end().is_empty() {
            flush(lines, &mut chunk);
            chunk.push_str(grapheme);
        } else {
            chunk = candidate;
        }
    }
    chunk
}

/// Marker appended to text shortened by `truncate_to_width`
pub const ELLIPSIS: &str = "...";

/// Shorten `text` at a grapheme boundary so that it, plus a trailing
/// ellipsis, fits `max_width`. Text that already fits is returned unchanged.
pub fn truncate_to_width<F>(text: &str, max_width: f64, measure: F) -> String
where
    F: Fn(&str) -> f64,
{
    if measure(text) <= max_width {
        return text.to_string();
    }

    let mut kept = String::new();
    for grapheme in text.graphemes(true) {
        let mut candidate = kept.clone();
        candidate.push_str(grapheme);
        if measure(&format!("{}{}", candidate.trim_end(), ELLIPSIS)) > max_width {
            break;
        }
        kept = candidate;
    }

    format!("{}{}", kept.trim_end(), ELLIPSIS)
}
