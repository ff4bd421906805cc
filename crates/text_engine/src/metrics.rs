//! Standard font metrics
//!
//! Advance widths for the standard PDF faces this workspace draws with, in
//! thousandths of an em. Values come from the Adobe Core 14 AFM files and
//! cover printable ASCII (0x20..=0x7E); other characters use the face's
//! average width.

/// Font family available without embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    /// Helvetica (Arial-compatible sans serif)
    #[default]
    Helvetica,
    /// Courier (monospace)
    Courier,
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Helvetica widths for 0x20..=0x7E
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica-Bold widths for 0x20..=0x7E
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Courier is monospaced in both weights
const COURIER_WIDTH: u16 = 600;

/// Width used for characters outside the ASCII tables
const HELVETICA_FALLBACK: u16 = 556;
const HELVETICA_BOLD_FALLBACK: u16 = 611;

/// Advance width of a single character in thousandths of an em
pub fn char_width(ch: char, family: FontFamily, weight: FontWeight) -> u16 {
    if family == FontFamily::Courier {
        return COURIER_WIDTH;
    }

    let (table, fallback) = match weight {
        FontWeight::Normal => (&HELVETICA, HELVETICA_FALLBACK),
        FontWeight::Bold => (&HELVETICA_BOLD, HELVETICA_BOLD_FALLBACK),
    };

    match ch {
        ' '..='~' => table[ch as usize - 0x20],
        // Zero-width characters
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' => 0,
        '\u{00A0}' => table[0],
        _ => fallback,
    }
}

/// Width of `text` in points at `font_size` points
pub fn text_width(text: &str, family: FontFamily, weight: FontWeight, font_size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|ch| u32::from(char_width(ch, family, weight)))
        .sum();
    f64::from(units) * font_size / 1000.0
}
