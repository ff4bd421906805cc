//! Standard PDF fonts
//!
//! Transcripts use the non-embedded standard Type 1 faces, so text must be
//! encoded with WinAnsiEncoding.

use super::objects::{Dictionary, Object};
use layout_engine::{FontFamily, FontWeight};

/// Standard Type 1 faces the surface can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    pub fn new(family: FontFamily, weight: FontWeight) -> Self {
        match (family, weight) {
            (FontFamily::Helvetica, FontWeight::Normal) => StandardFont::Helvetica,
            (FontFamily::Helvetica, FontWeight::Bold) => StandardFont::HelveticaBold,
            (FontFamily::Courier, FontWeight::Normal) => StandardFont::Courier,
            (FontFamily::Courier, FontWeight::Bold) => StandardFont::CourierBold,
        }
    }

    /// PostScript name used as `/BaseFont`
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    /// Page resource name, stable per face
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::Courier => "F3",
            StandardFont::CourierBold => "F4",
        }
    }

    pub fn to_dictionary(&self) -> Dictionary {
        Dictionary::typed("Font")
            .with("Subtype", Object::name("Type1"))
            .with("BaseFont", Object::name(self.base_font()))
            .with("Encoding", Object::name("WinAnsiEncoding"))
    }
}

/// Encode text for a WinAnsiEncoding font.
///
/// Latin-1 passes through and the Windows-1252 punctuation block is mapped.
/// Tabs become spaces, zero-width and control characters are dropped and
/// anything else is replaced with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let code = ch as u32;
        match ch {
            '\t' => out.push(b' '),
            ' '..='~' => out.push(code as u8),
            '\u{00A0}'..='\u{00FF}' => out.push(code as u8),
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' => {}
            _ if ch.is_control() => {}
            _ => out.push(cp1252_byte(ch).unwrap_or(b'?')),
        }
    }
    out
}

fn cp1252_byte(ch: char) -> Option<u8> {
    let byte = match ch {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}
