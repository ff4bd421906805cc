//! PDF Object Model
//!
//! The subset of PDF object types the transcript writer emits, and their
//! serialized form.

use std::fmt::Write as _;

/// Indirect object number (generation is always 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    /// Name object, written with a leading `/`
    Name(String),
    /// Literal string of already-encoded bytes
    String(Vec<u8>),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Reference(ObjectId),
}

impl Object {
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        Object::String(bytes.into())
    }

    /// `[x0 y0 x1 y1]` rectangle
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Object::Array(vec![
            Object::Real(x0),
            Object::Real(y0),
            Object::Real(x1),
            Object::Real(y1),
        ])
    }

    /// Append the serialized object to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Object::Null => out.extend_from_slice(b"null"),
            Object::Boolean(b) => out.extend_from_slice(if *b { &b"true"[..] } else { &b"false"[..] }),
            Object::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
            Object::Real(n) => out.extend_from_slice(format_number(*n).as_bytes()),
            Object::Name(name) => write_name(name, out),
            Object::String(bytes) => write_literal(bytes, out),
            Object::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b' ');
                    }
                    item.write_to(out);
                }
                out.push(b']');
            }
            Object::Dictionary(dict) => dict.write_to(out),
            Object::Reference(id) => out.extend_from_slice(format!("{} 0 R", id.0).as_bytes()),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_to(&mut out);
        out
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Object::Integer(n)
    }
}

impl From<u32> for Object {
    fn from(n: u32) -> Self {
        Object::Integer(n as i64)
    }
}

impl From<usize> for Object {
    fn from(n: usize) -> Self {
        Object::Integer(n as i64)
    }
}

impl From<f64> for Object {
    fn from(n: f64) -> Self {
        Object::Real(n)
    }
}

impl From<ObjectId> for Object {
    fn from(id: ObjectId) -> Self {
        Object::Reference(id)
    }
}

impl From<Dictionary> for Object {
    fn from(dict: Dictionary) -> Self {
        Object::Dictionary(dict)
    }
}

impl From<Vec<Object>> for Object {
    fn from(items: Vec<Object>) -> Self {
        Object::Array(items)
    }
}

/// Dictionary that keeps entries in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: Vec<(String, Object)>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary with a `/Type` entry
    pub fn typed(type_name: &str) -> Self {
        Self::new().with("Type", Object::name(type_name))
    }

    /// Set `key`, replacing an existing entry in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Object>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Object>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"<<");
        for (key, value) in &self.entries {
            out.push(b' ');
            write_name(key, out);
            out.push(b' ');
            value.write_to(out);
        }
        out.extend_from_slice(b" >>");
    }
}

/// Stream object: dictionary plus payload. `Length` is filled in on write.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    pub dict: Dictionary,
    pub data: Vec<u8>,
}

impl Stream {
    pub fn new(dict: Dictionary, data: Vec<u8>) -> Self {
        Self { dict, data }
    }

    /// Whether the payload already carries a filter
    pub fn is_encoded(&self) -> bool {
        self.dict.contains_key("Filter")
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        let dict = self.dict.clone().with("Length", self.data.len());
        dict.write_to(out);
        out.extend_from_slice(b"\nstream\n");
        out.extend_from_slice(&self.data);
        out.extend_from_slice(b"\nendstream");
    }
}

/// Format a real number with at most four decimals and no trailing zeros
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    let mut s = String::new();
    let _ = write!(s, "{:.4}", n);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn write_name(name: &str, out: &mut Vec<u8>) {
    out.push(b'/');
    for byte in name.bytes() {
        match byte {
            b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                out.extend_from_slice(format!("#{:02X}", byte).as_bytes())
            }
            0x21..=0x7E => out.push(byte),
            _ => out.extend_from_slice(format!("#{:02X}", byte).as_bytes()),
        }
    }
}

/// Literal string with delimiters and non-printing bytes escaped
pub fn write_literal(bytes: &[u8], out: &mut Vec<u8>) {
    out.push(b'(');
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            0x20..=0x7E => out.push(byte),
            _ => out.extend_from_slice(format!("\\{:03o}", byte).as_bytes()),
        }
    }
    out.push(b')');
}
