//! PDF Writer
//!
//! Byte-level file structure: header, numbered indirect objects, the
//! cross-reference table and the trailer.

use super::images::ImageError;
use super::objects::{Dictionary, Object, ObjectId, Stream};
use super::options::PDF_VERSION;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

pub type Result<T> = std::result::Result<T, PdfError>;

pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    /// Byte offset of each allocated object, indexed by number - 1
    offsets: Vec<Option<u64>>,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, compress: bool) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            compress,
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    /// Reserve the next object number
    pub fn allocate(&mut self) -> ObjectId {
        self.offsets.push(None);
        ObjectId(self.offsets.len() as u32)
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.write_bytes(format!("%PDF-{}\n", PDF_VERSION).as_bytes())?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    pub fn write_object(&mut self, id: ObjectId, object: &Object) -> Result<()> {
        let mut body = Vec::new();
        object.write_to(&mut body);
        self.write_indirect(id, &body)
    }

    /// Write a stream, Flate-compressing it unless compression is off or the
    /// payload is already encoded
    pub fn write_stream(&mut self, id: ObjectId, mut stream: Stream) -> Result<()> {
        if self.compress && !stream.is_encoded() {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&stream.data)?;
            stream.data = encoder.finish()?;
            stream.dict.set("Filter", Object::name("FlateDecode"));
        }

        let mut body = Vec::new();
        stream.write_to(&mut body);
        self.write_indirect(id, &body)
    }

    fn write_indirect(&mut self, id: ObjectId, body: &[u8]) -> Result<()> {
        let slot = (id.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.offsets.get_mut(index))
            .ok_or_else(|| PdfError::InvalidDocument(format!("object {} was never allocated", id.0)))?;
        if slot.is_some() {
            return Err(PdfError::InvalidDocument(format!("object {} written twice", id.0)));
        }
        *slot = Some(self.position);

        self.write_bytes(format!("{} 0 obj\n", id.0).as_bytes())?;
        self.write_bytes(body)?;
        self.write_bytes(b"\nendobj\n")
    }

    /// Write the xref table and trailer, then flush
    pub fn finish(mut self, root: ObjectId, info: ObjectId) -> Result<W> {
        let xref_offset = self.position;
        let size = self.offsets.len() + 1;

        let mut table = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for (index, offset) in self.offsets.iter().enumerate() {
            let offset = offset.ok_or_else(|| {
                PdfError::InvalidDocument(format!("object {} allocated but not written", index + 1))
            })?;
            table.push_str(&format!("{:010} 00000 n \n", offset));
        }
        self.write_bytes(table.as_bytes())?;

        let trailer = Dictionary::new()
            .with("Size", size)
            .with("Root", root)
            .with("Info", info);
        self.write_bytes(b"trailer\n")?;
        self.write_bytes(&Object::from(trailer).to_bytes())?;
        self.write_bytes(format!("\nstartxref\n{}\n%%EOF\n", xref_offset).as_bytes())?;

        self.writer.flush()?;
        Ok(self.writer)
    }
}
