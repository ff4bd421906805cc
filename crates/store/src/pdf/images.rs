//! Image XObjects
//!
//! Logos arrive as base64 data URLs. JPEG data is embedded unchanged with
//! `DCTDecode`; PNG is decoded into RGB samples plus an optional alpha soft
//! mask, both Flate-compressed.

use super::objects::{Dictionary, Object, ObjectId, Stream};
use base64::Engine as _;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use layout_engine::ImageKind;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Unsupported image: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRgb,
    DeviceCmyk,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRgb => "DeviceRGB",
            ColorSpace::DeviceCmyk => "DeviceCMYK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    Dct,
    Flate,
}

impl ImageFilter {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ImageFilter::Dct => "DCTDecode",
            ImageFilter::Flate => "FlateDecode",
        }
    }
}

/// A decoded image ready to be written as an XObject
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub filter: ImageFilter,
    /// Encoded sample data
    pub data: Vec<u8>,
    /// Flate-compressed 8-bit alpha samples
    pub alpha: Option<Vec<u8>>,
}

impl ImageXObject {
    /// Decode a data URL (or bare base64) holding a PNG or JPEG.
    ///
    /// The payload's signature decides the decoder; `declared` is used
    /// when the signature is not recognized.
    pub fn from_data_url(data_url: &str, declared: ImageKind) -> Result<Self, ImageError> {
        let bytes = decode_data_url(data_url)?;
        match sniff_kind(&bytes).unwrap_or(declared) {
            ImageKind::Jpeg => Self::from_jpeg(bytes),
            ImageKind::Png => Self::from_png(&bytes),
        }
    }

    pub fn from_jpeg(data: Vec<u8>) -> Result<Self, ImageError> {
        let header = parse_jpeg_header(&data)?;
        let color_space = match header.components {
            1 => ColorSpace::DeviceGray,
            3 => ColorSpace::DeviceRgb,
            4 => ColorSpace::DeviceCmyk,
            n => {
                return Err(ImageError::Unsupported(format!(
                    "JPEG with {} color components",
                    n
                )))
            }
        };

        Ok(Self {
            width: header.width,
            height: header.height,
            color_space,
            filter: ImageFilter::Dct,
            data,
            alpha: None,
        })
    }

    pub fn from_png(data: &[u8]) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory_with_format(data, image::ImageFormat::Png)
            .map_err(|e| ImageError::Decode(e.to_string()))?;
        let has_alpha = decoded.color().has_alpha();
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixels = rgba.as_raw();
        let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
        let mut alpha = Vec::with_capacity(pixels.len() / 4);
        for px in pixels.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
            alpha.push(px[3]);
        }

        let alpha = if has_alpha && alpha.iter().any(|&a| a != 0xFF) {
            Some(deflate(&alpha)?)
        } else {
            None
        };

        Ok(Self {
            width,
            height,
            color_space: ColorSpace::DeviceRgb,
            filter: ImageFilter::Flate,
            data: deflate(&rgb)?,
            alpha,
        })
    }

    /// Image stream, pointing at `soft_mask` when the image has alpha
    pub fn to_stream(&self, soft_mask: Option<ObjectId>) -> Stream {
        let mut dict = self
            .sample_dict()
            .with("ColorSpace", Object::name(self.color_space.pdf_name()))
            .with("Filter", Object::name(self.filter.pdf_name()));
        if let Some(mask) = soft_mask {
            dict.set("SMask", mask);
        }
        Stream::new(dict, self.data.clone())
    }

    /// Soft mask stream for the alpha channel, if any
    pub fn soft_mask_stream(&self) -> Option<Stream> {
        self.alpha.as_ref().map(|alpha| {
            let dict = self
                .sample_dict()
                .with("ColorSpace", Object::name("DeviceGray"))
                .with("Filter", Object::name(ImageFilter::Flate.pdf_name()));
            Stream::new(dict, alpha.clone())
        })
    }

    fn sample_dict(&self) -> Dictionary {
        Dictionary::typed("XObject")
            .with("Subtype", Object::name("Image"))
            .with("Width", self.width)
            .with("Height", self.height)
            .with("BitsPerComponent", 8i64)
    }
}

/// Extract the binary payload of a base64 data URL or bare base64 string
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, ImageError> {
    let data_url = data_url.trim();
    let payload = match data_url.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| ImageError::InvalidDataUrl("missing ',' separator".to_string()))?;
            if !header.ends_with(";base64") {
                return Err(ImageError::InvalidDataUrl(format!(
                    "expected base64 payload, got '{}'",
                    header
                )));
            }
            payload
        }
        None => data_url,
    };

    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(ImageError::InvalidDataUrl("empty payload".to_string()));
    }
    base64::engine::general_purpose::STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| ImageError::InvalidDataUrl(e.to_string()))
}

fn sniff_kind(data: &[u8]) -> Option<ImageKind> {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some(ImageKind::Png)
    } else if data.starts_with(&[0xFF, 0xD8]) {
        Some(ImageKind::Jpeg)
    } else {
        None
    }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, ImageError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    encoder.finish().map_err(|e| ImageError::Decode(e.to_string()))
}

struct JpegHeader {
    width: u32,
    height: u32,
    components: u8,
}

/// Read the frame header (SOFn) of a baseline or progressive JPEG
fn parse_jpeg_header(data: &[u8]) -> Result<JpegHeader, ImageError> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(ImageError::Decode("not a JPEG stream".to_string()));
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            return Err(ImageError::Decode(format!("bad JPEG marker at byte {}", pos)));
        }
        let marker = data[pos + 1];
        pos += 2;

        // Fill bytes and standalone markers carry no length
        if marker == 0xFF {
            pos -= 1;
            continue;
        }
        if marker == 0x01 || (0xD0..=0xD9).contains(&marker) {
            continue;
        }

        if pos + 2 > data.len() {
            break;
        }
        let length = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;

        let is_frame = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_frame {
            if pos + 8 > data.len() {
                break;
            }
            let height = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as u32;
            let width = u16::from_be_bytes([data[pos + 5], data[pos + 6]]) as u32;
            let components = data[pos + 7];
            if width == 0 || height == 0 {
                return Err(ImageError::Unsupported("JPEG without dimensions".to_string()));
            }
            return Ok(JpegHeader {
                width,
                height,
                components,
            });
        }

        pos += length;
    }

    Err(ImageError::Decode("JPEG frame header not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    /// SOI, an APP0 segment, then an SOF0 frame header for 3x2 RGB
    fn tiny_jpeg() -> Vec<u8> {
        vec![
            0xFF, 0xD8, // SOI
            0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00, // APP0, 2 payload bytes
            0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x02, 0x00, 0x03, 0x03, // SOF0
            0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01, // components
            0xFF, 0xD9, // EOI
        ]
    }

    fn png_bytes(color: image::Rgba<u8>) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, color);
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_data_url() {
        let url = format!("data:image/png;base64,{}", STANDARD.encode(b"abc"));
        assert_eq!(decode_data_url(&url).unwrap(), b"abc".to_vec());
        assert_eq!(decode_data_url(&STANDARD.encode(b"xyz")).unwrap(), b"xyz".to_vec());
    }

    #[test]
    fn test_invalid_data_urls() {
        assert!(matches!(
            decode_data_url("data:image/png,plain"),
            Err(ImageError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64"),
            Err(ImageError::InvalidDataUrl(_))
        ));
        assert!(matches!(decode_data_url("!!!"), Err(ImageError::InvalidDataUrl(_))));
        assert!(matches!(decode_data_url(""), Err(ImageError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_jpeg_passthrough() {
        let jpeg = tiny_jpeg();
        let image = ImageXObject::from_jpeg(jpeg.clone()).unwrap();
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.color_space, ColorSpace::DeviceRgb);
        assert_eq!(image.filter, ImageFilter::Dct);
        assert_eq!(image.data, jpeg);
        assert!(image.soft_mask_stream().is_none());
    }

    #[test]
    fn test_truncated_jpeg() {
        assert!(ImageXObject::from_jpeg(vec![0xFF, 0xD8, 0xFF, 0xE0]).is_err());
        assert!(ImageXObject::from_jpeg(b"nope".to_vec()).is_err());
    }

    #[test]
    fn test_opaque_png_has_no_mask() {
        let url = STANDARD.encode(png_bytes(image::Rgba([10, 20, 30, 255])));
        let image = ImageXObject::from_data_url(&url, ImageKind::Png).unwrap();
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.filter, ImageFilter::Flate);
        assert!(image.alpha.is_none());
    }

    #[test]
    fn test_translucent_png_gets_soft_mask() {
        let url = format!(
            "data:image/png;base64,{}",
            STANDARD.encode(png_bytes(image::Rgba([10, 20, 30, 128])))
        );
        let image = ImageXObject::from_data_url(&url, ImageKind::Png).unwrap();
        let mask = image.soft_mask_stream().unwrap();
        assert_eq!(mask.dict.get("ColorSpace"), Some(&Object::name("DeviceGray")));

        let stream = image.to_stream(Some(ObjectId(9)));
        assert_eq!(stream.dict.get("SMask"), Some(&Object::Reference(ObjectId(9))));
    }

    #[test]
    fn test_signature_overrides_declared_kind() {
        let url = STANDARD.encode(tiny_jpeg());
        let image = ImageXObject::from_data_url(&url, ImageKind::Png).unwrap();
        assert_eq!(image.filter, ImageFilter::Dct);
    }

    #[test]
    fn test_garbage_png() {
        let url = STANDARD.encode(b"definitely not an image");
        assert!(matches!(
            ImageXObject::from_data_url(&url, ImageKind::Png),
            Err(ImageError::Decode(_))
        ));
    }
}
