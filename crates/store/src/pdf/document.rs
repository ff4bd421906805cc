//! PDF Document Structure
//!
//! Pages of drawn content plus the shared font and image resources, and the
//! object graph they are written as:
//! catalog, page tree, info, fonts, image XObjects, then one page object and
//! one content stream per page.

use super::content::ContentStream;
use super::fonts::{encode_win_ansi, StandardFont};
use super::images::ImageXObject;
use super::objects::{Dictionary, Object, ObjectId, Stream};
use super::options::PdfWriteOptions;
use super::writer::{PdfError, PdfWriter, Result};
use std::collections::BTreeSet;
use std::io::Write;

/// One page: size in points, its content and the resources it uses
#[derive(Debug, Clone)]
pub struct PdfPage {
    pub width: f64,
    pub height: f64,
    pub content: ContentStream,
    pub fonts: BTreeSet<StandardFont>,
    /// Indexes into the document's image list
    pub images: BTreeSet<usize>,
}

impl PdfPage {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            content: ContentStream::new(),
            fonts: BTreeSet::new(),
            images: BTreeSet::new(),
        }
    }
}

/// Resource name of the image at `index`
pub fn image_resource_name(index: usize) -> String {
    format!("Im{}", index)
}

/// Write `pages` and `images` as a complete PDF file
pub fn write_document<W: Write>(
    pages: &[PdfPage],
    images: &[ImageXObject],
    options: &PdfWriteOptions,
    out: W,
) -> Result<W> {
    if pages.is_empty() {
        return Err(PdfError::InvalidDocument("document has no pages".to_string()));
    }

    let mut pdf = PdfWriter::new(out, options.compress);
    pdf.write_header()?;

    let catalog_id = pdf.allocate();
    let pages_id = pdf.allocate();
    let info_id = pdf.allocate();

    let used_fonts: BTreeSet<StandardFont> =
        pages.iter().flat_map(|page| page.fonts.iter().copied()).collect();
    let font_ids: Vec<(StandardFont, ObjectId)> = used_fonts
        .into_iter()
        .map(|font| (font, pdf.allocate()))
        .collect();

    let image_ids: Vec<(ObjectId, Option<ObjectId>)> = images
        .iter()
        .map(|image| {
            let id = pdf.allocate();
            let mask = image.alpha.as_ref().map(|_| pdf.allocate());
            (id, mask)
        })
        .collect();

    let page_ids: Vec<(ObjectId, ObjectId)> = pages
        .iter()
        .map(|_| (pdf.allocate(), pdf.allocate()))
        .collect();

    let catalog = Dictionary::typed("Catalog").with("Pages", pages_id);
    pdf.write_object(catalog_id, &catalog.into())?;

    let kids: Vec<Object> = page_ids.iter().map(|(page, _)| Object::from(*page)).collect();
    let page_tree = Dictionary::typed("Pages")
        .with("Kids", kids)
        .with("Count", pages.len());
    pdf.write_object(pages_id, &page_tree.into())?;

    pdf.write_object(info_id, &info_dictionary(options).into())?;

    for (font, id) in &font_ids {
        pdf.write_object(*id, &font.to_dictionary().into())?;
    }

    for (image, (id, mask)) in images.iter().zip(&image_ids) {
        pdf.write_stream(*id, image.to_stream(*mask))?;
        if let (Some(mask_id), Some(mask_stream)) = (mask, image.soft_mask_stream()) {
            pdf.write_stream(*mask_id, mask_stream)?;
        }
    }

    for (page, (page_id, content_id)) in pages.iter().zip(&page_ids) {
        let resources = page_resources(page, &font_ids, &image_ids)?;
        let page_dict = Dictionary::typed("Page")
            .with("Parent", pages_id)
            .with("MediaBox", Object::rect(0.0, 0.0, page.width, page.height))
            .with("Resources", resources)
            .with("Contents", *content_id);
        pdf.write_object(*page_id, &page_dict.into())?;

        let stream = Stream::new(Dictionary::new(), page.content.as_bytes().to_vec());
        pdf.write_stream(*content_id, stream)?;
    }

    pdf.finish(catalog_id, info_id)
}

fn info_dictionary(options: &PdfWriteOptions) -> Dictionary {
    let mut info = Dictionary::new();
    let text = |s: &str| Object::string(encode_win_ansi(s));

    if let Some(title) = &options.title {
        info.set("Title", text(title));
    }
    info.set("Creator", text(&options.creator));
    info.set("Producer", text(&options.producer));
    info.set("CreationDate", Object::string(options.pdf_date()));
    info
}

fn page_resources(
    page: &PdfPage,
    font_ids: &[(StandardFont, ObjectId)],
    image_ids: &[(ObjectId, Option<ObjectId>)],
) -> Result<Dictionary> {
    let mut fonts = Dictionary::new();
    for (font, id) in font_ids.iter().filter(|(font, _)| page.fonts.contains(font)) {
        fonts.set(font.resource_name(), *id);
    }

    let mut xobjects = Dictionary::new();
    for &index in &page.images {
        let (id, _) = image_ids.get(index).ok_or_else(|| {
            PdfError::InvalidDocument(format!("page refers to missing image {}", index))
        })?;
        xobjects.set(image_resource_name(index), *id);
    }

    let mut proc_set = vec![Object::name("PDF"), Object::name("Text")];
    if !xobjects.is_empty() {
        proc_set.push(Object::name("ImageC"));
    }

    let mut resources = Dictionary::new().with("ProcSet", proc_set);
    if !fonts.is_empty() {
        resources.set("Font", fonts);
    }
    if !xobjects.is_empty() {
        resources.set("XObject", xobjects);
    }
    Ok(resources)
}
