//! End-to-end tests: transcripts through the layout engine into PDF files

use super::*;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use layout_engine::{
    layout_conversation, Conversation, ExportOptions, ExportOutcome, ImageKind, LayoutConfig,
    LayoutError, Logo, Message, Separator,
};
use std::path::Path;
use tempfile::TempDir;

fn options_in(dir: &TempDir, name: &str) -> ExportOptions {
    let path = dir.path().join(name);
    ExportOptions::new()
        .with_file_name(path.to_str().unwrap())
        .with_generated_on("10/14/2026, 9:30:00 AM")
}

fn uncompressed(config: &LayoutConfig) -> PdfSurface {
    PdfSurface::with_options(config, PdfWriteOptions::new().with_compression(false))
}

/// Lay out `messages` and return the uncompressed file as text
fn render_text(messages: &[Message], options: &ExportOptions) -> String {
    let config = options.resolve().unwrap();
    let (surface, _) = layout_conversation(messages, &config, uncompressed(&config));
    String::from_utf8_lossy(&surface.to_bytes().unwrap()).into_owned()
}

fn page_count(bytes: &[u8]) -> usize {
    let text = String::from_utf8_lossy(bytes);
    let start = text.find("/Type /Pages").unwrap();
    let count = &text[start..];
    let count = &count[count.find("/Count ").unwrap() + 7..];
    count
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap()
        .parse()
        .unwrap()
}

fn paragraphs(n: usize) -> String {
    (0..n).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n")
}

fn png_logo() -> Logo {
    let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([0, 0, 255, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    Logo::new(
        format!("data:image/png;base64,{}", STANDARD.encode(out.into_inner())),
        ImageKind::Png,
    )
}

#[test]
fn test_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(&dir, "chat.pdf");
    let messages = vec![Message::user("Hello"), Message::bot("Hi there, how can I help?")];

    let outcome = export_conversation(&messages, &options).unwrap();
    let summary = outcome.summary().unwrap();
    assert_eq!(summary.pages, 1);

    let bytes = std::fs::read(dir.path().join("chat.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert_eq!(page_count(&bytes), 1);
}

#[test]
fn test_empty_export_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(&dir, "empty.pdf");

    let outcome = export_conversation(&[], &options).unwrap();
    assert_eq!(outcome, ExportOutcome::Skipped);
    assert!(!dir.path().join("empty.pdf").exists());
}

#[test]
fn test_save_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.pdf");
    let options = ExportOptions::new().with_file_name(path.to_str().unwrap());

    let err = export_conversation(&[Message::user("hi")], &options).unwrap_err();
    match &err {
        LayoutError::Save { file_name, source } => {
            assert_eq!(Path::new(file_name), path.as_path());
            assert!(matches!(
                source.downcast_ref::<PdfError>(),
                Some(PdfError::Io(_))
            ));
        }
        other => panic!("expected save error, got {:?}", other),
    }
    assert!(err.to_string().contains("failed to save PDF file"));
}

#[test]
fn test_long_message_spans_pages() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(&dir, "long.pdf");

    export_conversation(&[Message::user(paragraphs(40))], &options).unwrap();
    let bytes = std::fs::read(dir.path().join("long.pdf")).unwrap();
    assert_eq!(page_count(&bytes), 2);
}

#[test]
fn test_header_and_footer_text() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = render_text(&[Message::user(paragraphs(40))], &options_in(&dir, "x.pdf"));

    assert_eq!(pdf.matches("(Chat Conversation) Tj").count(), 2);
    assert_eq!(pdf.matches("(Generated on: 10/14/2026, 9:30:00 AM) Tj").count(), 2);
    assert!(pdf.contains("(Page 1) Tj"));
    assert!(pdf.contains("(Page 2) Tj"));
    assert!(!pdf.contains("(Page 3) Tj"));
}

#[test]
fn test_role_colors_in_content() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = render_text(
        &[Message::user("q"), Message::bot("a")],
        &options_in(&dir, "x.pdf"),
    );

    // Default user blue (37, 99, 235) and bot green (22, 163, 74)
    assert!(pdf.contains("0.1451 0.3882 0.9216 rg"));
    assert!(pdf.contains("0.0863 0.6392 0.2902 rg"));
    assert!(pdf.contains("/F2 12 Tf"));
    assert!(pdf.contains("/F1 10 Tf"));
}

#[test]
fn test_text_is_win_ansi_encoded() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = render_text(&[Message::bot("café \u{2013} 日本")], &options_in(&dir, "x.pdf"));
    assert!(pdf.contains("(caf\\351 \\226 ??) Tj"));
}

#[test]
fn test_logo_embedded_once() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(&dir, "x.pdf").with_logo(png_logo());
    let pdf = render_text(&[Message::user(paragraphs(40))], &options);

    assert_eq!(pdf.matches("/Subtype /Image").count(), 1);
    assert_eq!(pdf.matches("/Im0 Do").count(), 2);
}

#[test]
fn test_broken_logo_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(&dir, "logo.pdf").with_logo(Logo::new("not base64!", ImageKind::Png));

    let outcome = export_conversation(&[Message::user("still here")], &options).unwrap();
    assert_eq!(outcome.summary().unwrap().pages, 1);
    assert!(dir.path().join("logo.pdf").exists());
}

#[test]
fn test_render_bytes() {
    assert!(render_conversation_bytes(&[], &ExportOptions::new()).unwrap().is_none());

    let bytes = render_conversation_bytes(&[Message::user("hi")], &ExportOptions::new())
        .unwrap()
        .unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(page_count(&bytes), 1);
}

#[test]
fn test_render_bytes_rejects_bad_page_setup() {
    let options = ExportOptions::new().with_page_size(0.0, 297.0);
    assert!(matches!(
        render_conversation_bytes(&[Message::user("hi")], &options),
        Err(PdfError::InvalidDocument(_))
    ));
}

#[test]
fn test_exchange_export() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(&dir, "exchange.pdf");
    let path = dir.path().join("exchange.pdf");

    let outcome = export_exchange("What is X?", "X is Y.", Some("3:45 PM"), &options).unwrap();
    assert_eq!(Path::new(&outcome.summary().unwrap().file_name), path.as_path());
    assert!(path.exists());

    layout_engine::export_exchange("What is X?", "X is Y.", Some("3:45 PM"), &options, uncompressed)
        .unwrap();
    let pdf = String::from_utf8_lossy(&std::fs::read(&path).unwrap()).into_owned();

    // Research user blue (30, 64, 175)
    assert!(pdf.contains("0.1176 0.251 0.6863 rg"));
    assert!(pdf.contains("(User: \\(3:45 PM\\)) Tj"));
    assert!(pdf.contains("(Bot: \\(3:45 PM\\)) Tj"));
}

#[test]
fn test_conversations_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.pdf");
    let options = options_in(&dir, "batch.pdf");
    let conversations = vec![
        Conversation::new("q1", "r1").with_timestamp("9:00 AM"),
        Conversation::new("q2", "r2").with_timestamp("9:05 AM"),
        Conversation::new("q3", "r3").with_timestamp("9:10 AM"),
    ];

    let outcome = layout_engine::export_conversations(
        &conversations,
        &Separator::default(),
        &options,
        uncompressed,
    )
    .unwrap();
    assert_eq!(outcome.summary().unwrap().pages, 1);

    let pdf = String::from_utf8_lossy(&std::fs::read(&path).unwrap()).into_owned();
    assert_eq!(pdf.matches("(--- Next Conversation ---) Tj").count(), 2);
    assert_eq!(pdf.matches("(q2) Tj").count(), 1);
}

#[test]
fn test_no_conversations() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(&dir, "none.pdf");
    assert_eq!(
        export_conversations(&[], &options).unwrap(),
        ExportOutcome::Skipped
    );
    assert!(!dir.path().join("none.pdf").exists());
}
