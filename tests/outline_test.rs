//! Integration tests for outline extraction.

mod common;

use std::fs;

use docrank::model::{BBox, HeadingLevel, PageContext, PageSpans, TextSpan};
use docrank::outline::batch::{process_directory, OutlineOutcome};
use docrank::outline::extract_outline;
use docrank::parser::{ExtractOptions, MemorySpanSource, PdfSpanSource, SpanSource};
use docrank::{outline_bytes, Error, Outline, OutlineBuilder, OutlineOptions};

fn span(text: &str, size: f32, font: &str, x0: f32, page: u32) -> TextSpan {
    let width = text.chars().count() as f32 * size * 0.5;
    TextSpan::new(text, size, font, BBox::new(x0, 100.0, x0 + width, 100.0 + size), page)
}

#[test]
fn test_outline_from_memory_source() {
    let mut first = PageSpans::new(PageContext::letter(0));
    first.push(span("Application Form", 20.0, "Arial-Bold", 72.0, 0));
    first.push(span("Name of the applicant and signature.", 10.0, "Arial", 72.0, 0));
    first.push(span("PERSONAL DETAILS", 12.0, "Arial", 72.0, 0));

    let mut second = PageSpans::new(PageContext::letter(1));
    second.push(span("Declaration:", 11.0, "Arial", 72.0, 1));

    let source = MemorySpanSource::new(vec![first, second]);
    let outline = OutlineBuilder::default()
        .build_from_source(&source, &ExtractOptions::default())
        .unwrap();

    assert_eq!(outline.title, "Application Form");
    let levels: Vec<(HeadingLevel, &str, u32)> = outline
        .outline
        .iter()
        .map(|h| (h.level, h.text.as_str(), h.page))
        .collect();
    // 20 + 2 + 0.5; 12 + 1.5 + 1 + 0.5; 11 + 1 + 0.5
    assert_eq!(
        levels,
        vec![
            (HeadingLevel::H1, "Application Form", 1),
            (HeadingLevel::H2, "PERSONAL DETAILS", 1),
            (HeadingLevel::H3, "Declaration:", 2),
        ]
    );
}

#[test]
fn test_outline_from_generated_pdf() {
    let outline = outline_bytes(&common::travel_guide()).unwrap();

    assert_eq!(outline.title, "South of France Guide");
    let entries: Vec<(HeadingLevel, &str, u32)> = outline
        .outline
        .iter()
        .map(|h| (h.level, h.text.as_str(), h.page))
        .collect();
    assert_eq!(
        entries,
        vec![
            (HeadingLevel::H1, "South of France Guide", 1),
            (HeadingLevel::H1, "Coastal Adventures", 1),
            (HeadingLevel::H2, "Nightlife", 1),
            (HeadingLevel::H1, "Cuisine", 2),
        ]
    );
}

#[test]
fn test_pdf_span_source_reads_fonts() {
    let source = PdfSpanSource::from_bytes(&common::travel_guide()).unwrap();
    assert_eq!(source.page_count(), 2);

    let page = source.page_spans(0).unwrap();
    assert_eq!(page.context.width, 612.0);
    assert_eq!(page.spans.len(), 5);
    assert_eq!(page.spans[0].font_name, "Helvetica-Bold");
    assert!(page.spans[0].is_bold);
    assert!(!page.spans[3].is_bold);
    assert_eq!(page.spans[3].font_size, 14.0);
}

#[test]
fn test_page_limit_rejects_long_documents() {
    let data = common::long_document(51);
    let err = outline_bytes(&data).unwrap_err();
    assert!(matches!(
        err,
        Error::TooManyPages {
            pages: 51,
            limit: 50
        }
    ));

    let source = PdfSpanSource::from_bytes(&data).unwrap();
    let outline = OutlineBuilder::default()
        .build_from_source(&source, &ExtractOptions::new().with_max_pages(0))
        .unwrap();
    assert_eq!(outline.title, "Filler page text.");
    assert_eq!(outline.len(), 0);
}

#[test]
fn test_extract_outline_oversized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.pdf");
    common::write_file(&path, &common::long_document(60));

    let outcome = extract_outline(&path, &OutlineOptions::default());
    assert!(matches!(
        outcome,
        OutlineOutcome::Oversized {
            pages: 60,
            limit: 50
        }
    ));
}

#[test]
fn test_process_directory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("nested");

    common::write_file(&input.path().join("guide.pdf"), &common::travel_guide());
    common::write_file(&input.path().join("SHOUTY.PDF"), &common::travel_guide());
    common::write_file(&input.path().join("broken.pdf"), b"%PDF-1.4 truncated");
    common::write_file(&input.path().join("long.pdf"), &common::long_document(51));
    common::write_file(&input.path().join("notes.txt"), b"not a pdf");

    let report = process_directory(input.path(), &out_dir, &OutlineOptions::default()).unwrap();
    assert_eq!(report.extracted.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.oversized.len(), 1);
    assert_eq!(report.total(), 4);

    let guide: Outline =
        serde_json::from_str(&fs::read_to_string(out_dir.join("guide.json")).unwrap()).unwrap();
    assert_eq!(guide.title, "South of France Guide");
    assert_eq!(guide.len(), 4);
    assert!(out_dir.join("SHOUTY.json").exists());

    let broken: Outline =
        serde_json::from_str(&fs::read_to_string(out_dir.join("broken.json")).unwrap()).unwrap();
    assert_eq!(broken, Outline::empty());

    assert!(!out_dir.join("long.json").exists());
    assert!(!out_dir.join("notes.json").exists());
}

#[test]
fn test_outline_json_shape() {
    let outline = outline_bytes(&common::travel_guide()).unwrap();
    let json = serde_json::to_value(&outline).unwrap();

    assert_eq!(json["title"], "South of France Guide");
    assert_eq!(json["outline"][2]["level"], "H2");
    assert_eq!(json["outline"][2]["text"], "Nightlife");
    assert_eq!(json["outline"][3]["page"], 2);
}
