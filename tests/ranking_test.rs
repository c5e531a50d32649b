//! Integration tests for persona-driven ranking.

mod common;

use docrank::model::{BBox, PageContext, PageSpans, TextSpan};
use docrank::parser::{read_pages, ExtractOptions, PdfSpanSource};
use docrank::rank::{
    CollectionRanker, DocumentPages, PersonaWeighter, RankOptions, RelevanceScorer,
    SectionSegmenter,
};
use docrank::{HeadingConfig, Section};

fn page(index: u32, lines: &[(&str, f32, bool)]) -> PageSpans {
    let mut page = PageSpans::new(PageContext::letter(index));
    for (text, size, bold) in lines {
        let width = text.chars().count() as f32 * size * 0.5;
        page.push(
            TextSpan::new(*text, *size, "Times", BBox::new(72.0, 0.0, 72.0 + width, *size), index)
                .with_bold(*bold),
        );
    }
    page
}

/// A document with `n` headed sections, the i-th mentioning "cuisine" i times.
fn graded_document(id: &str, n: usize) -> DocumentPages {
    let mut lines: Vec<(String, f32, bool)> = Vec::new();
    for i in 0..n {
        lines.push((format!("Chapter {}", i + 1), 18.0, true));
        let body = if i == 0 {
            "Unrelated museum notes.".to_string()
        } else {
            "cuisine ".repeat(i).trim_end().to_string()
        };
        lines.push((body, 10.0, false));
    }
    let borrowed: Vec<(&str, f32, bool)> =
        lines.iter().map(|(t, s, b)| (t.as_str(), *s, *b)).collect();
    DocumentPages::new(id, vec![page(0, &borrowed)])
}

#[test]
fn test_segment_generated_pdf() {
    let source = PdfSpanSource::from_bytes(&common::travel_guide()).unwrap();
    let pages = read_pages(&source, &ExtractOptions::default()).unwrap();

    let sections = SectionSegmenter::new("guide.pdf", HeadingConfig::default())
        .unwrap()
        .segment(&pages);

    let titles: Vec<(&str, u32)> = sections
        .iter()
        .map(|s| (s.title.as_str(), s.page_number))
        .collect();
    assert_eq!(
        titles,
        vec![("Coastal Adventures", 1), ("Nightlife", 1), ("Cuisine", 2)]
    );
    assert_eq!(
        sections[2].content,
        "Seafood and local cuisine for every trip."
    );
}

#[test]
fn test_rank_generated_pdf() {
    let source = PdfSpanSource::from_bytes(&common::travel_guide()).unwrap();
    let pages = read_pages(&source, &ExtractOptions::default()).unwrap();

    let ranker = CollectionRanker::new();
    let profile = ranker.profile(
        "Travel Planner",
        "Plan a trip of 4 days for a group of 10 college friends.",
    );
    let ranked = ranker.rank(&[DocumentPages::new("guide.pdf", pages)], &profile);

    assert_eq!(ranked.total_sections, 3);
    let titles: Vec<&str> = ranked
        .result
        .extracted_sections
        .iter()
        .map(|s| s.section_title.as_str())
        .collect();
    // "group" and "friends" vs "trip"; "trips" is not a keyword.
    assert_eq!(titles, vec!["Nightlife", "Cuisine", "Coastal Adventures"]);
    assert_eq!(ranked.result.extracted_sections[2].relevance_score, 0.0);
    assert_eq!(ranked.result.tier_counts.low, 3);
}

#[test]
fn test_more_mentions_rank_higher() {
    let ranker = CollectionRanker::new();
    let profile = ranker.profile("Chef", "cuisine");
    let ranked = ranker.rank(&[graded_document("book.pdf", 6)], &profile);

    let titles: Vec<&str> = ranked
        .result
        .extracted_sections
        .iter()
        .map(|s| s.section_title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Chapter 6", "Chapter 5", "Chapter 4", "Chapter 3", "Chapter 2", "Chapter 1"]
    );
}

#[test]
fn test_collection_bounds() {
    let docs: Vec<DocumentPages> = (0..4)
        .map(|i| graded_document(&format!("doc{}.pdf", i), 8))
        .collect();

    let ranker = CollectionRanker::new();
    let profile = ranker.profile("Chef", "cuisine");
    let ranked = ranker.rank(&docs, &profile);

    assert_eq!(ranked.total_sections, 32);
    assert_eq!(ranked.result.extracted_sections.len(), 15);
    assert_eq!(ranked.result.top_summary.len(), 5);
    assert_eq!(ranked.result.tier_counts.total(), 15);
    assert_eq!(ranked.contributing_documents.len(), 4);

    // Equal scores across documents keep document order.
    let top: Vec<&str> = ranked
        .result
        .top_summary
        .iter()
        .map(|s| s.document.as_str())
        .collect();
    assert_eq!(top, vec!["doc0.pdf", "doc1.pdf", "doc2.pdf", "doc3.pdf", "doc0.pdf"]);
}

#[test]
fn test_custom_rank_options() {
    let docs = vec![graded_document("doc.pdf", 10)];
    let ranker = CollectionRanker::new()
        .with_rank_options(RankOptions::new().with_top_k(3).with_summary_len(2))
        .with_parallel(false);
    let profile = ranker.profile("Chef", "cuisine");
    let ranked = ranker.rank(&docs, &profile);

    assert_eq!(ranked.result.extracted_sections.len(), 3);
    assert_eq!(ranked.result.top_summary.len(), 2);
}

#[test]
fn test_long_irrelevant_section_does_not_win() {
    let profile = PersonaWeighter::default().profile("Investment Analyst", "revenue trends");
    let scorer = RelevanceScorer::default();

    let short = Section::new("Revenue", "Revenue grew.", 1, "annual.pdf");
    let long = Section::new(
        "Appendix",
        "boilerplate disclaimer text ".repeat(3_000),
        9,
        "annual.pdf",
    );
    assert!(scorer.score(&short, &profile) > scorer.score(&long, &profile));
    assert_eq!(scorer.score(&long, &profile), 0.0);
}
