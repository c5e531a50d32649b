//! Splitting a document into heading-delimited sections.

use crate::error::{Error, Result};
use crate::model::{PageSpans, Section};
use crate::outline::{HeadingClassifier, HeadingConfig};

/// Maximum characters of body text used as a fallback section title.
const UNTITLED_TITLE_CHARS: usize = 80;

/// Groups the spans of one document into [`Section`]s.
///
/// A heading span opens a new section titled by its text and body spans are
/// appended to the open section. A headed section continues across page
/// breaks. Body text with no open section starts an untitled section named
/// after its first line; such a section ends with its page. Sections without
/// body text are dropped.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    document_id: String,
    classifier: HeadingClassifier,
}

struct OpenSection {
    title: String,
    parts: Vec<String>,
    page_number: u32,
    headed: bool,
}

impl OpenSection {
    fn into_section(self, document_id: &str) -> Option<Section> {
        let content = self.parts.join(" ");
        if content.trim().is_empty() {
            return None;
        }
        Some(Section::new(
            self.title,
            content,
            self.page_number,
            document_id,
        ))
    }
}

impl SectionSegmenter {
    /// Create a segmenter for the document with the given identifier.
    pub fn new(document_id: impl Into<String>, config: HeadingConfig) -> Result<Self> {
        let document_id = document_id.into();
        if document_id.trim().is_empty() {
            return Err(Error::InvalidInput(
                "document identifier must not be empty".to_string(),
            ));
        }
        Ok(Self {
            document_id,
            classifier: HeadingClassifier::new(config),
        })
    }

    /// Identifier stamped on every produced section.
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Segment pages in document order.
    pub fn segment(&self, pages: &[PageSpans]) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut open: Option<OpenSection> = None;

        for page in pages {
            let page_number = page.context.page_number();

            for span in &page.spans {
                if span.is_blank() {
                    continue;
                }
                let text = span.trimmed();

                if self.classifier.classify(span, &page.context).is_some() {
                    self.close(open.take(), &mut sections);
                    open = Some(OpenSection {
                        title: text.to_string(),
                        parts: Vec::new(),
                        page_number,
                        headed: true,
                    });
                    continue;
                }

                open.get_or_insert_with(|| OpenSection {
                    title: text.chars().take(UNTITLED_TITLE_CHARS).collect(),
                    parts: Vec::new(),
                    page_number,
                    headed: false,
                })
                .parts
                .push(text.to_string());
            }

            if open.as_ref().is_some_and(|s| !s.headed) {
                self.close(open.take(), &mut sections);
            }
        }
        self.close(open, &mut sections);

        log::debug!(
            "{}: {} sections over {} pages",
            self.document_id,
            sections.len(),
            pages.len()
        );
        sections
    }

    fn close(&self, open: Option<OpenSection>, sections: &mut Vec<Section>) {
        if let Some(section) = open.and_then(|s| s.into_section(&self.document_id)) {
            sections.push(section);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, PageContext, TextSpan};

    fn page(index: u32, spans: Vec<(&str, f32, bool)>) -> PageSpans {
        let mut page = PageSpans::new(PageContext::new(index, 600.0, 800.0));
        for (text, size, bold) in spans {
            page.push(
                TextSpan::new(text, size, "Times", BBox::new(50.0, 0.0, 150.0, 10.0), index)
                    .with_bold(bold),
            );
        }
        page
    }

    fn segmenter() -> SectionSegmenter {
        SectionSegmenter::new("guide.pdf", HeadingConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_document_id_is_rejected() {
        let err = SectionSegmenter::new("  ", HeadingConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_heading_delimited_sections() {
        let pages = vec![page(
            0,
            vec![
                ("Coastal Adventures", 18.0, true),
                ("Beaches line the coast.", 10.0, false),
                ("Boats leave at noon.", 10.0, false),
                ("Nightlife", 16.0, true),
                ("Bars open late.", 10.0, false),
            ],
        )];

        let sections = segmenter().segment(&pages);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Coastal Adventures");
        assert_eq!(
            sections[0].content,
            "Beaches line the coast. Boats leave at noon."
        );
        assert_eq!(sections[0].document_id, "guide.pdf");
        assert_eq!(sections[1].title, "Nightlife");
        assert_eq!(sections[1].page_number, 1);
    }

    #[test]
    fn test_headed_section_spans_pages() {
        let pages = vec![
            page(
                0,
                vec![("Cuisine", 18.0, true), ("Seafood is common.", 10.0, false)],
            ),
            page(1, vec![("Wine is local.", 10.0, false)]),
        ];

        let sections = segmenter().segment(&pages);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].page_number, 1);
        assert_eq!(sections[0].content, "Seafood is common. Wine is local.");
    }

    #[test]
    fn test_untitled_section_uses_first_line() {
        let long = "x".repeat(120);
        let pages = vec![
            page(0, vec![(long.as_str(), 10.0, false), ("More text.", 10.0, false)]),
            page(1, vec![("Second page body.", 10.0, false)]),
        ];

        let sections = segmenter().segment(&pages);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title.chars().count(), 80);
        assert_eq!(sections[0].page_number, 1);
        assert_eq!(sections[1].title, "Second page body.");
        assert_eq!(sections[1].page_number, 2);
    }

    #[test]
    fn test_headings_without_body_are_dropped() {
        let pages = vec![page(
            0,
            vec![
                ("Chapter One", 18.0, true),
                ("Chapter Two", 18.0, true),
                ("Body of two.", 10.0, false),
                ("Chapter Three", 18.0, true),
            ],
        )];

        let sections = segmenter().segment(&pages);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Chapter Two");
    }

    #[test]
    fn test_blank_spans_ignored() {
        let pages = vec![page(0, vec![("   ", 10.0, false), ("", 24.0, true)])];
        assert!(segmenter().segment(&pages).is_empty());
        assert!(segmenter().segment(&[]).is_empty());
    }
}
