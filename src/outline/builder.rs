//! Outline construction.

use std::collections::HashSet;

use crate::error::Result;
use crate::model::{HeadingEntry, Outline, PageSpans};
use crate::parser::{read_pages, ExtractOptions, SpanSource};

use super::classifier::{HeadingClassifier, HeadingConfig};
use super::title::select_title;

/// Builds a document outline from page spans.
///
/// Headings are emitted in page order, then span order. A `(text, page)`
/// pair is emitted at most once. Levels are not validated against each
/// other: an H2 may appear without a preceding H1.
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    classifier: HeadingClassifier,
}

impl OutlineBuilder {
    /// Create a builder with the given heading configuration.
    pub fn new(config: HeadingConfig) -> Self {
        Self {
            classifier: HeadingClassifier::new(config),
        }
    }

    /// The classifier used for headings.
    pub fn classifier(&self) -> &HeadingClassifier {
        &self.classifier
    }

    /// Build an outline from pages in document order.
    pub fn build(&self, pages: &[PageSpans]) -> Outline {
        let title = pages
            .first()
            .map(|page| select_title(&page.spans))
            .unwrap_or_default();

        let mut seen: HashSet<(String, u32)> = HashSet::new();
        let mut entries = Vec::new();

        for page in pages {
            let page_number = page.context.page_number();
            for span in &page.spans {
                let Some(level) = self.classifier.classify(span, &page.context) else {
                    continue;
                };
                let text = span.text.trim();
                if seen.insert((text.to_string(), page_number)) {
                    entries.push(HeadingEntry::new(level, text, page_number));
                }
            }
        }

        log::debug!(
            "Outline built: title={:?}, {} headings over {} pages",
            title,
            entries.len(),
            pages.len()
        );

        Outline {
            title,
            outline: entries,
        }
    }

    /// Read every page of a source and build its outline.
    pub fn build_from_source<S: SpanSource + ?Sized>(
        &self,
        source: &S,
        options: &ExtractOptions,
    ) -> Result<Outline> {
        let pages = read_pages(source, options)?;
        Ok(self.build(&pages))
    }
}
