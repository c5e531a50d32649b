//! Selection of the top sections of a collection.

use std::cmp::Ordering;

use crate::model::{
    round_score, CollectionResult, ExtractedSection, ScoredSection, SectionSummary, TierCounts,
};

/// Options for selecting and reporting ranked sections.
#[derive(Debug, Clone, PartialEq)]
pub struct RankOptions {
    /// Number of sections selected (default: 15)
    pub top_k: usize,
    /// Maximum characters of content kept per section (default: 500)
    pub max_content_chars: usize,
    /// Marker appended to truncated content
    pub ellipsis: String,
    /// Number of entries in the top summary (default: 5)
    pub summary_len: usize,
    /// Scores strictly above this are high relevance
    pub high_threshold: f64,
    /// Scores strictly below this are low relevance
    pub low_threshold: f64,
}

impl RankOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of selected sections.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the content display cap.
    pub fn with_max_content_chars(mut self, chars: usize) -> Self {
        self.max_content_chars = chars;
        self
    }

    /// Set the summary length.
    pub fn with_summary_len(mut self, len: usize) -> Self {
        self.summary_len = len;
        self
    }

    /// Set the tier thresholds.
    pub fn with_thresholds(mut self, low: f64, high: f64) -> Self {
        self.low_threshold = low;
        self.high_threshold = high;
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: 15,
            max_content_chars: 500,
            ellipsis: "...".to_string(),
            summary_len: 5,
            high_threshold: 0.7,
            low_threshold: 0.4,
        }
    }
}

/// Orders scored sections and reports the best of them.
#[derive(Debug, Clone, Default)]
pub struct CollectionAggregator {
    options: RankOptions,
}

impl CollectionAggregator {
    /// Create an aggregator.
    pub fn new(options: RankOptions) -> Self {
        Self { options }
    }

    /// The active options.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Sort descending by score, then by discovery sequence, and keep the top K.
    ///
    /// Non-finite or negative scores are treated as 0.
    pub fn select(&self, mut scored: Vec<ScoredSection>) -> Vec<ScoredSection> {
        for s in &mut scored {
            if !s.relevance_score.is_finite() || s.relevance_score < 0.0 {
                log::warn!(
                    "Invalid score {} for section {:?} of {}, using 0",
                    s.relevance_score,
                    s.section.title,
                    s.section.document_id
                );
                s.relevance_score = 0.0;
            }
        }

        scored.sort_by(compare);
        scored.truncate(self.options.top_k);
        scored
    }

    /// Select the top sections and build the collection result.
    pub fn aggregate(&self, scored: Vec<ScoredSection>) -> CollectionResult {
        let selected = self.select(scored);
        let opts = &self.options;

        let mut tier_counts = TierCounts::default();
        for s in &selected {
            let score = s.relevance_score;
            if score > opts.high_threshold {
                tier_counts.high += 1;
            } else if score >= opts.low_threshold {
                tier_counts.medium += 1;
            } else {
                tier_counts.low += 1;
            }
        }

        let top_summary = selected
            .iter()
            .take(opts.summary_len)
            .map(|s| SectionSummary {
                document: s.section.document_id.clone(),
                title: s.section.title.clone(),
                score: round_score(s.relevance_score),
            })
            .collect();

        let extracted_sections = selected
            .iter()
            .map(|s| ExtractedSection {
                document_filename: s.section.document_id.clone(),
                section_title: s.section.title.clone(),
                content: truncate_content(&s.section.content, opts.max_content_chars, &opts.ellipsis),
                page_number: s.section.page_number,
                relevance_score: round_score(s.relevance_score),
            })
            .collect();

        CollectionResult {
            extracted_sections,
            tier_counts,
            top_summary,
            has_high_relevance: tier_counts.high > 0,
        }
    }
}

fn compare(a: &ScoredSection, b: &ScoredSection) -> Ordering {
    b.relevance_score
        .total_cmp(&a.relevance_score)
        .then_with(|| a.sequence.cmp(&b.sequence))
}

/// Cut content to `max_chars` characters, appending `ellipsis` when cut.
pub fn truncate_content(content: &str, max_chars: usize, ellipsis: &str) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &content[..byte_idx], ellipsis),
        None => content.to_string(),
    }
}
