//! Section and ranking result types.

use serde::{Deserialize, Serialize};

/// A coarse content unit of a document used for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section title (heading text or first line)
    pub title: String,
    /// Body text in reading order
    pub content: String,
    /// Page where the section starts (1-indexed)
    pub page_number: u32,
    /// Identifier of the source document (its filename)
    pub document_id: String,
}

impl Section {
    /// Create a section.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        page_number: u32,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            page_number,
            document_id: document_id.into(),
        }
    }
}

/// Discovery position of a section: document index, then section index.
///
/// Used as the sort tie-break so results do not depend on task completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Sequence {
    /// Index of the document in the collection
    pub document: usize,
    /// Index of the section within its document
    pub section: usize,
}

impl Sequence {
    /// Create a sequence number.
    pub fn new(document: usize, section: usize) -> Self {
        Self { document, section }
    }
}

/// A section with its relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSection {
    /// The scored section
    pub section: Section,
    /// Relevance score (non-negative)
    pub relevance_score: f64,
    /// Discovery position
    pub sequence: Sequence,
}

impl ScoredSection {
    /// Create a scored section.
    pub fn new(section: Section, relevance_score: f64, sequence: Sequence) -> Self {
        Self {
            section,
            relevance_score,
            sequence,
        }
    }
}

/// A selected section as reported externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Source document filename
    pub document_filename: String,
    /// Section title
    pub section_title: String,
    /// Content, truncated for display
    pub content: String,
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Score rounded to 4 decimal digits
    pub relevance_score: f64,
}

/// Counts of selected sections per relevance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierCounts {
    /// Sections scoring above the high threshold
    #[serde(rename = "high_relevance_sections")]
    pub high: usize,
    /// Sections between the low and high thresholds (inclusive)
    #[serde(rename = "medium_relevance_sections")]
    pub medium: usize,
    /// Sections below the low threshold
    #[serde(rename = "low_relevance_sections")]
    pub low: usize,
}

impl TierCounts {
    /// Total number of counted sections.
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Short summary of one of the top sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Source document filename
    pub document: String,
    /// Section title
    pub title: String,
    /// Score rounded to 4 decimal digits
    pub score: f64,
}

/// Ranked result of one collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionResult {
    /// Top sections in descending score order
    pub extracted_sections: Vec<ExtractedSection>,
    /// Tier distribution of the selected sections
    pub tier_counts: TierCounts,
    /// Leading entries of the selection
    pub top_summary: Vec<SectionSummary>,
    /// Whether any selected section reached the high tier
    pub has_high_relevance: bool,
}

/// Round a score to 4 decimal digits for reporting.
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}
