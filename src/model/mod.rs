//! Data model shared by the outline and ranking pipelines.
//!
//! Spans come from a [`SpanSource`](crate::parser::SpanSource); outlines and
//! ranked sections are the two computed outputs.

mod outline;
mod section;
mod span;

pub use outline::{HeadingEntry, HeadingLevel, Outline};
pub use section::{
    round_score, CollectionResult, ExtractedSection, ScoredSection, Section, SectionSummary,
    Sequence, TierCounts,
};
pub use span::{is_bold_font, BBox, PageContext, PageSpans, TextSpan};
