//! Persona-driven section ranking.
//!
//! Documents are split into heading-delimited sections, each section is
//! scored against keywords drawn from a persona and task, and the best
//! sections of the whole collection are selected:
//!
//! ```
//! use docrank::rank::{CollectionRanker, DocumentPages};
//!
//! let ranker = CollectionRanker::new();
//! let profile = ranker.profile("Travel Planner", "Plan a four day trip");
//! let ranked = ranker.rank(&[DocumentPages::new("guide.pdf", Vec::new())], &profile);
//! assert!(ranked.result.extracted_sections.is_empty());
//! ```

mod aggregate;
mod persona;
mod ranker;
mod score;
mod segment;
mod tokenize;

pub use aggregate::{truncate_content, CollectionAggregator, RankOptions};
pub use persona::{PersonaProfile, PersonaWeighter, PersonaWeights};
pub use ranker::{CollectionRanker, DocumentPages, RankedCollection};
pub use score::{RelevanceScorer, ScoringConfig};
pub use segment::SectionSegmenter;
pub use tokenize::{is_stopword, tokenize, MIN_TOKEN_LEN};
