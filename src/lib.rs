//! # docrank
//!
//! Heading outlines and persona-driven section ranking for PDF documents.
//!
//! The library has two pipelines over the same text spans:
//!
//! - **Outline**: every span is scored from its font size, weight, casing,
//!   centering and length; spans above the heading thresholds become H1, H2
//!   or H3 entries, and the largest span of the first page is the title.
//! - **Ranking**: documents are split into heading-delimited sections, each
//!   section is scored against keywords drawn from a persona and a task, and
//!   the best sections of a collection are selected and bucketed by tier.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docrank::{outline_file, render};
//!
//! fn main() -> docrank::Result<()> {
//!     let outline = outline_file("document.pdf")?;
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! Ranking a collection directory:
//!
//! ```no_run
//! let output = docrank::process_collection("Collection 1").unwrap();
//! for section in &output.extracted_sections {
//!     println!("{} ({})", section.section_title, section.relevance_score);
//! }
//! ```
//!
//! ## Features
//!
//! - **Deterministic**: the same spans always give the same outline and ranking
//! - **Parallel processing**: documents are ranked concurrently with Rayon
//! - **Bounded output**: a fixed number of sections with truncated content
//! - **Soft failures**: one unreadable document never aborts a batch

pub mod collection;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod rank;
pub mod render;

// Re-export commonly used types
pub use collection::{CollectionInput, CollectionOutput, CollectionProcessor};
pub use error::{Error, Result};
pub use model::{
    BBox, CollectionResult, ExtractedSection, HeadingEntry, HeadingLevel, Outline, PageContext,
    PageSpans, ScoredSection, Section, TextSpan, TierCounts,
};
pub use outline::{HeadingClassifier, HeadingConfig, OutlineBuilder, OutlineOptions};
pub use parser::{ErrorMode, ExtractOptions, MemorySpanSource, PdfSpanSource, SpanSource};
pub use rank::{
    CollectionRanker, DocumentPages, PersonaProfile, PersonaWeights, RankOptions, ScoringConfig,
};
pub use render::JsonFormat;

use std::path::Path;

/// Extract the heading outline of a PDF file.
///
/// Errors are returned as-is, including documents over the default page
/// limit. Use [`outline::extract_outline`] for the lenient variant.
///
/// # Example
///
/// ```no_run
/// use docrank::outline_file;
///
/// let outline = outline_file("document.pdf").unwrap();
/// println!("{} headings", outline.len());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    outline_file_with_options(path, &OutlineOptions::default())
}

/// Extract the heading outline of a PDF file with custom options.
pub fn outline_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &OutlineOptions,
) -> Result<Outline> {
    let source = PdfSpanSource::open(path)?;
    OutlineBuilder::new(options.heading.clone()).build_from_source(&source, &options.extract)
}

/// Extract the heading outline of a PDF held in memory.
pub fn outline_bytes(data: &[u8]) -> Result<Outline> {
    let source = PdfSpanSource::from_bytes(data)?;
    OutlineBuilder::default().build_from_source(&source, &ExtractOptions::default())
}

/// Rank a collection directory and write its output JSON.
///
/// # Example
///
/// ```no_run
/// let output = docrank::process_collection("Collection 2").unwrap();
/// println!("{}", output.metadata.persona_type);
/// ```
pub fn process_collection<P: AsRef<Path>>(dir: P) -> Result<CollectionOutput> {
    CollectionProcessor::default().run(dir)
}

/// Builder combining outline and ranking settings.
///
/// # Example
///
/// ```no_run
/// use docrank::Docrank;
///
/// let docrank = Docrank::new().sequential().with_max_pages(100);
/// let outline = docrank.outline("document.pdf").unwrap();
/// let output = docrank.collection("Collection 1").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Docrank {
    extract: ExtractOptions,
    heading: HeadingConfig,
    ranker: CollectionRanker,
    format: JsonFormat,
}

impl Docrank {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail a document when any of its pages cannot be read.
    pub fn strict(mut self) -> Self {
        self.extract = self.extract.strict();
        self
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.extract = self.extract.sequential();
        self
    }

    /// Set the page limit (0 disables it).
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.extract = self.extract.with_max_pages(max_pages);
        self
    }

    /// Set the heading configuration for both pipelines.
    pub fn with_heading_config(mut self, config: HeadingConfig) -> Self {
        self.ranker = self.ranker.with_heading_config(config.clone());
        self.heading = config;
        self
    }

    /// Set persona keyword weights.
    pub fn with_persona_weights(mut self, weights: PersonaWeights) -> Self {
        self.ranker = self.ranker.with_persona_weights(weights);
        self
    }

    /// Set scoring constants.
    pub fn with_scoring(mut self, config: ScoringConfig) -> Self {
        self.ranker = self.ranker.with_scoring(config);
        self
    }

    /// Set selection options.
    pub fn with_rank_options(mut self, options: RankOptions) -> Self {
        self.ranker = self.ranker.with_rank_options(options);
        self
    }

    /// Set the JSON layout of written files.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Options for the outline pipeline.
    pub fn outline_options(&self) -> OutlineOptions {
        OutlineOptions::new()
            .with_extract_options(self.extract.clone())
            .with_heading_config(self.heading.clone())
            .with_format(self.format)
    }

    /// Processor for the ranking pipeline.
    pub fn processor(&self) -> CollectionProcessor {
        CollectionProcessor::new(self.ranker.clone())
            .with_extract_options(self.extract.clone())
            .with_format(self.format)
    }

    /// Extract the outline of a PDF file.
    pub fn outline<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        outline_file_with_options(path, &self.outline_options())
    }

    /// Rank a collection directory and write its output JSON.
    pub fn collection<P: AsRef<Path>>(&self, dir: P) -> Result<CollectionOutput> {
        self.processor().run(dir)
    }
}
