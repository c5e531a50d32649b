//! Batch outline extraction over a directory of PDFs.
//!
//! Failures stay local to a document: an unreadable file produces the empty
//! outline, an oversized one is skipped, and the batch always continues.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::Outline;
use crate::parser::{ExtractOptions, PdfSpanSource};
use crate::render::{to_json, JsonFormat};

use super::builder::OutlineBuilder;
use super::classifier::HeadingConfig;

/// Options for outline extraction.
#[derive(Debug, Clone, Default)]
pub struct OutlineOptions {
    /// Span extraction options (page limit, error mode, parallelism)
    pub extract: ExtractOptions,
    /// Heading score configuration
    pub heading: HeadingConfig,
    /// JSON layout of written files
    pub format: JsonFormat,
}

impl OutlineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Set heading configuration.
    pub fn with_heading_config(mut self, heading: HeadingConfig) -> Self {
        self.heading = heading;
        self
    }

    /// Set output JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

/// What happened to one document.
#[derive(Debug)]
pub enum OutlineOutcome {
    /// The outline was extracted.
    Extracted(Outline),
    /// The document exceeds the page limit and was skipped.
    Oversized {
        /// Pages in the document
        pages: u32,
        /// Configured limit
        limit: u32,
    },
    /// Spans could not be read; the empty outline stands in.
    Failed(Error),
}

impl OutlineOutcome {
    /// The outline to emit, if any. Failures degrade to the empty outline.
    pub fn to_outline(&self) -> Option<Outline> {
        match self {
            OutlineOutcome::Extracted(outline) => Some(outline.clone()),
            OutlineOutcome::Failed(_) => Some(Outline::empty()),
            OutlineOutcome::Oversized { .. } => None,
        }
    }

    /// Check whether extraction succeeded.
    pub fn is_extracted(&self) -> bool {
        matches!(self, OutlineOutcome::Extracted(_))
    }
}

/// Extract the outline of one PDF without propagating failures.
pub fn extract_outline<P: AsRef<Path>>(path: P, options: &OutlineOptions) -> OutlineOutcome {
    let path = path.as_ref();
    let builder = OutlineBuilder::new(options.heading.clone());

    let result = PdfSpanSource::open(path)
        .and_then(|source| builder.build_from_source(&source, &options.extract));

    match result {
        Ok(outline) => {
            log::info!(
                "Extracted outline of {} ({} headings)",
                path.display(),
                outline.len()
            );
            OutlineOutcome::Extracted(outline)
        }
        Err(Error::TooManyPages { pages, limit }) => {
            log::warn!(
                "Skipping {}: {} pages exceeds the limit of {}",
                path.display(),
                pages,
                limit
            );
            OutlineOutcome::Oversized { pages, limit }
        }
        Err(e) => {
            log::warn!("Error processing {}: {}", path.display(), e);
            OutlineOutcome::Failed(e)
        }
    }
}

/// List `*.pdf` files (case-insensitive) directly inside a directory, sorted.
pub fn pdf_files_in<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output path for a PDF: `<output_dir>/<stem>.json`.
pub fn output_path_for(pdf: &Path, output_dir: &Path) -> PathBuf {
    let stem = pdf.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{}.json", stem))
}

/// Extract one PDF and write its outline JSON into `output_dir`.
///
/// Nothing is written for oversized documents. Only I/O errors on the output
/// side are returned.
pub fn process_file(
    pdf: &Path,
    output_dir: &Path,
    options: &OutlineOptions,
) -> Result<OutlineOutcome> {
    let outcome = extract_outline(pdf, options);

    if let Some(outline) = outcome.to_outline() {
        let json = to_json(&outline, options.format)?;
        fs::write(output_path_for(pdf, output_dir), json)?;
    }

    Ok(outcome)
}

/// Summary of a directory run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Documents whose outline was written
    pub extracted: Vec<PathBuf>,
    /// Documents skipped for exceeding the page limit
    pub oversized: Vec<PathBuf>,
    /// Documents that failed and received the empty outline
    pub failed: Vec<PathBuf>,
}

impl BatchReport {
    /// Total documents seen.
    pub fn total(&self) -> usize {
        self.extracted.len() + self.oversized.len() + self.failed.len()
    }
}

/// Extract outlines for every PDF in `input_dir` into `output_dir`.
pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    options: &OutlineOptions,
) -> Result<BatchReport> {
    process_directory_with(input_dir, output_dir, options, |_, _| {})
}

/// Like [`process_directory`], calling `on_file` as each document finishes.
///
/// With parallel extraction `on_file` runs on worker threads, in completion
/// order.
pub fn process_directory_with<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &OutlineOptions,
    on_file: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&Path, &OutlineOutcome) + Sync,
{
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    let files = pdf_files_in(input_dir)?;

    let run = |pdf: &PathBuf| {
        let result = process_file(pdf, output_dir, options);
        if let Ok(outcome) = &result {
            on_file(pdf, outcome);
        }
        (pdf.clone(), result)
    };
    let results: Vec<(PathBuf, Result<OutlineOutcome>)> = if options.extract.parallel {
        files.par_iter().map(run).collect()
    } else {
        files.iter().map(run).collect()
    };

    let mut report = BatchReport::default();
    for (path, result) in results {
        match result? {
            OutlineOutcome::Extracted(_) => report.extracted.push(path),
            OutlineOutcome::Oversized { .. } => report.oversized.push(path),
            OutlineOutcome::Failed(_) => report.failed.push(path),
        }
    }
    Ok(report)
}
