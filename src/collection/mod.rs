//! Collection processing.
//!
//! A collection is a directory holding an input JSON that names a persona,
//! a task and a list of documents, plus a `PDFs/` directory with those
//! documents. Processing ranks the sections of every listed document and
//! writes the output JSON next to the input.

mod input;
mod output;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::PageSpans;
use crate::parser::{read_pages, ExtractOptions, PdfSpanSource};
use crate::rank::CollectionRanker;
use crate::render::{to_json, JsonFormat};

pub use input::{CollectionInput, DocumentRef, JobToBeDone, Persona};
pub use output::{persona_type, CollectionOutput, OutputMetadata, PersonaInsights, SubsectionAnalysis};

/// Name of the input file inside a collection directory.
pub const INPUT_FILE: &str = "challenge1b_input.json";

/// Name of the output file written into a collection directory.
pub const OUTPUT_FILE: &str = "challenge1b_output.json";

/// Directory holding a collection's documents.
pub const PDF_DIR: &str = "PDFs";

/// Ranks the documents of collection directories.
#[derive(Debug, Clone)]
pub struct CollectionProcessor {
    ranker: CollectionRanker,
    extract: ExtractOptions,
    format: JsonFormat,
}

impl Default for CollectionProcessor {
    fn default() -> Self {
        Self::new(CollectionRanker::default())
    }
}

impl CollectionProcessor {
    /// Create a processor around a ranker.
    pub fn new(ranker: CollectionRanker) -> Self {
        let extract = ExtractOptions::default();
        Self {
            ranker: ranker.with_parallel(extract.parallel),
            extract,
            format: JsonFormat::default(),
        }
    }

    /// Set extraction options. Their `parallel` flag also drives ranking.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.ranker = self.ranker.with_parallel(extract.parallel);
        self.extract = extract;
        self
    }

    /// Set the JSON layout of the output file.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Rank the documents an input lists, reading them from `dir/PDFs`.
    ///
    /// Missing or unreadable documents are skipped with a warning.
    pub fn process(&self, input: &CollectionInput, dir: &Path) -> CollectionOutput {
        let profile = self
            .ranker
            .profile(&input.persona.role, &input.job_to_be_done.task);
        let ids = input.filenames();
        let pdf_dir = dir.join(PDF_DIR);

        let ranked = self
            .ranker
            .rank_with(&ids, &profile, |_, filename| self.load(&pdf_dir, filename));

        CollectionOutput::new(input, ranked, chrono::Utc::now().timestamp())
    }

    /// Load a collection's input, rank it and write its output JSON.
    ///
    /// Returns [`Error::MissingDocument`] when the directory has no input file.
    pub fn run<P: AsRef<Path>>(&self, dir: P) -> Result<CollectionOutput> {
        let dir = dir.as_ref();
        let input_path = input_path(dir);
        if !input_path.is_file() {
            return Err(Error::MissingDocument(input_path.display().to_string()));
        }

        let input = CollectionInput::load(&input_path)?;
        log::info!(
            "Processing collection {} ({} documents)",
            dir.display(),
            input.documents.len()
        );

        let output = self.process(&input, dir);
        let json = to_json(&output, self.format)?;
        fs::write(output_path(dir), json)?;
        Ok(output)
    }

    fn load(&self, pdf_dir: &Path, filename: &str) -> Result<Vec<PageSpans>> {
        let path = pdf_dir.join(filename);
        if !path.is_file() {
            return Err(Error::MissingDocument(path.display().to_string()));
        }
        let source = PdfSpanSource::open(&path)?;
        read_pages(&source, &self.extract)
    }
}

/// Path of the input JSON of a collection directory.
pub fn input_path(dir: &Path) -> PathBuf {
    dir.join(INPUT_FILE)
}

/// Path of the output JSON of a collection directory.
pub fn output_path(dir: &Path) -> PathBuf {
    dir.join(OUTPUT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"{
        "challenge_info": {"challenge_id": "round_1b_001"},
        "documents": [{"filename": "missing.pdf", "title": "Missing"}],
        "persona": {"role": "HR Professional"},
        "job_to_be_done": {"task": "Create and manage fillable forms for onboarding."}
    }"#;

    #[test]
    fn test_run_without_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CollectionProcessor::default().run(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MissingDocument(_)));
        assert!(!output_path(dir.path()).exists());
    }

    #[test]
    fn test_run_with_missing_documents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(input_path(dir.path()), INPUT).unwrap();

        let output = CollectionProcessor::default().run(dir.path()).unwrap();
        assert_eq!(output.metadata.total_documents_processed, 1);
        assert_eq!(output.metadata.total_sections_analyzed, 0);
        assert!(output.metadata.input_documents.is_empty());
        assert!(output.extracted_sections.is_empty());
        assert_eq!(output.metadata.persona_type, "hr_professional");

        let written = fs::read_to_string(output_path(dir.path())).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["challenge_info"]["challenge_id"], "round_1b_001");
        assert_eq!(
            json["subsection_analysis"]["persona_insights"]["alignment_quality"],
            "medium"
        );
    }

    #[test]
    fn test_run_with_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(input_path(dir.path()), "[1, 2").unwrap();
        let err = CollectionProcessor::default().run(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_unreadable_pdf_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(PDF_DIR)).unwrap();
        fs::write(dir.path().join(PDF_DIR).join("missing.pdf"), b"garbage").unwrap();
        fs::write(input_path(dir.path()), INPUT).unwrap();

        let processor =
            CollectionProcessor::default().with_extract_options(ExtractOptions::new().sequential());
        let output = processor.run(dir.path()).unwrap();
        assert_eq!(output.metadata.total_sections_analyzed, 0);
    }
}
