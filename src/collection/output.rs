//! Collection output file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{ExtractedSection, SectionSummary, TierCounts};
use crate::rank::RankedCollection;

use super::input::CollectionInput;

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMetadata {
    /// Unix timestamp (seconds) of the run
    pub processing_timestamp: i64,
    /// Role lowercased with spaces replaced by underscores
    pub persona_type: String,
    /// Task description
    pub job_context: String,
    /// Number of documents listed in the input
    pub total_documents_processed: usize,
    /// Number of sections scored
    pub total_sections_analyzed: usize,
    /// Number of sections in `extracted_sections`
    pub top_sections_selected: usize,
    /// Documents that produced sections
    pub input_documents: Vec<String>,
}

/// How well the selection matches the persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaInsights {
    pub identified_persona: String,
    /// "high" when any selected section is highly relevant, else "medium"
    pub alignment_quality: String,
    pub persona_context: String,
    pub task_context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub persona_insights: PersonaInsights,
    pub content_distribution: TierCounts,
    pub top_sections_summary: Vec<SectionSummary>,
}

/// Contents of a collection's output JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionOutput {
    /// Echo of the input's challenge metadata
    pub challenge_info: Map<String, Value>,
    pub metadata: OutputMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: SubsectionAnalysis,
}

impl CollectionOutput {
    /// Assemble the output of a ranked collection.
    pub fn new(input: &CollectionInput, ranked: RankedCollection, timestamp: i64) -> Self {
        let role = input.persona.role.clone();
        let task = input.job_to_be_done.task.clone();
        let result = ranked.result;

        let alignment_quality = if result.has_high_relevance {
            "high"
        } else {
            "medium"
        };

        Self {
            challenge_info: input.challenge_info.clone(),
            metadata: OutputMetadata {
                processing_timestamp: timestamp,
                persona_type: persona_type(&role),
                job_context: task.clone(),
                total_documents_processed: input.documents.len(),
                total_sections_analyzed: ranked.total_sections,
                top_sections_selected: result.extracted_sections.len(),
                input_documents: ranked.contributing_documents,
            },
            extracted_sections: result.extracted_sections,
            subsection_analysis: SubsectionAnalysis {
                persona_insights: PersonaInsights {
                    identified_persona: role.clone(),
                    alignment_quality: alignment_quality.to_string(),
                    persona_context: role,
                    task_context: task,
                },
                content_distribution: result.tier_counts,
                top_sections_summary: result.top_summary,
            },
        }
    }
}

/// Lowercase a role and replace spaces with underscores.
pub fn persona_type(role: &str) -> String {
    role.to_lowercase().replace(' ', "_")
}
