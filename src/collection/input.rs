//! Collection input file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// A document listed by a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// File name relative to the collection's PDF directory
    pub filename: String,
    /// Human-readable title, informational only
    #[serde(default)]
    pub title: String,
}

/// The persona a collection is ranked for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Persona {
    /// Role description (e.g., "Travel Planner")
    #[serde(default)]
    pub role: String,
}

/// The task the persona wants to accomplish.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task description
    #[serde(default)]
    pub task: String,
}

/// Contents of a collection's input JSON.
///
/// Missing persona or task fields load as empty strings; they yield an empty
/// profile rather than an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionInput {
    /// Free-form challenge metadata, echoed into the output
    #[serde(default)]
    pub challenge_info: Map<String, Value>,
    /// Documents in ranking order
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
    /// Persona
    #[serde(default)]
    pub persona: Persona,
    /// Job to be done
    #[serde(default)]
    pub job_to_be_done: JobToBeDone,
}

impl CollectionInput {
    /// Parse input from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load input from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Filenames of the listed documents.
    pub fn filenames(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.filename.as_str()).collect()
    }
}
