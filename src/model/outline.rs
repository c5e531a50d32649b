//! Outline types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl HeadingLevel {
    /// Numeric depth (1-3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// One heading in a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Trimmed heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl HeadingEntry {
    /// Create a heading entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title plus ordered headings of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (empty if none was found)
    pub title: String,
    /// Headings in discovery order
    pub outline: Vec<HeadingEntry>,
}

impl Outline {
    /// The outline emitted when a document cannot be read.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if the outline has neither title nor headings.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }

    /// Iterate headings of one level.
    pub fn entries_at(&self, level: HeadingLevel) -> impl Iterator<Item = &HeadingEntry> {
        self.outline.iter().filter(move |e| e.level == level)
    }
}
