//! Heading classification and document outlines.
//!
//! [`HeadingClassifier`] turns a span into a heading level, [`select_title`]
//! picks the document title from the first page, and [`OutlineBuilder`]
//! combines both into an [`Outline`](crate::model::Outline).

pub mod batch;
mod builder;
mod classifier;
mod title;

pub use batch::{extract_outline, OutlineOptions, OutlineOutcome};
pub use builder::OutlineBuilder;
pub use classifier::{HeadingClassifier, HeadingConfig};
pub use title::select_title;
