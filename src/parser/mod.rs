//! Span extraction from PDF documents.

pub mod backend;
mod options;
mod source;

pub use backend::{LopdfBackend, PdfBackend};
pub use options::{ErrorMode, ExtractOptions, DEFAULT_MAX_PAGES};
pub use source::{read_pages, MemorySpanSource, PdfSpanSource, SpanSource};
