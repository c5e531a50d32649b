//! Extraction options and configuration.

/// Page limit applied to documents unless overridden.
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Options for reading spans out of documents.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode for individual pages
    pub error_mode: ErrorMode,

    /// Documents with more pages than this are rejected (0 = unlimited)
    pub max_pages: u32,

    /// Whether to process documents of a collection in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail the whole document when any page cannot be read.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the page limit (0 disables it).
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check whether a document of `pages` pages is within the limit.
    pub fn allows_pages(&self, pages: u32) -> bool {
        self.max_pages == 0 || pages <= self.max_pages
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_pages: DEFAULT_MAX_PAGES,
            parallel: true,
        }
    }
}

/// Error handling mode while reading pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    Strict,
    /// Replace unreadable pages with empty ones and continue
    #[default]
    Lenient,
}
