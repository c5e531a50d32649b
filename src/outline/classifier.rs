//! Heading classification.
//!
//! Each span is scored additively from its font size plus bonuses for
//! boldness, capitalization, centering, trailing colons and heading-like
//! length. The score is then mapped to a level through descending thresholds.

use crate::model::{HeadingLevel, PageContext, TextSpan};

/// Weights and thresholds of the heading score.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingConfig {
    /// Bonus for bold fonts
    pub bold_bonus: f32,
    /// Bonus for all-uppercase text longer than one character
    pub caps_bonus: f32,
    /// Bonus for horizontally centered spans
    pub centered_bonus: f32,
    /// Allowed distance from page center, as a fraction of page width
    pub center_tolerance: f32,
    /// Bonus for short text ending in a colon or written in capitals
    pub emphasis_bonus: f32,
    /// Text must be shorter than this to receive the emphasis bonus
    pub emphasis_max_len: usize,
    /// Bonus for text of heading-like length that is not purely numeric
    pub length_bonus: f32,
    /// Inclusive character range for the length bonus
    pub length_range: (usize, usize),
    /// Minimum score for H1
    pub h1_threshold: f32,
    /// Minimum score for H2
    pub h2_threshold: f32,
    /// Minimum score for H3
    pub h3_threshold: f32,
}

impl HeadingConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bold bonus.
    pub fn with_bold_bonus(mut self, bonus: f32) -> Self {
        self.bold_bonus = bonus;
        self
    }

    /// Set the all-caps bonus.
    pub fn with_caps_bonus(mut self, bonus: f32) -> Self {
        self.caps_bonus = bonus;
        self
    }

    /// Set the centering bonus and tolerance.
    pub fn with_centering(mut self, bonus: f32, tolerance: f32) -> Self {
        self.centered_bonus = bonus;
        self.center_tolerance = tolerance;
        self
    }

    /// Set the level thresholds (H1, H2, H3).
    pub fn with_thresholds(mut self, h1: f32, h2: f32, h3: f32) -> Self {
        self.h1_threshold = h1;
        self.h2_threshold = h2;
        self.h3_threshold = h3;
        self
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            bold_bonus: 2.0,
            caps_bonus: 1.5,
            centered_bonus: 1.0,
            center_tolerance: 0.15,
            emphasis_bonus: 1.0,
            emphasis_max_len: 100,
            length_bonus: 0.5,
            length_range: (3, 50),
            h1_threshold: 16.0,
            h2_threshold: 14.0,
            h3_threshold: 12.0,
        }
    }
}

/// Scores spans and maps scores to heading levels.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier {
    config: HeadingConfig,
}

impl HeadingClassifier {
    /// Create a classifier with the given configuration.
    pub fn new(config: HeadingConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &HeadingConfig {
        &self.config
    }

    /// Compute the heading score, or `None` for blank text.
    pub fn score(&self, span: &TextSpan, page: &PageContext) -> Option<f32> {
        let text = span.text.trim();
        if text.is_empty() {
            return None;
        }

        let cfg = &self.config;
        let len = text.chars().count();
        let upper = is_uppercase(text);
        let mut score = span.font_size;

        if span.is_bold {
            score += cfg.bold_bonus;
        }
        if upper && len > 1 {
            score += cfg.caps_bonus;
        }
        if is_centered(span, page, cfg.center_tolerance) {
            score += cfg.centered_bonus;
        }
        if len < cfg.emphasis_max_len && (text.ends_with(':') || upper) {
            score += cfg.emphasis_bonus;
        }
        let (min_len, max_len) = cfg.length_range;
        if (min_len..=max_len).contains(&len) && !is_numeric(text) {
            score += cfg.length_bonus;
        }

        Some(score)
    }

    /// Map a score to a level; the first threshold met wins.
    pub fn level_for(&self, score: f32) -> Option<HeadingLevel> {
        let cfg = &self.config;
        if score >= cfg.h1_threshold {
            Some(HeadingLevel::H1)
        } else if score >= cfg.h2_threshold {
            Some(HeadingLevel::H2)
        } else if score >= cfg.h3_threshold {
            Some(HeadingLevel::H3)
        } else {
            None
        }
    }

    /// Classify a span as a heading level, or `None` if it is not a heading.
    pub fn classify(&self, span: &TextSpan, page: &PageContext) -> Option<HeadingLevel> {
        self.score(span, page).and_then(|s| self.level_for(s))
    }
}

/// Cased text with no lowercase letters.
fn is_uppercase(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_numeric)
}

fn is_centered(span: &TextSpan, page: &PageContext, tolerance: f32) -> bool {
    (span.bbox.center_x() - page.center_x()).abs() < page.width * tolerance
}
