//! Relevance scoring of sections against a persona profile.

use std::collections::{HashMap, HashSet};

use crate::model::Section;

use super::persona::PersonaProfile;
use super::tokenize::tokenize;

/// Constants of the relevance score.
///
/// For every profile keyword of weight `w`, a title hit adds
/// `w * title_factor` and a body hit adds `w * body_factor * tf / (tf + 1)`.
/// The raw sum is squashed with `1 - exp(-raw / saturation)` and damped by
/// `1 / (1 + length_penalty * ln(1 + tokens / reference_tokens))`, where
/// `tokens` counts only body tokens that match no profile keyword.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    /// Multiplier for keywords found in the section title
    pub title_factor: f64,
    /// Multiplier for keywords found in the section body
    pub body_factor: f64,
    /// Raw score at which the squashed score reaches 1 - 1/e
    pub saturation: f64,
    /// Strength of the length damping
    pub length_penalty: f64,
    /// Body length (in tokens) the damping is measured against
    pub reference_tokens: f64,
}

impl ScoringConfig {
    /// Create the default scoring configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title multiplier.
    pub fn with_title_factor(mut self, factor: f64) -> Self {
        self.title_factor = factor;
        self
    }

    /// Set the body multiplier.
    pub fn with_body_factor(mut self, factor: f64) -> Self {
        self.body_factor = factor;
        self
    }

    /// Set the length damping strength (0 disables it).
    pub fn with_length_penalty(mut self, penalty: f64) -> Self {
        self.length_penalty = penalty;
        self
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            title_factor: 2.0,
            body_factor: 1.0,
            saturation: 3.0,
            length_penalty: 0.1,
            reference_tokens: 400.0,
        }
    }
}

/// Scores sections by keyword overlap with a persona profile.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    config: ScoringConfig,
}

impl RelevanceScorer {
    /// Create a scorer with the given configuration.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a section. Zero overlap scores exactly 0; every score is in `[0, 1)`.
    pub fn score(&self, section: &Section, profile: &PersonaProfile) -> f64 {
        if profile.is_empty() {
            return 0.0;
        }

        let title_tokens: HashSet<String> = tokenize(&section.title).into_iter().collect();
        let body_tokens = tokenize(&section.content);
        let body_len = body_tokens.len();
        let mut body_counts: HashMap<String, usize> = HashMap::new();
        for token in body_tokens {
            *body_counts.entry(token).or_insert(0) += 1;
        }

        let cfg = &self.config;
        let mut raw = 0.0;
        let mut matched = 0;
        // Profile keywords iterate in a fixed order, so the sum is reproducible.
        for (keyword, weight) in profile.keywords() {
            if title_tokens.contains(keyword) {
                raw += weight * cfg.title_factor;
            }
            if let Some(&tf) = body_counts.get(keyword) {
                matched += tf;
                let tf = tf as f64;
                raw += weight * cfg.body_factor * tf / (tf + 1.0);
            }
        }

        if raw <= 0.0 {
            return 0.0;
        }

        // Only tokens matching no keyword count towards length.
        let unmatched = body_len.saturating_sub(matched) as f64;
        let squashed = 1.0 - (-raw / cfg.saturation).exp();
        let damping =
            1.0 / (1.0 + cfg.length_penalty * (1.0 + unmatched / cfg.reference_tokens).ln());
        (squashed * damping).max(0.0)
    }
}
