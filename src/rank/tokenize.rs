//! Keyword tokenization shared by persona weighting and scoring.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Tokens shorter than this (in characters) are discarded.
pub const MIN_TOKEN_LEN: usize = 3;

const STOPWORDS: &[&str] = &[
    "about", "after", "all", "also", "and", "any", "are", "been", "before", "being", "between",
    "both", "but", "can", "could", "did", "does", "each", "etc", "for", "from", "get", "had",
    "has", "have", "her", "here", "his", "how", "into", "its", "just", "may", "more", "most",
    "must", "need", "needs", "not", "off", "once", "only", "other", "our", "out", "over", "own",
    "per", "same", "she", "should", "some", "such", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "through", "too", "under", "until",
    "upon", "use", "used", "using", "very", "via", "was", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "within", "would", "you", "your",
];

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+").unwrap())
}

/// Check whether a lowercase token is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.binary_search(&token).is_ok()
}

/// Split text into lowercase keywords.
///
/// Text is NFKC-normalized and lowercased, split on anything that is not a
/// letter or digit, and filtered of stopwords, short tokens and pure numbers.
/// Order and repetitions are preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text.nfkc().collect::<String>().to_lowercase();

    word_regex()
        .find_iter(&normalized)
        .map(|m| m.as_str())
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .filter(|t| !t.chars().all(char::is_numeric))
        .filter(|t| !is_stopword(t))
        .map(str::to_string)
        .collect()
}
