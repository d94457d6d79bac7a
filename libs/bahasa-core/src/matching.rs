//! Answer matching for typed answers.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::types::MatchingMode;

/// Result of comparing a typed answer to one acceptable answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Similarity of the folded forms, 0.0 to 1.0.
    pub similarity: f64,
    /// The matching mode used.
    pub matching_mode: MatchingMode,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized correct answer (for display).
    pub correct_normalized: String,
}

/// Compare a typed answer to an acceptable answer.
///
/// The reported similarity is always the fuzzy ratio of the folded forms;
/// the mode only decides what counts as correct.
pub fn compare_answers(
    typed: &str,
    correct: &str,
    mode: MatchingMode,
    fuzzy_threshold: f64,
) -> MatchResult {
    let typed_normalized = normalize_whitespace(typed);
    let correct_normalized = normalize_whitespace(correct);

    let typed_folded = fold(&typed_normalized);
    let correct_folded = fold(&correct_normalized);
    let similarity = similarity(&typed_folded, &correct_folded);

    let is_correct = match mode {
        MatchingMode::Exact => typed_normalized == correct_normalized,
        MatchingMode::CaseInsensitive => typed_folded == correct_folded,
        MatchingMode::Fuzzy => similarity >= fuzzy_threshold,
    };

    MatchResult {
        is_correct,
        similarity,
        matching_mode: mode,
        typed_normalized,
        correct_normalized,
    }
}

/// Case- and diacritic-insensitive form used for comparison.
pub fn fold(s: &str) -> String {
    normalize_whitespace(s)
        .to_lowercase()
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect()
}

/// Normalize whitespace in a string (trim and collapse multiple spaces).
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character-level similarity ratio `2 * LCS / (|a| + |b|)`.
///
/// Symmetric, 1.0 for identical inputs (including two empty strings),
/// 0.0 when the inputs share no characters.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let total = a_chars.len() + b_chars.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * longest_common_subsequence(&a_chars, &b_chars) as f64 / total as f64
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Two rows instead of the full table.
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
