//! Corpus statistics: word and stem frequencies, recurring phrases.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::morphology::MorphologyContext;

/// Entries in the `top_words` and `top_stems` lists.
pub const TOP_N: usize = 20;
pub const MIN_PHRASE_LEN: usize = 2;
pub const MAX_PHRASE_LEN: usize = 5;
pub const MIN_PHRASE_FREQUENCY: usize = 2;
pub const MAX_PHRASES: usize = 50;

// ============================================================================
// Regex Patterns (compiled once)
// ============================================================================

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+").unwrap());

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+\b").unwrap());

static PUNCTUATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s\-]").unwrap());

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

/// A text with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub text: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub total_words: usize,
    pub unique_words: usize,
    pub unique_stems: usize,
    /// Most frequent first, ties alphabetical.
    pub word_frequency: Vec<FrequencyEntry>,
    pub stem_frequency: Vec<FrequencyEntry>,
    pub stem_to_words: BTreeMap<String, Vec<String>>,
    pub top_words: Vec<FrequencyEntry>,
    pub top_stems: Vec<FrequencyEntry>,
    /// Counts of every n-gram of two to five tokens.
    #[serde(skip)]
    pub ngram_counts: HashMap<String, usize>,
}

impl TextAnalysis {
    pub fn stem_count(&self, stem: &str) -> usize {
        self.stem_frequency
            .iter()
            .find(|entry| entry.text == stem)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    /// Occurrences of a multi-word phrase, matched on its normalized tokens.
    pub fn phrase_count(&self, phrase: &str) -> usize {
        let key = tokenize(&normalize_text(phrase)).join(" ");
        self.ngram_counts.get(&key).copied().unwrap_or(0)
    }
}

/// Lowercase, drop URLs, e-mail addresses, bare numbers and punctuation,
/// collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    let text = text.to_lowercase();
    let text = URL_RE.replace_all(&text, "");
    let text = EMAIL_RE.replace_all(&text, "");
    let text = NUMBER_RE.replace_all(&text, "");
    let text = PUNCTUATION_RE.replace_all(&text, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word tokens longer than two characters that are not all digits.
pub fn tokenize(normalized: &str) -> Vec<String> {
    WORD_RE
        .find_iter(normalized)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() > 2 && !w.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Word and stem statistics for a text.
pub fn analyze_text(ctx: &MorphologyContext, text: &str) -> Result<TextAnalysis> {
    let words = tokenize(&normalize_text(text));

    let mut word_counts: HashMap<&str, usize> = HashMap::new();
    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    let mut stem_to_words: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut stems: HashMap<&str, String> = HashMap::new();

    for word in &words {
        *word_counts.entry(word.as_str()).or_default() += 1;

        let stem = match stems.get(word.as_str()) {
            Some(stem) => stem.clone(),
            None => {
                let stem = ctx.root_of(word)?;
                stems.insert(word.as_str(), stem.clone());
                stem
            }
        };
        *stem_counts.entry(stem.clone()).or_default() += 1;
        stem_to_words.entry(stem).or_default().insert(word.clone());
    }

    let ngram_counts = count_ngrams(&words);
    let word_frequency = sorted_counts(word_counts.into_iter().map(|(w, c)| (w.to_string(), c)));
    let stem_frequency = sorted_counts(stem_counts.into_iter());

    tracing::debug!(
        "Analyzed {} tokens into {} stems",
        words.len(),
        stem_frequency.len()
    );

    Ok(TextAnalysis {
        total_words: words.len(),
        unique_words: word_frequency.len(),
        unique_stems: stem_frequency.len(),
        top_words: word_frequency.iter().take(TOP_N).cloned().collect(),
        top_stems: stem_frequency.iter().take(TOP_N).cloned().collect(),
        word_frequency,
        stem_frequency,
        stem_to_words: stem_to_words
            .into_iter()
            .map(|(stem, words)| (stem, words.into_iter().collect()))
            .collect(),
        ngram_counts,
    })
}

/// Recurring n-grams of two to five tokens, most frequent first.
pub fn extract_phrases(text: &str) -> Vec<FrequencyEntry> {
    let words = tokenize(&normalize_text(text));

    let mut phrases = sorted_counts(
        count_ngrams(&words)
            .into_iter()
            .filter(|(_, count)| *count >= MIN_PHRASE_FREQUENCY),
    );
    phrases.truncate(MAX_PHRASES);
    phrases
}

fn count_ngrams(words: &[String]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for n in MIN_PHRASE_LEN..=MAX_PHRASE_LEN.min(words.len()) {
        for window in words.windows(n) {
            *counts.entry(window.join(" ")).or_default() += 1;
        }
    }
    counts
}

fn sorted_counts(counts: impl Iterator<Item = (String, usize)>) -> Vec<FrequencyEntry> {
    let mut entries: Vec<FrequencyEntry> = counts
        .map(|(text, count)| FrequencyEntry { text, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.text.cmp(&b.text)));
    entries
}
