//! Rule-based morphological analysis of Indonesian word forms.
//!
//! Stemming runs three passes over a growing set of hypotheses: confixes,
//! prefixes (up to two stacked), then suffixes (clitic before derivational).
//! The unstripped branch is always kept, so the dictionary check at the end
//! decides between "this is an affix" and "this belongs to the root".

pub mod dictionary;
pub mod rules;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
pub use dictionary::RootDictionary;
pub use rules::{AffixKind, AffixRule, Attachment, Condition, Nasal, RuleTable, SuffixSlot};
use rules::{is_vowel, Reconstruction};

/// Confidence of a dictionary hit.
pub const MAX_CONFIDENCE: f64 = 1.0;
/// Confidence of the identity fallback when nothing else survives.
pub const MIN_CONFIDENCE: f64 = 0.1;

const HEURISTIC_BASE: f64 = 0.4;
const AFFIX_BONUS: f64 = 0.1;
const MAX_BONUS_AFFIXES: u32 = 3;
const MAX_PREFIX_LAYERS: usize = 2;
const DEFAULT_MIN_ROOT_LEN: usize = 3;

/// Consonant pairs that may open a root (native digraphs and common loans).
const ONSET_CLUSTERS: &[&str] = &[
    "ng", "ny", "kh", "sy", "tr", "pr", "kr", "br", "dr", "gr", "fr", "bl", "pl", "kl", "gl",
    "fl", "sl", "sp", "st", "sk", "sw", "sm", "sn",
];

/// Shared, read-only analyzer state: rules, dictionary and length threshold.
#[derive(Debug, Clone)]
pub struct MorphologyContext {
    rules: RuleTable,
    dictionary: RootDictionary,
    min_root_len: usize,
}

impl MorphologyContext {
    pub fn new(rules: RuleTable, dictionary: RootDictionary) -> Self {
        Self {
            rules,
            dictionary,
            min_root_len: DEFAULT_MIN_ROOT_LEN,
        }
    }

    /// Standard rules with the built-in dictionary.
    pub fn indonesian() -> Self {
        Self::new(RuleTable::indonesian(), RootDictionary::indonesian())
    }

    pub fn with_min_root_len(mut self, min_root_len: usize) -> Self {
        self.min_root_len = min_root_len.max(1);
        self
    }

    /// Convenience wrapper around [`stem`].
    pub fn stem(&self, surface: &str) -> Result<Vec<Candidate>> {
        stem(self, surface)
    }

    /// Top candidate's root, or the normalized input for degenerate forms.
    pub fn root_of(&self, surface: &str) -> Result<String> {
        let candidates = stem(self, surface)?;
        Ok(candidates
            .into_iter()
            .next()
            .map(|c| c.root)
            .unwrap_or_else(|| surface.trim().to_lowercase()))
    }
}

impl Default for MorphologyContext {
    fn default() -> Self {
        Self::indonesian()
    }
}

/// A candidate root for a surface form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub root: String,
    pub confidence: f64,
    /// Characters removed from the surface form.
    pub stripped_len: usize,
    pub in_dictionary: bool,
}

impl Candidate {
    fn identity(form: &str) -> Self {
        Self {
            root: form.to_string(),
            confidence: MIN_CONFIDENCE,
            stripped_len: 0,
            in_dictionary: false,
        }
    }
}

#[derive(Debug, Clone)]
struct Hypothesis {
    form: String,
    weight: f64,
    affixes: u32,
}

impl Hypothesis {
    fn surface(form: &str) -> Self {
        Self {
            form: form.to_string(),
            weight: 1.0,
            affixes: 0,
        }
    }

    fn then(&self, rec: Reconstruction) -> Self {
        Self {
            form: rec.root,
            weight: self.weight * rec.weight,
            affixes: self.affixes + 1,
        }
    }
}

/// Reduce a surface form to ranked candidate roots.
///
/// Fails only for empty or whitespace-only input. Multi-word input is stemmed
/// token by token into a single joined candidate.
pub fn stem(ctx: &MorphologyContext, surface: &str) -> Result<Vec<Candidate>> {
    let normalized = surface.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(CoreError::InvalidInput(
            "surface form is empty".to_string(),
        ));
    }

    let tokens: Vec<&str> = normalized
        .split_whitespace()
        .map(clean_token)
        .filter(|t| !t.is_empty())
        .collect();

    let candidates = match tokens.as_slice() {
        [] => vec![Candidate::identity(&normalized)],
        [token] => stem_token(ctx, token),
        _ => vec![stem_phrase(ctx, &tokens)],
    };

    tracing::trace!("Stemmed '{}' into {} candidates", normalized, candidates.len());
    Ok(candidates)
}

fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

fn stem_phrase(ctx: &MorphologyContext, tokens: &[&str]) -> Candidate {
    let tops: Vec<Candidate> = tokens
        .iter()
        .filter_map(|token| stem_token(ctx, token).into_iter().next())
        .collect();

    Candidate {
        root: tops
            .iter()
            .map(|c| c.root.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        confidence: tops
            .iter()
            .map(|c| c.confidence)
            .fold(MAX_CONFIDENCE, f64::min),
        stripped_len: tops.iter().map(|c| c.stripped_len).sum(),
        in_dictionary: tops.iter().all(|c| c.in_dictionary),
    }
}

fn stem_token(ctx: &MorphologyContext, token: &str) -> Vec<Candidate> {
    if token.chars().count() < ctx.rules.shortest_affix_len() {
        return vec![validate_identity(ctx, token)];
    }

    let surface = Hypothesis::surface(token);
    let mut hypotheses = vec![surface.clone()];

    // Confixes, also when a clitic trails the paired suffix.
    let mut confixed = Vec::new();
    for variant in peel(ctx, &surface, &[SuffixSlot::Particle, SuffixSlot::Possessive]) {
        for rule in ctx.rules.confixes() {
            confixed.extend(apply_rule(ctx, rule, &variant));
        }
    }
    hypotheses.extend(confixed);

    let mut frontier = hypotheses.clone();
    for _ in 0..MAX_PREFIX_LAYERS {
        let mut next = Vec::new();
        for hyp in &frontier {
            for rule in ctx.rules.prefixes() {
                next.extend(apply_rule(ctx, rule, hyp));
            }
        }
        if next.is_empty() {
            break;
        }
        hypotheses.extend(next.iter().cloned());
        frontier = next;
    }

    let mut suffixed = Vec::new();
    for hyp in &hypotheses {
        suffixed.extend(
            peel(
                ctx,
                hyp,
                &[
                    SuffixSlot::Particle,
                    SuffixSlot::Possessive,
                    SuffixSlot::Derivational,
                ],
            )
            .into_iter()
            .skip(1),
        );
    }
    hypotheses.extend(suffixed);

    rank(ctx, token, hypotheses)
}

/// Strip at most one suffix per slot, outermost slot first.
/// The first element is always the unchanged hypothesis.
fn peel(ctx: &MorphologyContext, hyp: &Hypothesis, slots: &[SuffixSlot]) -> Vec<Hypothesis> {
    let mut layer = vec![hyp.clone()];
    for slot in slots {
        let mut next = Vec::new();
        for current in &layer {
            for rule in ctx.rules.suffixes(*slot) {
                next.extend(apply_rule(ctx, rule, current));
            }
        }
        layer.extend(next);
    }
    layer
}

fn apply_rule(ctx: &MorphologyContext, rule: &AffixRule, hyp: &Hypothesis) -> Vec<Hypothesis> {
    rule.apply(&hyp.form)
        .into_iter()
        .filter(|rec| rec.root.chars().count() >= ctx.min_root_len)
        .map(|rec| hyp.then(rec))
        .collect()
}

fn validate_identity(ctx: &MorphologyContext, token: &str) -> Candidate {
    if ctx.dictionary.contains(token) {
        Candidate {
            root: token.to_string(),
            confidence: MAX_CONFIDENCE,
            stripped_len: 0,
            in_dictionary: true,
        }
    } else {
        Candidate::identity(token)
    }
}

fn rank(ctx: &MorphologyContext, token: &str, hypotheses: Vec<Hypothesis>) -> Vec<Candidate> {
    let token_len = token.chars().count();
    let mut best: HashMap<String, Candidate> = HashMap::new();

    for hyp in hypotheses {
        let in_dictionary = ctx.dictionary.contains(&hyp.form);
        let confidence = if in_dictionary {
            MAX_CONFIDENCE
        } else if is_plausible_root(&hyp.form, ctx.min_root_len) {
            (HEURISTIC_BASE + AFFIX_BONUS * hyp.affixes.min(MAX_BONUS_AFFIXES) as f64) * hyp.weight
        } else {
            continue;
        };

        let candidate = Candidate {
            stripped_len: token_len.saturating_sub(hyp.form.chars().count()),
            root: hyp.form,
            confidence,
            in_dictionary,
        };

        match best.get(&candidate.root) {
            Some(existing) if !outranks(&candidate, existing) => {}
            _ => {
                best.insert(candidate.root.clone(), candidate);
            }
        }
    }

    if best.is_empty() {
        return vec![Candidate::identity(token)];
    }

    let mut ranked: Vec<Candidate> = best.into_values().collect();
    ranked.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then(a.stripped_len.cmp(&b.stripped_len))
            .then_with(|| a.root.cmp(&b.root))
    });
    ranked
}

fn outranks(a: &Candidate, b: &Candidate) -> bool {
    a.confidence > b.confidence || (a.confidence == b.confidence && a.stripped_len < b.stripped_len)
}

/// Length threshold, at least one vowel, and a pronounceable onset.
fn is_plausible_root(form: &str, min_len: usize) -> bool {
    if form.chars().count() < min_len || !form.chars().any(is_vowel) {
        return false;
    }
    let mut chars = form.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if !is_vowel(a) && !is_vowel(b) && a.is_alphabetic() && b.is_alphabetic() => {
            ONSET_CLUSTERS.iter().any(|cluster| form.starts_with(cluster))
        }
        _ => true,
    }
}
