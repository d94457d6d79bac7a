//! Affix rule table for Indonesian.
//!
//! Every affix family is a variant of [`AffixRule`] and is applied through an
//! explicit `match`, so the whole table can be enumerated and tested rule by
//! rule. Nasal fusion (`meN-`, `peN-`) is modelled by [`Nasal`].

use std::cmp::Reverse;

/// Weight of a phonologically regular reconstruction.
pub const REGULAR_WEIGHT: f64 = 1.0;
/// Weight of a fallback reconstruction (the nasal belongs to the root).
pub const FALLBACK_WEIGHT: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixKind {
    Prefix,
    Suffix,
    Confix,
}

/// Slot of a suffix. Particles attach outside possessives, which attach
/// outside derivational suffixes: `buku-nya-lah`, `baca-kan-nya`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuffixSlot {
    Particle,
    Possessive,
    Derivational,
}

/// How the root follows a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// The root follows unchanged (`ber-`, `di-`).
    Plain,
    /// The prefix ends in a nasal that fused with the root-initial consonant.
    NasalFusion,
}

/// Phonological condition on the remainder exposed by a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// Remainder starts with `r` (`te-rima`).
    InitialR,
    /// Remainder starts with `r` or its first syllable ends in `er` (`be-kerja`).
    InitialROrEr,
    /// Remainder is a single syllable (`menge-cat`).
    Monosyllabic,
    /// Remainder starts with one of the listed roots (`bel-ajar`).
    OneOf(&'static [&'static str]),
}

impl Condition {
    pub fn holds(&self, remainder: &str) -> bool {
        match self {
            Self::Always => true,
            Self::InitialR => remainder.starts_with('r'),
            Self::InitialROrEr => {
                let mut chars = remainder.chars();
                match (chars.next(), chars.next(), chars.next(), chars.next()) {
                    (Some('r'), ..) => true,
                    (Some(c), Some('e'), Some('r'), Some(_)) => !is_vowel(c),
                    _ => false,
                }
            }
            Self::Monosyllabic => syllable_count(remainder) == 1,
            Self::OneOf(roots) => roots.iter().any(|root| remainder.starts_with(root)),
        }
    }
}

/// The four nasal allomorphs of `meN-`/`peN-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nasal {
    M,
    N,
    Ny,
    Ng,
}

impl Nasal {
    /// Split a leading nasal off a remainder. Digraphs are matched first.
    pub fn split(remainder: &str) -> Option<(Nasal, &str)> {
        if let Some(rest) = remainder.strip_prefix("ng") {
            Some((Self::Ng, rest))
        } else if let Some(rest) = remainder.strip_prefix("ny") {
            Some((Self::Ny, rest))
        } else if let Some(rest) = remainder.strip_prefix('m') {
            Some((Self::M, rest))
        } else {
            remainder.strip_prefix('n').map(|rest| (Self::N, rest))
        }
    }

    /// Voiceless consonant the nasal replaced before a vowel.
    pub fn fused_consonant(&self) -> char {
        match self {
            Self::M => 'p',
            Self::N => 't',
            Self::Ny => 's',
            Self::Ng => 'k',
        }
    }

    /// Consonants the nasal only assimilates to, leaving them in place.
    pub fn keeps(&self, next: char) -> bool {
        match self {
            Self::M => matches!(next, 'b' | 'f' | 'v' | 'p'),
            Self::N => matches!(next, 'd' | 'c' | 'j' | 'z' | 't' | 's'),
            Self::Ng => matches!(next, 'g' | 'h' | 'k'),
            Self::Ny => false,
        }
    }
}

/// A candidate root produced by one rule application.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    pub root: String,
    pub weight: f64,
}

impl Reconstruction {
    fn regular(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            weight: REGULAR_WEIGHT,
        }
    }

    fn fallback(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            weight: FALLBACK_WEIGHT,
        }
    }
}

/// Undo nasal fusion on whatever follows `me`/`pe`.
///
/// `masak` after `me` yields `pasak` (regular) and `masak` (fallback);
/// `baca` after `mem` keeps the `b`; `ngirim` yields `kirim` and `irim`.
pub fn undo_nasal_fusion(remainder: &str) -> Vec<Reconstruction> {
    let Some((nasal, after)) = Nasal::split(remainder) else {
        return vec![Reconstruction::regular(remainder)];
    };

    match after.chars().next() {
        Some(next) if is_vowel(next) => {
            let mut out = vec![Reconstruction::regular(format!(
                "{}{}",
                nasal.fused_consonant(),
                after
            ))];
            if nasal == Nasal::Ng {
                out.push(Reconstruction::regular(after));
            }
            out.push(Reconstruction::fallback(remainder));
            out
        }
        Some(next) if nasal.keeps(next) => vec![Reconstruction::regular(after)],
        _ => vec![Reconstruction::fallback(remainder)],
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffixRule {
    Confix {
        prefix: &'static str,
        suffix: &'static str,
        attachment: Attachment,
        priority: i32,
    },
    Prefix {
        surface: &'static str,
        attachment: Attachment,
        condition: Condition,
        priority: i32,
    },
    Suffix {
        surface: &'static str,
        slot: SuffixSlot,
        priority: i32,
    },
}

impl AffixRule {
    pub fn kind(&self) -> AffixKind {
        match self {
            Self::Confix { .. } => AffixKind::Confix,
            Self::Prefix { .. } => AffixKind::Prefix,
            Self::Suffix { .. } => AffixKind::Suffix,
        }
    }

    pub fn priority(&self) -> i32 {
        match self {
            Self::Confix { priority, .. }
            | Self::Prefix { priority, .. }
            | Self::Suffix { priority, .. } => *priority,
        }
    }

    /// Human-readable pattern, e.g. `ke-...-an`, `ber-`, `-kan`.
    pub fn surface_pattern(&self) -> String {
        match self {
            Self::Confix { prefix, suffix, .. } => format!("{}-...-{}", prefix, suffix),
            Self::Prefix { surface, .. } => format!("{}-", surface),
            Self::Suffix { surface, .. } => format!("-{}", surface),
        }
    }

    /// Number of characters the rule removes from the surface.
    pub fn affix_len(&self) -> usize {
        match self {
            Self::Confix { prefix, suffix, .. } => prefix.len() + suffix.len(),
            Self::Prefix { surface, .. } | Self::Suffix { surface, .. } => surface.len(),
        }
    }

    /// Apply the rule to a form. An empty result means the rule does not match.
    pub fn apply(&self, form: &str) -> Vec<Reconstruction> {
        match self {
            Self::Confix {
                prefix,
                suffix,
                attachment,
                ..
            } => {
                let Some(inner) = form
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.strip_suffix(suffix))
                else {
                    return Vec::new();
                };
                attach(inner, *attachment)
            }
            Self::Prefix {
                surface,
                attachment,
                condition,
                ..
            } => match form.strip_prefix(surface) {
                Some(rest) if condition.holds(rest) => attach(rest, *attachment),
                _ => Vec::new(),
            },
            Self::Suffix { surface, .. } => form
                .strip_suffix(surface)
                .map(|rest| vec![Reconstruction::regular(rest)])
                .unwrap_or_default(),
        }
    }
}

fn attach(remainder: &str, attachment: Attachment) -> Vec<Reconstruction> {
    if remainder.is_empty() {
        return Vec::new();
    }
    match attachment {
        Attachment::Plain => vec![Reconstruction::regular(remainder)],
        Attachment::NasalFusion => undo_nasal_fusion(remainder),
    }
}

const INDONESIAN_RULES: &[AffixRule] = &[
    // Confixes
    AffixRule::Confix { prefix: "pe", suffix: "an", attachment: Attachment::NasalFusion, priority: 1060 },
    AffixRule::Confix { prefix: "per", suffix: "an", attachment: Attachment::Plain, priority: 1050 },
    AffixRule::Confix { prefix: "ber", suffix: "an", attachment: Attachment::Plain, priority: 1040 },
    AffixRule::Confix { prefix: "ke", suffix: "an", attachment: Attachment::Plain, priority: 1030 },
    AffixRule::Confix { prefix: "se", suffix: "nya", attachment: Attachment::Plain, priority: 1010 },
    // Nasal-fusion prefixes
    AffixRule::Prefix { surface: "menge", attachment: Attachment::Plain, condition: Condition::Monosyllabic, priority: 960 },
    AffixRule::Prefix { surface: "penge", attachment: Attachment::Plain, condition: Condition::Monosyllabic, priority: 950 },
    AffixRule::Prefix { surface: "me", attachment: Attachment::NasalFusion, condition: Condition::Always, priority: 900 },
    AffixRule::Prefix { surface: "pe", attachment: Attachment::NasalFusion, condition: Condition::Always, priority: 880 },
    // Simple prefixes
    AffixRule::Prefix { surface: "ber", attachment: Attachment::Plain, condition: Condition::Always, priority: 700 },
    AffixRule::Prefix { surface: "bel", attachment: Attachment::Plain, condition: Condition::OneOf(&["ajar"]), priority: 695 },
    AffixRule::Prefix { surface: "be", attachment: Attachment::Plain, condition: Condition::InitialROrEr, priority: 690 },
    AffixRule::Prefix { surface: "per", attachment: Attachment::Plain, condition: Condition::Always, priority: 680 },
    AffixRule::Prefix { surface: "pel", attachment: Attachment::Plain, condition: Condition::OneOf(&["ajar"]), priority: 675 },
    AffixRule::Prefix { surface: "ter", attachment: Attachment::Plain, condition: Condition::Always, priority: 660 },
    AffixRule::Prefix { surface: "te", attachment: Attachment::Plain, condition: Condition::InitialR, priority: 655 },
    AffixRule::Prefix { surface: "di", attachment: Attachment::Plain, condition: Condition::Always, priority: 600 },
    AffixRule::Prefix { surface: "ke", attachment: Attachment::Plain, condition: Condition::Always, priority: 590 },
    AffixRule::Prefix { surface: "se", attachment: Attachment::Plain, condition: Condition::Always, priority: 580 },
    // Particles
    AffixRule::Suffix { surface: "lah", slot: SuffixSlot::Particle, priority: 320 },
    AffixRule::Suffix { surface: "kah", slot: SuffixSlot::Particle, priority: 315 },
    AffixRule::Suffix { surface: "tah", slot: SuffixSlot::Particle, priority: 310 },
    AffixRule::Suffix { surface: "pun", slot: SuffixSlot::Particle, priority: 305 },
    // Possessives
    AffixRule::Suffix { surface: "nya", slot: SuffixSlot::Possessive, priority: 260 },
    AffixRule::Suffix { surface: "ku", slot: SuffixSlot::Possessive, priority: 255 },
    AffixRule::Suffix { surface: "mu", slot: SuffixSlot::Possessive, priority: 250 },
    // Derivational suffixes
    AffixRule::Suffix { surface: "kan", slot: SuffixSlot::Derivational, priority: 220 },
    AffixRule::Suffix { surface: "an", slot: SuffixSlot::Derivational, priority: 210 },
    AffixRule::Suffix { surface: "i", slot: SuffixSlot::Derivational, priority: 200 },
];

/// Ordered, immutable set of affix rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<AffixRule>,
}

impl RuleTable {
    /// Standard Indonesian affix inventory.
    pub fn indonesian() -> Self {
        Self::new(INDONESIAN_RULES.to_vec())
    }

    /// Build a table; confixes come first, then descending priority.
    pub fn new(mut rules: Vec<AffixRule>) -> Self {
        rules.sort_by_key(|rule| (rule.kind() != AffixKind::Confix, Reverse(rule.priority())));
        Self { rules }
    }

    pub fn rules(&self) -> &[AffixRule] {
        &self.rules
    }

    pub fn confixes(&self) -> impl Iterator<Item = &AffixRule> {
        self.of_kind(AffixKind::Confix)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &AffixRule> {
        self.of_kind(AffixKind::Prefix)
    }

    pub fn suffixes(&self, wanted: SuffixSlot) -> impl Iterator<Item = &AffixRule> {
        self.rules
            .iter()
            .filter(move |rule| matches!(rule, AffixRule::Suffix { slot, .. } if *slot == wanted))
    }

    /// Length of the shortest affix; shorter forms are never stripped.
    pub fn shortest_affix_len(&self) -> usize {
        self.rules
            .iter()
            .map(AffixRule::affix_len)
            .min()
            .unwrap_or(0)
    }

    fn of_kind(&self, kind: AffixKind) -> impl Iterator<Item = &AffixRule> {
        self.rules.iter().filter(move |rule| rule.kind() == kind)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::indonesian()
    }
}

pub(crate) fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Count vowel groups; `cat` has one, `masak` two.
pub(crate) fn syllable_count(word: &str) -> usize {
    let mut count = 0;
    let mut in_vowel = false;
    for c in word.chars() {
        let vowel = is_vowel(c);
        if vowel && !in_vowel {
            count += 1;
        }
        in_vowel = vowel;
    }
    count
}
