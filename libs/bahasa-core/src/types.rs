//! Core types shared by the analyzer, scorer and evaluator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a catalog entry.
pub type ItemId = i64;

/// Identifier of a learner. Progress is tracked per (learner, item).
pub type LearnerId = Uuid;

/// Whether an entry is a single word or a short phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Word,
    Phrase,
}

impl ItemKind {
    /// Infer the kind from the surface form: anything with inner whitespace is a phrase.
    pub fn infer(surface: &str) -> Self {
        if surface.trim().split_whitespace().nth(1).is_some() {
            Self::Phrase
        } else {
            Self::Word
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Phrase => "phrase",
        }
    }
}

/// Coarse difficulty bands used when picking distractors and quiz items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    /// 1-2 easy, 3 medium, 4-5 hard.
    pub fn of(difficulty: u8) -> Self {
        match difficulty {
            0..=2 => Self::Easy,
            3 => Self::Medium,
            _ => Self::Hard,
        }
    }
}

/// Vocabulary entry. Only `root` changes after import, and only once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalItem {
    pub id: ItemId,
    pub surface_form: String,
    pub kind: ItemKind,
    pub translation: String,
    /// Empty until the analyzer has run.
    #[serde(default)]
    pub root: String,
    pub frequency: u32,
    /// 1 (easiest) to 5 (hardest).
    pub difficulty: u8,
}

impl LexicalItem {
    pub fn tier(&self) -> DifficultyTier {
        DifficultyTier::of(self.difficulty)
    }
}

/// Learning status of a single item for a single learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStatus {
    NotStarted,
    Learning,
    Mastered,
}

impl Default for LearningStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl LearningStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Learning => "learning",
            Self::Mastered => "mastered",
        }
    }
}

/// Per-(learner, item) progress record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProgress {
    pub learner_id: LearnerId,
    pub item_id: ItemId,
    pub status: LearningStatus,
    /// Share of passes in the rolling window, 0.0 to 1.0.
    pub accuracy_rate: f64,
    pub consecutive_correct: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub review_count: u32,
    /// Most recent outcomes, oldest first, bounded by the accuracy window.
    #[serde(default)]
    pub recent_outcomes: Vec<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastered_at: Option<DateTime<Utc>>,
}

impl LearningProgress {
    /// Fresh record for an item the learner has never seen.
    pub fn new(learner_id: LearnerId, item_id: ItemId) -> Self {
        Self {
            learner_id,
            item_id,
            status: LearningStatus::NotStarted,
            accuracy_rate: 0.0,
            consecutive_correct: 0,
            correct_count: 0,
            incorrect_count: 0,
            review_count: 0,
            recent_outcomes: Vec::new(),
            last_reviewed: None,
            learning_started_at: None,
            mastered_at: None,
        }
    }

    /// Scheduler transition when an item is first presented.
    /// Returns true if the status changed.
    pub fn mark_started(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != LearningStatus::NotStarted {
            return false;
        }
        self.status = LearningStatus::Learning;
        self.learning_started_at.get_or_insert(now);
        true
    }

    /// Explicit demotion of a mastered item back into active learning.
    /// Never triggered by a failed answer on its own.
    pub fn demote(&mut self) -> bool {
        if self.status != LearningStatus::Mastered {
            return false;
        }
        self.status = LearningStatus::Learning;
        self.consecutive_correct = 0;
        self.mastered_at = None;
        true
    }
}

/// Test presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestMode {
    Typing,
    MultipleChoice,
}

impl Default for TestMode {
    fn default() -> Self {
        Self::Typing
    }
}

/// Which side of an entry is shown and which is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Show the Indonesian form, ask for the translation.
    ToTranslation,
    /// Show the translation, ask for the Indonesian form.
    ToSurface,
}

impl Default for Direction {
    fn default() -> Self {
        Self::ToSurface
    }
}

impl Direction {
    pub fn prompt<'a>(&self, item: &'a LexicalItem) -> &'a str {
        match self {
            Self::ToTranslation => &item.surface_form,
            Self::ToSurface => &item.translation,
        }
    }

    pub fn answer<'a>(&self, item: &'a LexicalItem) -> &'a str {
        match self {
            Self::ToTranslation => &item.translation,
            Self::ToSurface => &item.surface_form,
        }
    }
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::Fuzzy
    }
}

/// Append-only audit record of one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: Uuid,
    pub item_id: ItemId,
    pub mode: TestMode,
    pub submitted_answer: String,
    /// The acceptable answer the submission matched best.
    pub expected_answer: String,
    pub similarity: f64,
    pub passed: bool,
    pub timestamp: DateTime<Utc>,
}
