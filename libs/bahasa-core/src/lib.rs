//! Core library for Indonesian vocabulary study.
//!
//! Provides:
//! - Rule-based morphological analysis (affix stripping with nasal fusion)
//! - Corpus statistics and recurring-phrase extraction
//! - Vocabulary-list parser and in-memory catalog
//! - Learning-priority ranking and daily recommendations
//! - Answer evaluation, mastery tracking and multiple-choice distractors
//! - Shared types (LexicalItem, LearningProgress, TestResult, etc.)

pub mod catalog;
pub mod corpus;
pub mod error;
pub mod evaluator;
pub mod matching;
pub mod morphology;
pub mod parser;
pub mod priority;
pub mod session;
pub mod settings;
pub mod types;

pub use catalog::Catalog;
pub use corpus::{analyze_text, extract_phrases, FrequencyEntry, TextAnalysis};
pub use error::{CoreError, ParseError, ParseResult, Result};
pub use evaluator::{acceptable_answers, apply_result, evaluate, pick_distractors, ProgressUpdate};
pub use matching::{compare_answers, fold, similarity, MatchResult};
pub use morphology::{stem, Candidate, MorphologyContext, RootDictionary, RuleTable};
pub use parser::{parse, VocabEntry};
pub use priority::{
    breakdown, rank, recommendations, Breakdown, PriorityScorer, RankQuery, RankedItem,
    Recommendations, StatusCounts,
};
pub use session::{build_question, build_quiz, QuizQuestion, SessionSummary};
pub use settings::{SettingsOverride, StudySettings};
pub use types::{
    Direction, DifficultyTier, ItemId, ItemKind, LearnerId, LearningProgress, LearningStatus,
    LexicalItem, MatchingMode, TestMode, TestResult,
};
