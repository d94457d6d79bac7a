//! API request and response types

use bahasa_core::{
    Candidate, Direction, FrequencyEntry, ItemId, LearningProgress, LexicalItem, ProgressUpdate,
    QuizQuestion, SessionSummary, TestMode, TestResult, TextAnalysis,
};
use serde::{Deserialize, Serialize};

/// Default number of quiz questions.
pub const DEFAULT_QUIZ_SIZE: usize = 10;

// === Analysis ===

#[derive(Debug, Deserialize)]
pub struct StemRequest {
    pub surface: String,
}

#[derive(Debug, Serialize)]
pub struct StemResponse {
    pub surface: String,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeTextResponse {
    pub analysis: TextAnalysis,
    pub phrases: Vec<FrequencyEntry>,
}

// === Catalog ===

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    /// Vocabulary list, one `surface | translation` entry per line.
    pub content: String,
    /// Optional text whose stem frequencies fill in missing frequencies.
    #[serde(default)]
    pub corpus: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub total: usize,
    pub items: Vec<LexicalItem>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub items: Vec<LexicalItem>,
}

// === Study ===

#[derive(Debug, Default, Deserialize)]
pub struct QuizQuery {
    #[serde(default)]
    pub mode: Option<TestMode>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub item_id: ItemId,
    pub submitted: String,
    #[serde(default)]
    pub mode: TestMode,
    #[serde(default)]
    pub direction: Direction,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub result: TestResult,
    pub progress: LearningProgress,
    pub update: ProgressUpdate,
}

#[derive(Debug, Serialize)]
pub struct StatusChangeResponse {
    pub changed: bool,
    pub progress: LearningProgress,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<TestResult>,
    pub summary: SessionSummary,
}
