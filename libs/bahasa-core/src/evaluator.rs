//! Answer evaluation, mastery feedback and distractor selection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::matching::{compare_answers, fold, similarity, MatchResult};
use crate::settings::StudySettings;
use crate::types::{
    Direction, ItemId, LearningProgress, LearningStatus, LexicalItem, TestMode, TestResult,
};

/// Grade a submission against the acceptable answers.
///
/// Typing compares the folded submission to every acceptable answer and keeps
/// the best match. Multiple choice accepts only the first (canonical) answer.
pub fn evaluate<S: AsRef<str>>(
    item_id: ItemId,
    submitted: &str,
    expected: &[S],
    mode: TestMode,
    settings: &StudySettings,
) -> Result<TestResult> {
    let canonical = expected
        .first()
        .map(|answer| answer.as_ref())
        .ok_or(CoreError::NoAcceptableAnswer)?;

    let (expected_answer, similarity, passed) = match mode {
        TestMode::Typing => {
            let mut best = (canonical, compare(submitted, canonical, settings));
            for answer in expected.iter().skip(1).map(|answer| answer.as_ref()) {
                let result = compare(submitted, answer, settings);
                if better(&result, &best.1) {
                    best = (answer, result);
                }
            }
            let (answer, result) = best;
            (answer, result.similarity, result.is_correct)
        }
        TestMode::MultipleChoice => {
            let passed = submitted.trim() == canonical.trim();
            (canonical, if passed { 1.0 } else { 0.0 }, passed)
        }
    };

    tracing::debug!(
        "Evaluated item {} ({:?}): similarity {:.3}, passed {}",
        item_id,
        mode,
        similarity,
        passed
    );

    Ok(TestResult {
        id: Uuid::new_v4(),
        item_id,
        mode,
        submitted_answer: submitted.to_string(),
        expected_answer: expected_answer.to_string(),
        similarity,
        passed,
        timestamp: Utc::now(),
    })
}

fn compare(submitted: &str, answer: &str, settings: &StudySettings) -> MatchResult {
    compare_answers(
        submitted,
        answer,
        settings.matching_mode,
        settings.pass_threshold,
    )
}

fn better(a: &MatchResult, b: &MatchResult) -> bool {
    (a.is_correct && !b.is_correct) || (a.is_correct == b.is_correct && a.similarity > b.similarity)
}

/// Acceptable answers for an item in a direction.
///
/// The full answer side comes first; for translations, alternatives
/// separated by `;` or `,` are accepted as well.
pub fn acceptable_answers(item: &LexicalItem, direction: Direction) -> Vec<String> {
    let full = direction.answer(item).trim().to_string();
    let mut answers = vec![full.clone()];
    if direction == Direction::ToTranslation {
        for alternative in full.split([';', ',']).map(str::trim) {
            if !alternative.is_empty() && !answers.iter().any(|a| a == alternative) {
                answers.push(alternative.to_string());
            }
        }
    }
    answers
}

/// What an evaluation changed on a progress record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub item_id: ItemId,
    pub previous_status: LearningStatus,
    pub new_status: LearningStatus,
    pub consecutive_correct: u32,
    pub accuracy_rate: f64,
    pub became_mastered: bool,
}

/// Feed one outcome into a progress record.
///
/// A pass extends the streak and a fail resets it. The rolling accuracy is
/// recomputed over the last `accuracy_window` outcomes. Mastery is reached by
/// streak, or by accuracy after `mastery_min_attempts` answers; it is never
/// revoked here.
pub fn apply_result(
    progress: &mut LearningProgress,
    passed: bool,
    settings: &StudySettings,
    now: DateTime<Utc>,
) -> ProgressUpdate {
    let previous_status = progress.status;

    progress.review_count += 1;
    if passed {
        progress.consecutive_correct += 1;
        progress.correct_count += 1;
    } else {
        progress.consecutive_correct = 0;
        progress.incorrect_count += 1;
    }

    progress.recent_outcomes.push(passed);
    let window = settings.accuracy_window.max(1);
    if progress.recent_outcomes.len() > window {
        let excess = progress.recent_outcomes.len() - window;
        progress.recent_outcomes.drain(..excess);
    }
    let passes = progress.recent_outcomes.iter().filter(|p| **p).count();
    progress.accuracy_rate = passes as f64 / progress.recent_outcomes.len() as f64;
    progress.last_reviewed = Some(now);

    progress.mark_started(now);

    if progress.status != LearningStatus::Mastered && is_mastered(progress, settings) {
        progress.status = LearningStatus::Mastered;
        progress.mastered_at = Some(now);
        tracing::debug!("Item {} mastered", progress.item_id);
    }

    ProgressUpdate {
        item_id: progress.item_id,
        previous_status,
        new_status: progress.status,
        consecutive_correct: progress.consecutive_correct,
        accuracy_rate: progress.accuracy_rate,
        became_mastered: previous_status != LearningStatus::Mastered
            && progress.status == LearningStatus::Mastered,
    }
}

/// Mastery predicate.
pub fn is_mastered(progress: &LearningProgress, settings: &StudySettings) -> bool {
    let enough_attempts = progress.review_count >= settings.mastery_min_attempts;
    progress.consecutive_correct >= settings.mastery_consecutive
        || (enough_attempts && progress.accuracy_rate >= settings.mastery_accuracy)
}

/// Pick multiple-choice distractors for `item` from the catalog.
///
/// Candidates share the item's difficulty tier, never fold-equal an
/// acceptable answer, and reach the configured orthographic similarity to
/// the correct answer. Returns fewer than requested when the catalog is short.
pub fn pick_distractors(
    item: &LexicalItem,
    catalog: &[LexicalItem],
    direction: Direction,
    settings: &StudySettings,
) -> Vec<String> {
    let correct = fold(direction.answer(item));
    let acceptable: Vec<String> = acceptable_answers(item, direction)
        .iter()
        .map(|a| fold(a))
        .collect();

    let mut scored: Vec<(f64, ItemId, &str)> = catalog
        .iter()
        .filter(|other| other.id != item.id && other.tier() == item.tier())
        .filter_map(|other| {
            let text = direction.answer(other).trim();
            let folded = fold(text);
            if folded.is_empty() || acceptable.contains(&folded) {
                return None;
            }
            let score = similarity(&folded, &correct);
            (score >= settings.distractor_min_similarity).then_some((score, other.id, text))
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut picked: Vec<String> = Vec::with_capacity(settings.distractor_count);
    let mut seen: Vec<String> = Vec::new();
    for (_, _, text) in scored {
        if picked.len() == settings.distractor_count {
            break;
        }
        let folded = fold(text);
        if !seen.contains(&folded) {
            seen.push(folded);
            picked.push(text.to_string());
        }
    }
    picked
}
