//! Quiz building and session summaries.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::evaluator::{acceptable_answers, pick_distractors};
use crate::settings::StudySettings;
use crate::types::{Direction, ItemId, LexicalItem, TestMode, TestResult};

/// One question presented to the learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestion {
    pub item_id: ItemId,
    pub prompt: String,
    pub direction: Direction,
    pub mode: TestMode,
    /// Shuffled options; empty for typing questions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip)]
    pub expected: Vec<String>,
}

/// Build a question for one item.
///
/// Multiple choice degrades to fewer options when the catalog lacks
/// distractors; with none at all the only option is the answer itself.
pub fn build_question<R: Rng + ?Sized>(
    item: &LexicalItem,
    catalog: &[LexicalItem],
    mode: TestMode,
    direction: Direction,
    settings: &StudySettings,
    rng: &mut R,
) -> QuizQuestion {
    let expected = acceptable_answers(item, direction);

    let options = match mode {
        TestMode::Typing => Vec::new(),
        TestMode::MultipleChoice => {
            let mut options = vec![direction.answer(item).trim().to_string()];
            options.extend(pick_distractors(item, catalog, direction, settings));
            options.shuffle(rng);
            options
        }
    };

    QuizQuestion {
        item_id: item.id,
        prompt: direction.prompt(item).to_string(),
        direction,
        mode,
        options,
        expected,
    }
}

/// Build questions for `items`, in order.
pub fn build_quiz<R: Rng + ?Sized>(
    items: &[LexicalItem],
    catalog: &[LexicalItem],
    mode: TestMode,
    direction: Direction,
    settings: &StudySettings,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    items
        .iter()
        .map(|item| build_question(item, catalog, mode, direction, settings, rng))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub answered: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub mean_similarity: f64,
}

impl SessionSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let answered = results.len();
        let correct = results.iter().filter(|r| r.passed).count();
        let total_similarity: f64 = results.iter().map(|r| r.similarity).sum();
        Self {
            answered,
            correct,
            accuracy: correct as f64 / answered as f64,
            mean_similarity: total_similarity / answered as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;
    use crate::types::ItemKind;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn item(id: ItemId, surface: &str, translation: &str) -> LexicalItem {
        LexicalItem {
            id,
            surface_form: surface.to_string(),
            kind: ItemKind::Word,
            translation: translation.to_string(),
            root: String::new(),
            frequency: 0,
            difficulty: 1,
        }
    }

    fn catalog() -> Vec<LexicalItem> {
        vec![
            item(1, "makan", "to eat"),
            item(2, "masak", "to cook"),
            item(3, "minum", "to drink"),
            item(4, "mandi", "to bathe"),
        ]
    }

    #[test]
    fn typing_question_has_no_options() {
        let catalog = catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let question = build_question(
            &catalog[0],
            &catalog,
            TestMode::Typing,
            Direction::ToSurface,
            &StudySettings::default(),
            &mut rng,
        );
        assert_eq!(question.prompt, "to eat");
        assert!(question.options.is_empty());
        assert_eq!(question.expected, vec!["makan"]);
    }

    #[test]
    fn multiple_choice_contains_answer_once() {
        let catalog = catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let question = build_question(
            &catalog[0],
            &catalog,
            TestMode::MultipleChoice,
            Direction::ToTranslation,
            &StudySettings::default(),
            &mut rng,
        );
        assert_eq!(question.prompt, "makan");
        assert_eq!(question.options.len(), 4);
        assert_eq!(
            question.options.iter().filter(|o| *o == "to eat").count(),
            1
        );
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let catalog = catalog();
        let settings = StudySettings::default();
        let build = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            build_quiz(
                &catalog,
                &catalog,
                TestMode::MultipleChoice,
                Direction::ToSurface,
                &settings,
                &mut rng,
            )
        };
        assert_eq!(build(11), build(11));
    }

    #[test]
    fn summary_aggregates_results() {
        let settings = StudySettings::default();
        let results = vec![
            evaluate(1, "makan", &["makan"], TestMode::Typing, &settings).unwrap(),
            evaluate(2, "xyz", &["masak"], TestMode::Typing, &settings).unwrap(),
        ];
        let summary = SessionSummary::from_results(&results);
        assert_eq!(summary.answered, 2);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.accuracy, 0.5);
        assert_eq!(summary.mean_similarity, 0.5);
        assert_eq!(SessionSummary::from_results(&[]), SessionSummary::default());
    }
}
