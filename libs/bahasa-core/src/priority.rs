//! Learning-priority scoring and ranked study queues.
//!
//! Scores are derived at read time and never stored. Frequency and difficulty
//! are min/max normalized against the catalog passed to [`PriorityScorer::new`].

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, ItemKind, LearningProgress, LearningStatus, LexicalItem};

const FREQUENCY_WEIGHT: f64 = 0.4;
const DIFFICULTY_WEIGHT: f64 = 0.2;
const STATUS_WEIGHT: f64 = 0.3;
const ACCURACY_WEIGHT: f64 = 0.1;

/// Accuracy below which a learning item counts as struggling.
pub const STRUGGLING_ACCURACY: f64 = 0.6;
/// Maximum number of struggling items recommended per day.
pub const MAX_STRUGGLING: usize = 5;

pub fn status_weight(status: LearningStatus) -> f64 {
    match status {
        LearningStatus::NotStarted => 1.0,
        LearningStatus::Learning => 0.7,
        LearningStatus::Mastered => 0.1,
    }
}

/// Normalization bounds captured from one catalog snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityScorer {
    frequency: (f64, f64),
    difficulty: (f64, f64),
}

impl PriorityScorer {
    pub fn new(items: &[LexicalItem]) -> Self {
        Self {
            frequency: bounds(items.iter().map(|i| i.frequency as f64)),
            difficulty: bounds(items.iter().map(|i| i.difficulty as f64)),
        }
    }

    /// Priority of an item; missing progress counts as never started.
    pub fn score(&self, item: &LexicalItem, progress: Option<&LearningProgress>) -> f64 {
        let (status, accuracy) = progress
            .map(|p| (p.status, p.accuracy_rate.clamp(0.0, 1.0)))
            .unwrap_or((LearningStatus::NotStarted, 0.0));

        normalize(item.frequency as f64, self.frequency) * FREQUENCY_WEIGHT
            + normalize(item.difficulty as f64, self.difficulty) * DIFFICULTY_WEIGHT
            + status_weight(status) * STATUS_WEIGHT
            + (1.0 - accuracy) * ACCURACY_WEIGHT
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// A degenerate range (one item, or all equal) normalizes to 1.0.
fn normalize(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Filters for a ranked queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankQuery {
    #[serde(default)]
    pub kind: Option<ItemKind>,
    #[serde(default)]
    pub status: Option<LearningStatus>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// An item annotated with its status and priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub item: LexicalItem,
    pub status: LearningStatus,
    pub priority: f64,
    pub accuracy_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

/// Rank the catalog by priority, highest first.
///
/// Ties fall back to `last_reviewed` (never reviewed first), then item id,
/// so repeated calls over unchanged inputs give identical sequences.
pub fn rank(
    items: &[LexicalItem],
    progress: &HashMap<ItemId, LearningProgress>,
    query: &RankQuery,
) -> Vec<RankedItem> {
    let scorer = PriorityScorer::new(items);

    let mut ranked: Vec<RankedItem> = items
        .iter()
        .filter(|item| query.kind.map_or(true, |kind| item.kind == kind))
        .map(|item| {
            let record = progress.get(&item.id);
            RankedItem {
                item: item.clone(),
                status: record.map(|p| p.status).unwrap_or_default(),
                priority: scorer.score(item, record),
                accuracy_rate: record.map(|p| p.accuracy_rate).unwrap_or(0.0),
                last_reviewed: record.and_then(|p| p.last_reviewed),
            }
        })
        .filter(|ranked| query.status.map_or(true, |status| ranked.status == status))
        .collect();

    ranked.sort_by(compare_ranked);
    if let Some(limit) = query.limit {
        ranked.truncate(limit);
    }

    tracing::debug!("Ranked {} of {} items", ranked.len(), items.len());
    ranked
}

fn compare_ranked(a: &RankedItem, b: &RankedItem) -> Ordering {
    b.priority
        .total_cmp(&a.priority)
        .then_with(|| match (a.last_reviewed, b.last_reviewed) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.cmp(&y),
        })
        .then(a.item.id.cmp(&b.item.id))
}

/// Daily study plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub review: Vec<RankedItem>,
    pub struggling: Vec<RankedItem>,
    pub new_items: Vec<RankedItem>,
}

/// Build a daily plan of at most `daily_goal` review and new items.
///
/// Review takes learning items up to half the goal, new items fill the rest.
/// Struggling items (learning, accuracy below 0.6) are listed separately,
/// worst first.
pub fn recommendations(
    items: &[LexicalItem],
    progress: &HashMap<ItemId, LearningProgress>,
    daily_goal: usize,
) -> Recommendations {
    let ranked = rank(items, progress, &RankQuery::default());

    let review: Vec<RankedItem> = ranked
        .iter()
        .filter(|r| r.status == LearningStatus::Learning)
        .take(daily_goal / 2)
        .cloned()
        .collect();

    let mut struggling: Vec<RankedItem> = ranked
        .iter()
        .filter(|r| r.status == LearningStatus::Learning && r.accuracy_rate < STRUGGLING_ACCURACY)
        .cloned()
        .collect();
    struggling.sort_by(|a, b| {
        a.accuracy_rate
            .total_cmp(&b.accuracy_rate)
            .then(a.item.id.cmp(&b.item.id))
    });
    struggling.truncate(MAX_STRUGGLING);

    let new_items = ranked
        .into_iter()
        .filter(|r| r.status == LearningStatus::NotStarted)
        .take(daily_goal.saturating_sub(review.len()))
        .collect();

    Recommendations {
        review,
        struggling,
        new_items,
    }
}

/// Status counts for a group of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub not_started: usize,
    pub learning: usize,
    pub mastered: usize,
    pub mastery_rate: f64,
}

impl StatusCounts {
    fn add(&mut self, status: LearningStatus) {
        self.total += 1;
        match status {
            LearningStatus::NotStarted => self.not_started += 1,
            LearningStatus::Learning => self.learning += 1,
            LearningStatus::Mastered => self.mastered += 1,
        }
        self.mastery_rate = self.mastered as f64 / self.total as f64;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub overall: StatusCounts,
    pub words: StatusCounts,
    pub phrases: StatusCounts,
}

/// Per-kind status breakdown.
pub fn breakdown(items: &[LexicalItem], progress: &HashMap<ItemId, LearningProgress>) -> Breakdown {
    let mut result = Breakdown::default();
    for item in items {
        let status = progress.get(&item.id).map(|p| p.status).unwrap_or_default();
        result.overall.add(status);
        match item.kind {
            ItemKind::Word => result.words.add(status),
            ItemKind::Phrase => result.phrases.add(status),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn item(id: ItemId, surface: &str, frequency: u32, difficulty: u8) -> LexicalItem {
        LexicalItem {
            id,
            surface_form: surface.to_string(),
            kind: ItemKind::infer(surface),
            translation: format!("t{}", id),
            root: String::new(),
            frequency,
            difficulty,
        }
    }

    fn progress(item_id: ItemId, status: LearningStatus, accuracy: f64) -> LearningProgress {
        LearningProgress {
            status,
            accuracy_rate: accuracy,
            ..LearningProgress::new(Uuid::nil(), item_id)
        }
    }

    #[test]
    fn not_started_outranks_mastered() {
        let items = vec![item(1, "makan", 100, 5), item(2, "minum", 10, 1)];
        let scorer = PriorityScorer::new(&items);

        let fresh = scorer.score(&items[0], None);
        let mastered = scorer.score(
            &items[0],
            Some(&progress(1, LearningStatus::Mastered, 0.0)),
        );
        assert!(fresh > mastered);
        assert!((fresh - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_range_normalizes_to_one() {
        let items = vec![item(1, "makan", 7, 3)];
        let scorer = PriorityScorer::new(&items);
        assert!((scorer.score(&items[0], None) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_accuracy_is_clamped() {
        let items = vec![item(1, "makan", 7, 3)];
        let scorer = PriorityScorer::new(&items);
        let wild = scorer.score(&items[0], Some(&progress(1, LearningStatus::Learning, 3.0)));
        let perfect = scorer.score(&items[0], Some(&progress(1, LearningStatus::Learning, 1.0)));
        assert_eq!(wild, perfect);
    }

    #[test]
    fn ties_prefer_never_reviewed_then_oldest() {
        let items = vec![item(1, "a1", 5, 2), item(2, "a2", 5, 2), item(3, "a3", 5, 2)];
        let now = Utc::now();
        let mut map = HashMap::new();
        let mut recent = progress(1, LearningStatus::NotStarted, 0.0);
        recent.last_reviewed = Some(now);
        let mut older = progress(2, LearningStatus::NotStarted, 0.0);
        older.last_reviewed = Some(now - chrono::Duration::hours(1));
        map.insert(1, recent);
        map.insert(2, older);

        let ids: Vec<ItemId> = rank(&items, &map, &RankQuery::default())
            .iter()
            .map(|r| r.item.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn query_filters_and_limits() {
        let items = vec![
            item(1, "makan", 50, 1),
            item(2, "selamat pagi", 40, 2),
            item(3, "minum", 30, 3),
        ];
        let mut map = HashMap::new();
        map.insert(3, progress(3, LearningStatus::Learning, 0.5));

        let words = rank(
            &items,
            &map,
            &RankQuery {
                kind: Some(ItemKind::Word),
                ..Default::default()
            },
        );
        assert_eq!(words.len(), 2);

        let learning = rank(
            &items,
            &map,
            &RankQuery {
                status: Some(LearningStatus::Learning),
                ..Default::default()
            },
        );
        assert_eq!(learning.len(), 1);
        assert_eq!(learning[0].item.id, 3);

        let limited = rank(
            &items,
            &map,
            &RankQuery {
                limit: Some(1),
                ..Default::default()
            },
        );
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn recommendations_split_goal() {
        let items: Vec<LexicalItem> = (1..=10).map(|id| item(id, &format!("w{}", id), id as u32, 2)).collect();
        let mut map = HashMap::new();
        for id in 1..=4 {
            map.insert(id, progress(id, LearningStatus::Learning, 0.1 * id as f64));
        }
        map.insert(5, progress(5, LearningStatus::Mastered, 1.0));

        let plan = recommendations(&items, &map, 6);
        assert_eq!(plan.review.len(), 3);
        assert_eq!(plan.new_items.len(), 3);
        assert!(plan
            .new_items
            .iter()
            .all(|r| r.status == LearningStatus::NotStarted));

        let struggling: Vec<ItemId> = plan.struggling.iter().map(|r| r.item.id).collect();
        assert_eq!(struggling, vec![1, 2, 3, 4]);
    }

    #[test]
    fn breakdown_counts_by_kind() {
        let items = vec![
            item(1, "makan", 1, 1),
            item(2, "minum", 1, 1),
            item(3, "selamat pagi", 1, 1),
        ];
        let mut map = HashMap::new();
        map.insert(1, progress(1, LearningStatus::Mastered, 1.0));
        map.insert(3, progress(3, LearningStatus::Learning, 0.5));

        let result = breakdown(&items, &map);
        assert_eq!(result.overall.total, 3);
        assert_eq!(result.words.mastered, 1);
        assert_eq!(result.words.not_started, 1);
        assert_eq!(result.words.mastery_rate, 0.5);
        assert_eq!(result.phrases.learning, 1);
    }

    proptest! {
        #[test]
        fn ranking_is_deterministic(freqs in proptest::collection::vec(0u32..50, 1..20)) {
            let items: Vec<LexicalItem> = freqs
                .iter()
                .enumerate()
                .map(|(i, f)| item(i as ItemId, "kata", *f, (i % 5 + 1) as u8))
                .collect();
            let map = HashMap::new();
            let first = rank(&items, &map, &RankQuery::default());
            let second = rank(&items, &map, &RankQuery::default());
            prop_assert_eq!(first, second);
        }
    }
}
