//! In-memory storage for catalog, progress and results.
//!
//! Every progress mutation happens under the progress write lock, which
//! serializes writes per record.

use std::collections::HashMap;

use bahasa_core::{
    apply_result, Catalog, CoreError, ItemId, LearnerId, LearningProgress, LexicalItem,
    MorphologyContext, ProgressUpdate, SettingsOverride, StudySettings, TestResult, TextAnalysis,
    VocabEntry,
};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::Result;

type ProgressMap = HashMap<ItemId, LearningProgress>;

pub struct Store {
    catalog: RwLock<Catalog>,
    progress: RwLock<HashMap<LearnerId, ProgressMap>>,
    results: RwLock<HashMap<LearnerId, Vec<TestResult>>>,
    settings: RwLock<StudySettings>,
}

impl Store {
    pub fn new(settings: StudySettings) -> Self {
        Self {
            catalog: RwLock::new(Catalog::new()),
            progress: RwLock::new(HashMap::new()),
            results: RwLock::new(HashMap::new()),
            settings: RwLock::new(settings),
        }
    }

    // ==================== Catalog ====================

    pub async fn import(
        &self,
        ctx: &MorphologyContext,
        entries: Vec<VocabEntry>,
        corpus: Option<&TextAnalysis>,
    ) -> Result<(Vec<LexicalItem>, usize)> {
        let mut catalog = self.catalog.write().await;
        let added = catalog.import(ctx, entries, corpus)?;
        Ok((added, catalog.len()))
    }

    pub async fn items(&self) -> Vec<LexicalItem> {
        self.catalog.read().await.items().to_vec()
    }

    pub async fn get_item(&self, id: ItemId) -> Result<LexicalItem> {
        Ok(self.catalog.read().await.require(id)?.clone())
    }

    // ==================== Progress ====================

    pub async fn progress_for(&self, learner: LearnerId) -> ProgressMap {
        self.progress
            .read()
            .await
            .get(&learner)
            .cloned()
            .unwrap_or_default()
    }

    /// Apply an evaluated answer to the learner's progress and log the result.
    pub async fn record_answer(
        &self,
        learner: LearnerId,
        result: TestResult,
        settings: &StudySettings,
    ) -> Result<(LearningProgress, ProgressUpdate)> {
        let (progress, update) = {
            let mut all = self.progress.write().await;
            let record = all
                .entry(learner)
                .or_default()
                .entry(result.item_id)
                .or_insert_with(|| LearningProgress::new(learner, result.item_id));
            let update = apply_result(record, result.passed, settings, result.timestamp);
            (record.clone(), update)
        };

        self.results
            .write()
            .await
            .entry(learner)
            .or_default()
            .push(result);

        Ok((progress, update))
    }

    /// Scheduler transition NotStarted -> Learning.
    pub async fn mark_started(
        &self,
        learner: LearnerId,
        item_id: ItemId,
    ) -> Result<(LearningProgress, bool)> {
        self.ensure_item(item_id).await?;
        let mut all = self.progress.write().await;
        let record = all
            .entry(learner)
            .or_default()
            .entry(item_id)
            .or_insert_with(|| LearningProgress::new(learner, item_id));
        let changed = record.mark_started(Utc::now());
        Ok((record.clone(), changed))
    }

    /// Explicit demotion Mastered -> Learning.
    pub async fn demote(
        &self,
        learner: LearnerId,
        item_id: ItemId,
    ) -> Result<(LearningProgress, bool)> {
        self.ensure_item(item_id).await?;
        let mut all = self.progress.write().await;
        let record = all
            .entry(learner)
            .or_default()
            .entry(item_id)
            .or_insert_with(|| LearningProgress::new(learner, item_id));
        let changed = record.demote();
        if changed {
            tracing::info!("Item {} demoted for learner {}", item_id, learner);
        }
        Ok((record.clone(), changed))
    }

    pub async fn results_for(&self, learner: LearnerId) -> Vec<TestResult> {
        self.results
            .read()
            .await
            .get(&learner)
            .cloned()
            .unwrap_or_default()
    }

    async fn ensure_item(&self, item_id: ItemId) -> Result<()> {
        if self.catalog.read().await.get(item_id).is_none() {
            return Err(CoreError::UnknownItem(item_id).into());
        }
        Ok(())
    }

    // ==================== Settings ====================

    pub async fn settings(&self) -> StudySettings {
        self.settings.read().await.clone()
    }

    /// Merge and validate; the stored settings are untouched on error.
    pub async fn update_settings(&self, overrides: &SettingsOverride) -> Result<StudySettings> {
        let mut current = self.settings.write().await;
        let merged = current.merge(Some(overrides));
        merged.validate()?;
        *current = merged.clone();
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bahasa_core::{evaluate, parse, LearningStatus, TestMode};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    async fn seeded() -> (Store, MorphologyContext) {
        let ctx = MorphologyContext::indonesian();
        let store = Store::new(StudySettings::default());
        store
            .import(&ctx, parse("makan | to eat\nminum | to drink").unwrap(), None)
            .await
            .unwrap();
        (store, ctx)
    }

    #[tokio::test]
    async fn progress_is_kept_per_learner() {
        let (store, _) = seeded().await;
        let settings = store.settings().await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let result = evaluate(1, "makan", &["makan"], TestMode::Typing, &settings).unwrap();
        let (progress, update) = store.record_answer(alice, result, &settings).await.unwrap();

        assert_eq!(progress.consecutive_correct, 1);
        assert_eq!(update.new_status, LearningStatus::Learning);
        assert_eq!(store.progress_for(alice).await.len(), 1);
        assert!(store.progress_for(bob).await.is_empty());
        assert_eq!(store.results_for(alice).await.len(), 1);
    }

    #[tokio::test]
    async fn status_changes_require_known_items() {
        let (store, _) = seeded().await;
        let learner = Uuid::new_v4();

        let (progress, changed) = store.mark_started(learner, 2).await.unwrap();
        assert!(changed);
        assert_eq!(progress.status, LearningStatus::Learning);

        let (_, changed) = store.demote(learner, 2).await.unwrap();
        assert!(!changed);

        assert!(store.mark_started(learner, 99).await.is_err());
    }

    #[test]
    fn invalid_settings_are_not_stored() {
        let store = Store::new(StudySettings::default());
        let bad = SettingsOverride {
            pass_threshold: Some(3.0),
            ..Default::default()
        };
        tokio_test::block_on(async {
            assert!(store.update_settings(&bad).await.is_err());
            assert_eq!(store.settings().await, StudySettings::default());
        });
    }
}
