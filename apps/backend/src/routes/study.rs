//! Study endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use bahasa_core::{
    acceptable_answers, breakdown, build_quiz, evaluate, rank, recommendations, Breakdown, ItemId,
    LearningStatus, RankQuery, RankedItem, Recommendations, SessionSummary,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::learner::Learner;
use crate::AppState;

/// GET /api/study/queue
pub async fn queue(
    State(state): State<AppState>,
    Extension(learner): Extension<Learner>,
    Query(query): Query<RankQuery>,
) -> Json<Vec<RankedItem>> {
    let items = state.store.items().await;
    let progress = state.store.progress_for(learner.id).await;

    Json(rank(&items, &progress, &query))
}

/// GET /api/study/recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Extension(learner): Extension<Learner>,
) -> Json<Recommendations> {
    let items = state.store.items().await;
    let progress = state.store.progress_for(learner.id).await;
    let settings = state.store.settings().await;

    Json(recommendations(&items, &progress, settings.daily_goal))
}

/// GET /api/study/quiz
pub async fn quiz(
    State(state): State<AppState>,
    Extension(learner): Extension<Learner>,
    Query(query): Query<QuizQuery>,
) -> Json<QuizResponse> {
    let items = state.store.items().await;
    let progress = state.store.progress_for(learner.id).await;
    let settings = state.store.settings().await;

    let count = query.count.unwrap_or(DEFAULT_QUIZ_SIZE);
    let picked: Vec<_> = rank(&items, &progress, &RankQuery::default())
        .into_iter()
        .filter(|r| r.status != LearningStatus::Mastered)
        .take(count)
        .map(|r| r.item)
        .collect();

    let questions = build_quiz(
        &picked,
        &items,
        query.mode.unwrap_or_default(),
        query.direction.unwrap_or_default(),
        &settings,
        &mut rand::thread_rng(),
    );

    Json(QuizResponse { questions })
}

/// POST /api/study/answer
pub async fn answer(
    State(state): State<AppState>,
    Extension(learner): Extension<Learner>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let item = state.store.get_item(payload.item_id).await?;
    let settings = state.store.settings().await;

    let expected = acceptable_answers(&item, payload.direction);
    let result = evaluate(
        item.id,
        &payload.submitted,
        &expected,
        payload.mode,
        &settings,
    )?;

    let (progress, update) = state
        .store
        .record_answer(learner.id, result.clone(), &settings)
        .await?;

    if update.became_mastered {
        tracing::info!("Learner {} mastered item {}", learner.id, item.id);
    }

    Ok(Json(AnswerResponse {
        result,
        progress,
        update,
    }))
}

/// POST /api/study/start/:item_id
pub async fn start(
    State(state): State<AppState>,
    Extension(learner): Extension<Learner>,
    Path(item_id): Path<ItemId>,
) -> Result<Json<StatusChangeResponse>> {
    let (progress, changed) = state.store.mark_started(learner.id, item_id).await?;
    Ok(Json(StatusChangeResponse { changed, progress }))
}

/// POST /api/study/demote/:item_id
pub async fn demote(
    State(state): State<AppState>,
    Extension(learner): Extension<Learner>,
    Path(item_id): Path<ItemId>,
) -> Result<Json<StatusChangeResponse>> {
    let (progress, changed) = state.store.demote(learner.id, item_id).await?;
    Ok(Json(StatusChangeResponse { changed, progress }))
}

/// GET /api/study/breakdown
pub async fn status_breakdown(
    State(state): State<AppState>,
    Extension(learner): Extension<Learner>,
) -> Json<Breakdown> {
    let items = state.store.items().await;
    let progress = state.store.progress_for(learner.id).await;

    Json(breakdown(&items, &progress))
}

/// GET /api/study/results
pub async fn results(
    State(state): State<AppState>,
    Extension(learner): Extension<Learner>,
) -> Json<ResultsResponse> {
    let results = state.store.results_for(learner.id).await;
    let summary = SessionSummary::from_results(&results);

    Json(ResultsResponse { results, summary })
}
