use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::{
    dates::{format_day, parse_day, today},
    error::AppError,
    goals::{
        dto::{
            GoalHistoryResponse, GoalSnapshotView, GoalsResponse, PutGoalsRequest,
            PutGoalsResponse,
        },
        repo::{load_current_goals, load_goal_history, record_goal_change, save_current_goals},
        repo_types::GoalSnapshot,
    },
    state::AppState,
};

pub fn goals_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(get_goals).put(put_goals))
        .route("/goals/history", get(get_goal_history))
}

#[instrument(skip(state))]
pub async fn get_goals(State(state): State<AppState>) -> Result<Json<GoalsResponse>, AppError> {
    let goals = load_current_goals(state.store.as_ref(), state.config.default_goals).await?;
    Ok(Json(GoalsResponse { goals }))
}

/// Appends a snapshot so past days keep being charted against what applied
/// back then. The current goals follow only when the snapshot is the latest
/// one; an older `effective_date` is a backfill.
#[instrument(skip(state, body))]
pub async fn put_goals(
    State(state): State<AppState>,
    Json(body): Json<PutGoalsRequest>,
) -> Result<Json<PutGoalsResponse>, AppError> {
    body.goals.validate().map_err(AppError::Validation)?;
    let effective_date = match body.effective_date.as_deref() {
        Some(raw) => parse_day(raw).ok_or_else(|| {
            AppError::Validation("effective_date must be a YYYY-MM-DD date".into())
        })?,
        None => today(body.utc_offset_minutes).ok_or_else(|| {
            AppError::Validation("utc_offset_minutes is out of range".into())
        })?,
    };

    let _guard = state.write_lock.lock().await;
    let store = state.store.as_ref();
    let latest = load_goal_history(store)
        .await?
        .records
        .iter()
        .map(|s| s.effective_date)
        .max();
    let is_current = latest.map_or(true, |latest| effective_date >= latest);

    let snapshot = GoalSnapshot {
        effective_date,
        goals: body.goals,
    };
    // history first, so a failed append leaves the current goals untouched
    record_goal_change(store, &snapshot).await?;
    let current = if is_current {
        save_current_goals(store, &body.goals).await?;
        info!(%effective_date, calories = body.goals.calories, "goals updated");
        body.goals
    } else {
        info!(%effective_date, ?latest, "past goals backfilled");
        load_current_goals(store, state.config.default_goals).await?
    };

    Ok(Json(PutGoalsResponse {
        goals: current,
        snapshot: GoalSnapshotView {
            effective_date: format_day(effective_date),
            goals: snapshot.goals,
        },
        current_updated: is_current,
    }))
}

#[instrument(skip(state))]
pub async fn get_goal_history(
    State(state): State<AppState>,
) -> Result<Json<GoalHistoryResponse>, AppError> {
    let decoded = load_goal_history(state.store.as_ref()).await?;
    let items = decoded
        .records
        .iter()
        .map(|s| GoalSnapshotView {
            effective_date: format_day(s.effective_date),
            goals: s.goals,
        })
        .collect();
    Ok(Json(GoalHistoryResponse {
        items,
        skipped_records: decoded.skipped(),
    }))
}
