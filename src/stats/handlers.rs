use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use time::Date;
use tracing::{debug, instrument};

use crate::{
    dates::parse_day,
    entries::{repo::load_entries, repo_types::DailyEntry},
    error::AppError,
    goals::{
        repo::{load_current_goals, load_goal_history},
        repo_types::{GoalSet, GoalSnapshot},
    },
    nutrients::MacroKey,
    stats::{
        dto::{MacroChart, MacroStatsResponse, RangeQuery, StatsResponse},
        reconcile::{date_range, reconcile, reconcile_all},
    },
    state::AppState,
};

pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/stats/:macro_key", get(get_macro_stats))
}

struct History {
    entries: Vec<DailyEntry>,
    goal_history: Vec<GoalSnapshot>,
    current_goals: GoalSet,
    skipped_records: usize,
}

async fn load_history(state: &AppState) -> Result<History, AppError> {
    let store = state.store.as_ref();
    let entries = load_entries(store).await?;
    let goal_history = load_goal_history(store).await?;
    let current_goals = load_current_goals(store, state.config.default_goals).await?;
    let skipped_records = entries.skipped() + goal_history.skipped();
    Ok(History {
        entries: entries.records,
        goal_history: goal_history.records,
        current_goals,
        skipped_records,
    })
}

fn parse_bound(raw: Option<&str>, name: &str) -> Result<Option<Date>, AppError> {
    raw.map(|s| {
        parse_day(s).ok_or_else(|| AppError::Validation(format!("{name} must be a YYYY-MM-DD date")))
    })
    .transpose()
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let from = parse_bound(range.from.as_deref(), "from")?;
    let to = parse_bound(range.to.as_deref(), "to")?;
    let history = load_history(&state).await?;
    let entries = date_range(&history.entries, from, to);

    let stats = reconcile_all(entries, &history.goal_history, &history.current_goals);
    let skipped_items = MacroKey::ALL
        .iter()
        .map(|k| stats.get(*k).skipped_items)
        .max()
        .unwrap_or(0);
    debug!(days = entries.len(), skipped_items, "stats computed");

    Ok(Json(StatsResponse {
        days: entries.len(),
        skipped_records: history.skipped_records,
        skipped_items,
        calories: MacroChart::from(&stats.calories),
        protein: MacroChart::from(&stats.protein),
        carbs: MacroChart::from(&stats.carbs),
        fat: MacroChart::from(&stats.fat),
    }))
}

#[instrument(skip(state))]
pub async fn get_macro_stats(
    State(state): State<AppState>,
    Path(macro_key): Path<String>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<MacroStatsResponse>, AppError> {
    let key: MacroKey = macro_key.parse().map_err(AppError::Validation)?;
    let from = parse_bound(range.from.as_deref(), "from")?;
    let to = parse_bound(range.to.as_deref(), "to")?;
    let history = load_history(&state).await?;

    let series = reconcile(
        date_range(&history.entries, from, to),
        &history.goal_history,
        &history.current_goals,
        key,
    );
    Ok(Json(MacroStatsResponse {
        macro_key: key,
        intake: series.intake_series(),
        goal: series.goal_series(),
        skipped_items: series.skipped_items,
        points: series.points,
        skipped_records: history.skipped_records,
    }))
}
