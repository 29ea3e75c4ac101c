use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use time::Date;
use tracing::{info, instrument};

use crate::{
    dates::{format_day, parse_day},
    entries::{
        dto::{AddItemRequest, DayResponse, DayView, EntriesResponse, EntryItemView, UpdateItemRequest},
        repo::{load_entries, save_entries},
        repo_types::{DailyEntry, EntryItem},
        services::{add_item, remove_item, update_item_grams},
    },
    error::AppError,
    foods::repo::find_food,
    goals::repo::{load_current_goals, load_goal_history},
    state::AppState,
    stats::{reconcile::GoalTimeline, summary::daily_summary},
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries))
        .route("/entries/:date", get(get_day))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/entries/:date/items", post(create_item))
        .route("/entries/:date/items/:index", put(edit_item).delete(delete_item))
}

fn parse_path_date(raw: &str) -> Result<Date, AppError> {
    parse_day(raw).ok_or_else(|| AppError::Validation(format!("invalid date '{raw}'")))
}

fn day_view(entry: &DailyEntry) -> DayView {
    DayView {
        date: format_day(entry.date),
        items: entry
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| EntryItemView {
                index,
                food: item.food.clone(),
                grams: item.grams,
            })
            .collect(),
    }
}

/// The day (empty if nothing was logged) with totals against the goals in
/// effect on that date.
async fn day_response(
    state: &AppState,
    entries: &[DailyEntry],
    date: Date,
) -> Result<DayResponse, AppError> {
    let entry = entries
        .iter()
        .find(|e| e.date == date)
        .cloned()
        .unwrap_or(DailyEntry {
            date,
            items: Vec::new(),
        });
    let store = state.store.as_ref();
    let history = load_goal_history(store).await?.records;
    let current = load_current_goals(store, state.config.default_goals).await?;
    let goals = GoalTimeline::new(&history).goals_or(date, &current);
    Ok(DayResponse {
        summary: daily_summary(&entry, goals),
        day: day_view(&entry),
    })
}

#[instrument(skip(state))]
pub async fn list_entries(State(state): State<AppState>) -> Result<Json<EntriesResponse>, AppError> {
    let decoded = load_entries(state.store.as_ref()).await?;
    Ok(Json(EntriesResponse {
        items: decoded.records.iter().map(day_view).collect(),
        skipped_records: decoded.skipped(),
    }))
}

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, AppError> {
    let date = parse_path_date(&date)?;
    let entries = load_entries(state.store.as_ref()).await?.records;
    Ok(Json(day_response(&state, &entries, date).await?))
}

#[instrument(skip(state, body))]
pub async fn create_item(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<DayResponse>), AppError> {
    let date = parse_path_date(&date)?;
    let _guard = state.write_lock.lock().await;
    let store = state.store.as_ref();

    let food = find_food(store, body.food_id).await?;
    let mut entries = load_entries(store).await?;
    add_item(
        &mut entries.records,
        date,
        EntryItem {
            food,
            grams: body.grams,
        },
    )?;
    save_entries(store, &entries).await?;
    info!(%date, food_id = %body.food_id, grams = body.grams, "item logged");

    Ok((
        StatusCode::CREATED,
        Json(day_response(&state, &entries.records, date).await?),
    ))
}

#[instrument(skip(state, body))]
pub async fn edit_item(
    State(state): State<AppState>,
    Path((date, index)): Path<(String, usize)>,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let date = parse_path_date(&date)?;
    let _guard = state.write_lock.lock().await;
    let store = state.store.as_ref();

    let mut entries = load_entries(store).await?;
    update_item_grams(&mut entries.records, date, index, body.grams)?;
    save_entries(store, &entries).await?;
    Ok(Json(day_response(&state, &entries.records, date).await?))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    Path((date, index)): Path<(String, usize)>,
) -> Result<StatusCode, AppError> {
    let date = parse_path_date(&date)?;
    let _guard = state.write_lock.lock().await;
    let store = state.store.as_ref();

    let mut entries = load_entries(store).await?;
    let removed = remove_item(&mut entries.records, date, index)?;
    save_entries(store, &entries).await?;
    info!(%date, food = %removed.food.name, "item removed");
    Ok(StatusCode::NO_CONTENT)
}
