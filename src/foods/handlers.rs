use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    error::AppError,
    foods::{
        dto::{FoodListItem, FoodListResponse, FoodRequest, ListQuery, SearchQuery, SearchResponse},
        repo::{delete_food, insert_food, load_foods, replace_food},
        repo_types::Food,
        search::search_by_tag,
        tags::TagRegistry,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods))
        .route("/foods/search", get(search_foods))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", post(create_food))
        .route("/foods/:id", put(update_food).delete(remove_food))
}

fn with_icon(food: Food, tags: &TagRegistry, locale: &str) -> FoodListItem {
    let resolved_icon = food
        .icon
        .clone()
        .or_else(|| tags.resolve_icon_tag(&food.name, locale).map(str::to_string));
    FoodListItem {
        food,
        resolved_icon,
    }
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    Query(p): Query<ListQuery>,
) -> Result<Json<FoodListResponse>, AppError> {
    let decoded = load_foods(state.store.as_ref()).await?;
    let locale = state.tags.index(p.locale.as_deref()).locale();
    let total = decoded.records.len();
    let skipped_records = decoded.skipped();
    let items = decoded
        .records
        .into_iter()
        .skip(p.offset)
        .take(p.limit)
        .map(|f| with_icon(f, &state.tags, locale))
        .collect();
    Ok(Json(FoodListResponse {
        items,
        total,
        skipped_records,
    }))
}

#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let foods = load_foods(state.store.as_ref()).await?.records;
    let index = state.tags.index(q.locale.as_deref());
    let found = search_by_tag(&q.q, &foods, index);
    debug!(query = %q.q, locale = index.locale(), hits = found.len(), "food search");
    Ok(Json(SearchResponse {
        query: q.q,
        locale: index.locale().to_string(),
        items: found
            .into_iter()
            .map(|f| with_icon(f, &state.tags, index.locale()))
            .collect(),
    }))
}

#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    Json(body): Json<FoodRequest>,
) -> Result<(StatusCode, HeaderMap, Json<Food>), AppError> {
    let _guard = state.write_lock.lock().await;
    let food = insert_food(state.store.as_ref(), body.into_food(Uuid::new_v4())).await?;

    let mut headers = HeaderMap::new();
    let location = HeaderValue::from_str(&format!("/api/v1/foods/{}", food.id))
        .map_err(|e| AppError::Storage(e.into()))?;
    headers.insert(header::LOCATION, location);
    Ok((StatusCode::CREATED, headers, Json(food)))
}

#[instrument(skip(state, body))]
pub async fn update_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<FoodRequest>,
) -> Result<Json<Food>, AppError> {
    let _guard = state.write_lock.lock().await;
    let food = replace_food(state.store.as_ref(), body.into_food(id)).await?;
    Ok(Json(food))
}

#[instrument(skip(state))]
pub async fn remove_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let _guard = state.write_lock.lock().await;
    delete_food(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
