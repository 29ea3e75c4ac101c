use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{foods::repo_types::Food, stats::summary::DailySummary};

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub food_id: Uuid,
    pub grams: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub grams: f64,
}

#[derive(Debug, Serialize)]
pub struct EntryItemView {
    pub index: usize,
    pub food: Food,
    pub grams: f64,
}

#[derive(Debug, Serialize)]
pub struct DayView {
    pub date: String,
    pub items: Vec<EntryItemView>,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub items: Vec<DayView>,
    pub skipped_records: usize,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    #[serde(flatten)]
    pub day: DayView,
    pub summary: DailySummary,
}
