use serde::{Deserialize, Serialize};

use crate::goals::repo_types::GoalSet;

#[derive(Debug, Deserialize)]
pub struct PutGoalsRequest {
    pub goals: GoalSet,
    /// Defaults to today at `utc_offset_minutes` (UTC when absent).
    pub effective_date: Option<String>,
    /// Client's offset east of UTC, e.g. `-300` for UTC-05:00.
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct GoalsResponse {
    pub goals: GoalSet,
}

#[derive(Debug, Serialize)]
pub struct PutGoalsResponse {
    /// Current goals after the update.
    pub goals: GoalSet,
    pub snapshot: GoalSnapshotView,
    /// False for a backfill older than the latest snapshot.
    pub current_updated: bool,
}

#[derive(Debug, Serialize)]
pub struct GoalSnapshotView {
    pub effective_date: String,
    pub goals: GoalSet,
}

#[derive(Debug, Serialize)]
pub struct GoalHistoryResponse {
    pub items: Vec<GoalSnapshotView>,
    pub skipped_records: usize,
}
