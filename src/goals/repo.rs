use tracing::{info, warn};

use crate::{
    error::AppError,
    goals::repo_types::{GoalSet, GoalSnapshot, GoalSnapshotRecord},
    records::{append_record, load_records, Decoded},
    storage::{KvStore, GOALS_KEY, GOAL_HISTORY_KEY},
};

/// Snapshots in the order they were recorded.
pub async fn load_goal_history(store: &dyn KvStore) -> Result<Decoded<GoalSnapshot>, AppError> {
    load_records(store, GOAL_HISTORY_KEY, GoalSnapshotRecord::into_snapshot).await
}

/// Appends to the history. Stored snapshots, including ones that do not
/// decode, are left exactly as they are.
pub async fn record_goal_change(
    store: &dyn KvStore,
    snapshot: &GoalSnapshot,
) -> Result<(), AppError> {
    let record = GoalSnapshotRecord::from(snapshot);
    let snapshots = append_record(store, GOAL_HISTORY_KEY, &record).await?;
    info!(snapshots, effective_date = %record.effective_date, "goal change recorded");
    Ok(())
}

/// The goals configured right now, or `defaults` when none were saved or
/// the saved blob is unreadable.
pub async fn load_current_goals(
    store: &dyn KvStore,
    defaults: GoalSet,
) -> Result<GoalSet, AppError> {
    let Some(raw) = store.get(GOALS_KEY).await? else {
        return Ok(defaults);
    };
    match serde_json::from_str::<GoalSet>(&raw) {
        Ok(goals) if goals.validate().is_ok() => Ok(goals),
        Ok(_) => {
            warn!("stored goals out of range; using defaults");
            Ok(defaults)
        }
        Err(e) => {
            warn!(error = %e, "stored goals malformed; using defaults");
            Ok(defaults)
        }
    }
}

pub async fn save_current_goals(store: &dyn KvStore, goals: &GoalSet) -> Result<(), AppError> {
    store.put(GOALS_KEY, serde_json::to_string(goals)?).await?;
    Ok(())
}
