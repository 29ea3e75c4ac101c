use tracing::{debug, warn};

use crate::{
    entries::repo_types::{DailyEntry, EntryRecord},
    error::AppError,
    records::{load_records, save_records, Decoded},
    storage::{KvStore, ENTRIES_KEY},
};

/// All entries sorted by date, one per date. Records with unparseable
/// dates or malformed items are skipped and counted; records that share a
/// date after time-of-day normalization are merged in stored order.
pub async fn load_entries(store: &dyn KvStore) -> Result<Decoded<DailyEntry>, AppError> {
    let decoded = load_records(store, ENTRIES_KEY, EntryRecord::into_entry).await?;
    let mut merged: Vec<DailyEntry> = Vec::with_capacity(decoded.records.len());
    let mut records = decoded.records;
    // stable, so merged items keep their stored order
    records.sort_by_key(|e| e.date);
    for entry in records {
        match merged.last_mut() {
            Some(last) if last.date == entry.date => {
                warn!(date = %entry.date, "duplicate entry for date; merging items");
                last.items.extend(entry.items);
            }
            _ => merged.push(entry),
        }
    }
    merged.retain(|e| !e.items.is_empty());
    debug!(entries = merged.len(), skipped = decoded.rejected.len(), "entries loaded");
    Ok(Decoded {
        records: merged,
        rejected: decoded.rejected,
    })
}

/// Saves `entries.records`; the elements rejected at load are written back
/// unchanged.
pub async fn save_entries(store: &dyn KvStore, entries: &Decoded<DailyEntry>) -> Result<(), AppError> {
    let records: Vec<EntryRecord> = entries
        .records
        .iter()
        .filter(|e| !e.items.is_empty())
        .map(EntryRecord::from)
        .collect();
    save_records(store, ENTRIES_KEY, &records, &entries.rejected).await
}
