//! Loading and saving JSON-array blobs record by record.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{error::AppError, storage::KvStore};

/// Records decoded from one blob, plus the raw elements that were rejected.
/// Rejected elements are written back untouched on save.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub rejected: Vec<Value>,
}

impl<T> Decoded<T> {
    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

async fn load_array(store: &dyn KvStore, key: &str) -> Result<Vec<Value>, AppError> {
    match store.get(key).await? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Reads `key` as a JSON array and decodes each element on its own, so one
/// corrupt element does not lose the rest. `convert` may also reject an
/// element (e.g. an unparseable date) by returning `None`.
pub async fn load_records<R, T, F>(
    store: &dyn KvStore,
    key: &str,
    convert: F,
) -> Result<Decoded<T>, AppError>
where
    R: DeserializeOwned,
    F: Fn(R) -> Option<T>,
{
    let values = load_array(store, key).await?;

    let mut out = Decoded {
        records: Vec::with_capacity(values.len()),
        rejected: Vec::new(),
    };
    for (index, value) in values.into_iter().enumerate() {
        match R::deserialize(&value) {
            Ok(record) => match convert(record) {
                Some(item) => out.records.push(item),
                None => {
                    warn!(key, index, "skipping record with invalid fields");
                    out.rejected.push(value);
                }
            },
            Err(e) => {
                warn!(key, index, error = %e, "skipping malformed record");
                out.rejected.push(value);
            }
        }
    }
    Ok(out)
}

/// Writes `records` followed by the `rejected` raw elements of the load they
/// came from.
pub async fn save_records<R: Serialize>(
    store: &dyn KvStore,
    key: &str,
    records: &[R],
    rejected: &[Value],
) -> Result<(), AppError> {
    let mut values = Vec::with_capacity(records.len() + rejected.len());
    for record in records {
        values.push(serde_json::to_value(record)?);
    }
    values.extend(rejected.iter().cloned());
    store.put(key, serde_json::to_string(&values)?).await?;
    Ok(())
}

/// Appends one record to the array at `key` without decoding the existing
/// elements.
pub async fn append_record<R: Serialize>(
    store: &dyn KvStore,
    key: &str,
    record: &R,
) -> Result<usize, AppError> {
    let mut values = load_array(store, key).await?;
    values.push(serde_json::to_value(record)?);
    store.put(key, serde_json::to_string(&values)?).await?;
    debug!(key, len = values.len(), "record appended");
    Ok(values.len())
}
