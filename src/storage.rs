use std::{collections::HashMap, path::PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tokio::sync::RwLock;
use tracing::debug;

pub const ENTRIES_KEY: &str = "entries";
pub const GOAL_HISTORY_KEY: &str = "goal_history";
pub const GOALS_KEY: &str = "goals";
pub const FOODS_KEY: &str = "foods";

/// Key-value blob store. Every value is a whole JSON document that is
/// overwritten on save.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn put(&self, key: &str, value: String) -> anyhow::Result<()>;
}

pub(crate) fn is_valid_key(key: &str) -> bool {
    lazy_static! {
        static ref KEY_RE: Regex = Regex::new(r"^[a-z0-9_]{1,64}$").unwrap();
    }
    KEY_RE.is_match(key)
}

/// One `<key>.json` file per key under `root`.
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub async fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("create data dir {}", root.display()))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
        if !is_valid_key(key) {
            anyhow::bail!("invalid storage key {key:?}");
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    async fn put(&self, key: &str, value: String) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        // write-then-rename so a crash never leaves a half-written blob
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value.as_bytes())
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
        debug!(key, bytes = value.len(), "blob saved");
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> anyhow::Result<()> {
        if !is_valid_key(key) {
            anyhow::bail!("invalid storage key {key:?}");
        }
        self.inner.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_validation() {
        assert!(is_valid_key("goal_history"));
        assert!(!is_valid_key("../etc/passwd"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("Entries"));
    }

    #[tokio::test]
    async fn file_store_put_get_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("nested")).await.expect("store");

        assert_eq!(store.get(ENTRIES_KEY).await.unwrap(), None);
        store.put(ENTRIES_KEY, "[]".into()).await.unwrap();
        assert_eq!(store.get(ENTRIES_KEY).await.unwrap().as_deref(), Some("[]"));

        store.put(ENTRIES_KEY, "[1]".into()).await.unwrap();
        assert_eq!(store.get(ENTRIES_KEY).await.unwrap().as_deref(), Some("[1]"));
        assert!(!dir.path().join("nested/entries.json.tmp").exists());
    }

    #[tokio::test]
    async fn file_store_rejects_bad_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path()).await.expect("store");
        assert!(store.put("../x", "{}".into()).await.is_err());
    }

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryStore::default();
        store.put(FOODS_KEY, "[]".into()).await.unwrap();
        assert_eq!(store.get(FOODS_KEY).await.unwrap().as_deref(), Some("[]"));
        assert!(store.get(ENTRIES_KEY).await.unwrap().is_none());
        assert!(store.put("Foods", "[]".into()).await.is_err());
    }
}
