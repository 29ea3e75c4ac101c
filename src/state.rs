use crate::config::{AppConfig, StorageBackend};
use crate::foods::tags::TagRegistry;
use crate::storage::{FileStore, KvStore, MemoryStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn KvStore>,
    pub tags: Arc<TagRegistry>,
    /// Held across load-modify-save of a blob; the store has no transactions.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match config.storage_backend {
            StorageBackend::File => {
                let store = FileStore::new(&config.data_dir).await?;
                info!(data_dir = %config.data_dir.display(), "file store ready");
                Arc::new(store) as Arc<dyn KvStore>
            }
            StorageBackend::Memory => {
                warn!("using in-memory store; data is lost on restart");
                Arc::new(MemoryStore::default()) as Arc<dyn KvStore>
            }
        };

        let tags = Arc::new(TagRegistry::build(&config.default_locale));
        info!(locales = ?tags.supported_locales(), "tag tables built");

        Ok(Self::from_parts(config, store, tags))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn KvStore>,
        tags: Arc<TagRegistry>,
    ) -> Self {
        Self {
            config,
            store,
            tags,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with_store(Arc::new(MemoryStore::default()))
    }

    #[cfg(test)]
    pub fn fake_with_store(store: Arc<dyn KvStore>) -> Self {
        use crate::goals::repo_types::GoalSet;

        let config = Arc::new(AppConfig {
            storage_backend: StorageBackend::Memory,
            data_dir: "unused".into(),
            default_locale: "en".into(),
            default_goals: GoalSet {
                calories: 2000.0,
                protein: 150.0,
                carbs: 250.0,
                fat: 70.0,
            },
        });
        let tags = Arc::new(TagRegistry::build("en"));
        Self::from_parts(config, store, tags)
    }
}
