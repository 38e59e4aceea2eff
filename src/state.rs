use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// File-backed state rooted at `config.data_dir`.
    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(FileStore::new(config.data_dir.clone())) as Arc<dyn KeyValueStore>;
        Self {
            config: Arc::new(config),
            store,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    /// In-memory state for tests. Uses the legacy digest so tests stay fast.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            data_dir: "unused".into(),
            history_limit: crate::config::DEFAULT_HISTORY_LIMIT,
            password_scheme: crate::config::PasswordScheme::Legacy,
        });
        let store = Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>;
        Self {
            config,
            store,
            clock: Arc::new(SystemClock),
        }
    }
}
