pub mod error;

pub use error::{CorkboardError, Result};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::store::SqliteStore;
use crate::sync::SyncEngine;

pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub sync: Arc<SyncEngine<SqliteStore>>,
    pub config: Config,
}

impl AppContext {
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_store(config, store)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Self::with_store(config, store)
    }

    fn with_store(config: Config, store: Arc<SqliteStore>) -> Result<Self> {
        let url = Url::parse(&config.remote.url)?;
        let timeout = Duration::from_secs(config.remote.timeout_secs);
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::with_timeout(url, timeout));
        let sync = Arc::new(SyncEngine::new(fetcher, store.clone()));

        Ok(Self {
            store,
            sync,
            config,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| CorkboardError::Config("Could not find data directory".into()))?;
        let corkboard_dir = data_dir.join("corkboard");
        std::fs::create_dir_all(&corkboard_dir)?;
        Ok(corkboard_dir.join("corkboard.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_context_builds() {
        let ctx = AppContext::in_memory(Config::default()).unwrap();
        assert_eq!(ctx.config.sync.interval_secs, 10);
    }

    #[test]
    fn test_invalid_remote_url_is_rejected() {
        let mut config = Config::default();
        config.remote.url = "not a url".into();
        assert!(AppContext::in_memory(config).is_err());
    }
}
