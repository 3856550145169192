use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;

use crate::app::{CorkboardError, Result};
use crate::domain::Snapshot;
use crate::fetcher::Fetcher;
use crate::store::Store;

/// Checkpoints reached during a sync cycle, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Fetching,
    Fetched,
    Stored,
}

impl SyncPhase {
    pub fn percent(self) -> u16 {
        match self {
            SyncPhase::Fetching => 0,
            SyncPhase::Fetched => 50,
            SyncPhase::Stored => 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The store was overwritten with a differing remote collection.
    Updated { rows: usize },
    /// The remote collection matched the snapshot; store left untouched.
    Unchanged,
    /// Another sync held the permit; nothing was fetched.
    AlreadyRunning,
}

/// Fetches the remote collection, compares it to the last-seen snapshot,
/// and overwrites the store when it differs.
///
/// The snapshot is owned here and nowhere else, and at most one cycle runs
/// at a time: a second caller gets [`SyncOutcome::AlreadyRunning`] instead
/// of racing the first on the store.
pub struct SyncEngine<S: Store> {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    store: Arc<S>,
    snapshot: Mutex<Option<Snapshot>>,
    inflight: Semaphore,
}

impl<S: Store> SyncEngine<S> {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, store: Arc<S>) -> Self {
        Self {
            fetcher,
            store,
            snapshot: Mutex::new(None),
            inflight: Semaphore::new(1),
        }
    }

    pub async fn run(&self) -> Result<SyncOutcome> {
        self.run_with(|_| {}).await
    }

    /// Run one sync cycle, reporting each [`SyncPhase`] as it is reached.
    ///
    /// A failed fetch or store write propagates the error and leaves both
    /// the store and the snapshot as they were.
    pub async fn run_with<F>(&self, progress: F) -> Result<SyncOutcome>
    where
        F: Fn(SyncPhase) + Send,
    {
        let _permit = match self.inflight.try_acquire() {
            Ok(permit) => permit,
            Err(_) => {
                tracing::debug!("sync already in flight, skipping");
                return Ok(SyncOutcome::AlreadyRunning);
            }
        };

        progress(SyncPhase::Fetching);
        let posts = self.fetcher.fetch_posts().await?;
        progress(SyncPhase::Fetched);

        {
            let snapshot = self.lock_snapshot()?;
            if let Some(snapshot) = snapshot.as_ref() {
                if snapshot.matches(&posts) {
                    tracing::debug!("remote collection unchanged, store left untouched");
                    return Ok(SyncOutcome::Unchanged);
                }
            }
        }

        let rows = self.store.replace_all(&posts)?;
        progress(SyncPhase::Stored);

        let mut snapshot = self.lock_snapshot()?;
        *snapshot = Some(Snapshot::new(posts));

        tracing::info!("synced {} posts from remote", rows);
        Ok(SyncOutcome::Updated { rows })
    }

    /// When the current snapshot was taken, if any.
    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.taken_at))
    }

    fn lock_snapshot(&self) -> Result<std::sync::MutexGuard<'_, Option<Snapshot>>> {
        self.snapshot
            .lock()
            .map_err(|e| CorkboardError::Other(format!("snapshot lock poisoned: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use async_trait::async_trait;

    use crate::domain::{NewPost, Post};
    use crate::store::SqliteStore;

    struct StaticFetcher {
        posts: Mutex<Vec<Post>>,
    }

    impl StaticFetcher {
        fn new(posts: Vec<Post>) -> Self {
            Self {
                posts: Mutex::new(posts),
            }
        }

        fn set(&self, posts: Vec<Post>) {
            *self.posts.lock().unwrap() = posts;
        }
    }

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch_posts(&self) -> Result<Vec<Post>> {
            Ok(self.posts.lock().unwrap().clone())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch_posts(&self) -> Result<Vec<Post>> {
            Err(CorkboardError::Other("remote unavailable".into()))
        }
    }

    struct SlowFetcher {
        delay: Duration,
        posts: Vec<Post>,
    }

    #[async_trait]
    impl Fetcher for SlowFetcher {
        async fn fetch_posts(&self) -> Result<Vec<Post>> {
            tokio::time::sleep(self.delay).await;
            Ok(self.posts.clone())
        }
    }

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            user_id: 1,
            title: title.into(),
            body: "x".into(),
        }
    }

    fn engine(fetcher: Arc<dyn Fetcher + Send + Sync>) -> SyncEngine<SqliteStore> {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        SyncEngine::new(fetcher, store)
    }

    #[tokio::test]
    async fn test_sync_mirrors_fetched_collection() {
        let fetcher = Arc::new(StaticFetcher::new(vec![post(1, "a")]));
        let engine = engine(fetcher);

        let outcome = engine.run().await.unwrap();
        assert_eq!(outcome, SyncOutcome::Updated { rows: 1 });

        let posts = engine.store.all_posts().unwrap();
        assert_eq!(posts, vec![post(1, "a")]);
        assert!(engine.last_synced_at().is_some());
    }

    #[tokio::test]
    async fn test_identical_second_sync_is_suppressed() {
        let fetcher = Arc::new(StaticFetcher::new(vec![post(1, "a")]));
        let engine = engine(fetcher);

        engine.run().await.unwrap();
        let outcome = engine.run().await.unwrap();
        assert_eq!(outcome, SyncOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_manual_row_survives_unchanged_sync() {
        let fetcher = Arc::new(StaticFetcher::new(vec![post(1, "a")]));
        let engine = engine(fetcher);
        engine.run().await.unwrap();

        let new = NewPost {
            user_id: 5,
            title: "local".into(),
            body: "b".into(),
        };
        engine.store.insert_post(&new).unwrap();

        // Remote data unchanged, so the overwrite is suppressed and the
        // manually added row stays.
        let outcome = engine.run().await.unwrap();
        assert_eq!(outcome, SyncOutcome::Unchanged);
        assert_eq!(engine.store.count_posts().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_manual_row_destroyed_by_differing_sync() {
        let fetcher = Arc::new(StaticFetcher::new(vec![post(1, "a")]));
        let engine = SyncEngine::new(
            fetcher.clone(),
            Arc::new(SqliteStore::in_memory().unwrap()),
        );
        engine.run().await.unwrap();

        let new = NewPost {
            user_id: 5,
            title: "local".into(),
            body: "b".into(),
        };
        engine.store.insert_post(&new).unwrap();

        fetcher.set(vec![post(1, "a"), post(2, "b")]);
        let outcome = engine.run().await.unwrap();
        assert_eq!(outcome, SyncOutcome::Updated { rows: 2 });

        let posts = engine.store.all_posts().unwrap();
        assert_eq!(posts, vec![post(1, "a"), post(2, "b")]);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_store_and_snapshot_untouched() {
        let engine = engine(Arc::new(FailingFetcher));
        engine
            .store
            .insert_post(&NewPost {
                user_id: 1,
                title: "kept".into(),
                body: "b".into(),
            })
            .unwrap();

        assert!(engine.run().await.is_err());
        assert_eq!(engine.store.count_posts().unwrap(), 1);
        assert!(engine.last_synced_at().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_syncs_single_flight() {
        let fetcher = Arc::new(SlowFetcher {
            delay: Duration::from_millis(50),
            posts: vec![post(1, "a")],
        });
        let engine = engine(fetcher);

        let (first, second) = tokio::join!(engine.run(), engine.run());
        let outcomes = [first.unwrap(), second.unwrap()];

        assert!(outcomes.contains(&SyncOutcome::Updated { rows: 1 }));
        assert!(outcomes.contains(&SyncOutcome::AlreadyRunning));
    }

    #[tokio::test]
    async fn test_progress_checkpoints_in_order() {
        let fetcher = Arc::new(StaticFetcher::new(vec![post(1, "a")]));
        let engine = engine(fetcher);

        let phases = Arc::new(Mutex::new(Vec::new()));
        let recorder = phases.clone();
        engine
            .run_with(move |phase| recorder.lock().unwrap().push(phase))
            .await
            .unwrap();

        assert_eq!(
            *phases.lock().unwrap(),
            vec![SyncPhase::Fetching, SyncPhase::Fetched, SyncPhase::Stored]
        );
    }

    #[tokio::test]
    async fn test_suppressed_sync_never_reaches_stored() {
        let fetcher = Arc::new(StaticFetcher::new(vec![post(1, "a")]));
        let engine = engine(fetcher);
        engine.run().await.unwrap();

        let phases = Arc::new(Mutex::new(Vec::new()));
        let recorder = phases.clone();
        engine
            .run_with(move |phase| recorder.lock().unwrap().push(phase))
            .await
            .unwrap();

        assert_eq!(
            *phases.lock().unwrap(),
            vec![SyncPhase::Fetching, SyncPhase::Fetched]
        );
    }

    #[test]
    fn test_phase_percent_checkpoints() {
        assert_eq!(SyncPhase::Fetching.percent(), 0);
        assert_eq!(SyncPhase::Fetched.percent(), 50);
        assert_eq!(SyncPhase::Stored.percent(), 100);
    }
}
