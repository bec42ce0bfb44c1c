use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::Notify;

use crate::api::{ApiResult, ConnectionRepository};
use crate::models::ConnectionRecord;
use crate::notify::{Navigator, NotificationSink};
use crate::provision::SubmissionController;

struct RegistryInner {
    connections: Vec<ConnectionRecord>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Client-side view of the account's connections. The backend stays the
/// source of truth; the registry only holds the last fetched snapshot and
/// wakes subscribers whenever `refresh()` replaces it.
pub struct ConnectionRegistry {
    repo: Arc<dyn ConnectionRepository>,
    inner: Mutex<RegistryInner>,
    changed: Arc<Notify>,
}

impl ConnectionRegistry {
    pub fn new(repo: Arc<dyn ConnectionRepository>) -> Self {
        Self {
            repo,
            inner: Mutex::new(RegistryInner {
                connections: Vec::new(),
                refreshed_at: None,
            }),
            changed: Arc::new(Notify::new()),
        }
    }

    /// Re-fetch the list from the backend and wake subscribers.
    pub async fn refresh(&self) -> ApiResult<()> {
        let connections = self.repo.list_connections().await?;
        {
            let mut inner = self.inner.lock().expect("connection registry lock");
            inner.connections = connections;
            inner.refreshed_at = Some(Utc::now());
        }
        self.changed.notify_waiters();
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<ConnectionRecord> {
        self.inner
            .lock()
            .expect("connection registry lock")
            .connections
            .clone()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.inner
            .lock()
            .expect("connection registry lock")
            .refreshed_at
    }

    /// Handle subscribers await `notified()` on to observe list changes.
    pub fn changed(&self) -> Arc<Notify> {
        self.changed.clone()
    }
}

/// Everything a UI shell needs to drive the client.
pub struct AppState {
    pub repo: Arc<dyn ConnectionRepository>,
    pub registry: Arc<ConnectionRegistry>,
    pub submission: SubmissionController,
    pub navigator: Arc<dyn Navigator>,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn ConnectionRepository>,
        notifier: Arc<dyn NotificationSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let registry = Arc::new(ConnectionRegistry::new(repo.clone()));
        let submission = SubmissionController::new(
            repo.clone(),
            notifier,
            navigator.clone(),
            registry.clone(),
        );
        Self {
            repo,
            registry,
            submission,
            navigator,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::ConnectionRegistry;
    use crate::api::{ApiResult, ConnectionRepository};
    use crate::models::ConnectionRecord;

    struct ListRepo {
        connections: Vec<ConnectionRecord>,
    }

    #[async_trait::async_trait]
    impl ConnectionRepository for ListRepo {
        async fn create_connection(
            &self,
            _dsn: &str,
            _name: &str,
            _is_sample: bool,
        ) -> ApiResult<ConnectionRecord> {
            unimplemented!("not exercised")
        }

        async fn list_connections(&self) -> ApiResult<Vec<ConnectionRecord>> {
            Ok(self.connections.clone())
        }

        async fn get_connection(&self, _id: Uuid) -> ApiResult<ConnectionRecord> {
            unimplemented!("not exercised")
        }

        async fn delete_connection(&self, _id: Uuid) -> ApiResult<()> {
            unimplemented!("not exercised")
        }
    }

    fn sample_record() -> ConnectionRecord {
        ConnectionRecord {
            id: Uuid::new_v4(),
            name: "DVD Rental".to_string(),
            dsn: "sqlite:///dvdrental.db".to_string(),
            database: "dvdrental".to_string(),
            dialect: "sqlite".to_string(),
            is_sample: true,
        }
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_and_stamps_time() {
        let repo = Arc::new(ListRepo {
            connections: vec![sample_record()],
        });
        let registry = ConnectionRegistry::new(repo);

        assert!(registry.snapshot().is_empty());
        assert!(registry.refreshed_at().is_none());

        registry.refresh().await.expect("refresh");

        assert_eq!(registry.snapshot().len(), 1);
        assert!(registry.refreshed_at().is_some());
    }

    #[tokio::test]
    async fn refresh_wakes_a_waiting_subscriber() {
        let repo = Arc::new(ListRepo {
            connections: Vec::new(),
        });
        let registry = Arc::new(ConnectionRegistry::new(repo));

        let changed = registry.changed();
        let waiter = tokio::spawn(async move {
            changed.notified().await;
        });
        // Let the subscriber register before the refresh fires.
        tokio::task::yield_now().await;

        registry.refresh().await.expect("refresh");
        waiter.await.expect("subscriber woken");
    }
}
