use crate::domain::submission::{NewSubmission, Submission};
use crate::storage::{StoreError, SubmissionStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use time::OffsetDateTime;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Submission>,
}

/// Process-local submission store.
///
/// Ids are assigned from 1 upward and never reused. Taking the store offline
/// with [`InMemorySubmissionStore::set_available`] makes every operation fail
/// the way an unreachable database would.
#[derive(Debug)]
pub struct InMemorySubmissionStore {
    inner: RwLock<Inner>,
    available: AtomicBool,
}

impl Default for InMemorySubmissionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySubmissionStore {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: RwLock::new(Inner { next_id: 1, rows: BTreeMap::new() }), available: AtomicBool::new(true) }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn create(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        self.check_available()?;
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;

        let record = Submission {
            id,
            name: submission.name,
            email: submission.email,
            message: submission.message,
            is_read: false,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.rows.insert(id, record.clone());

        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.rows.values().rev().cloned().collect())
    }

    async fn toggle_read(&self, id: i64) -> Result<Submission, StoreError> {
        self.check_available()?;
        let current = self.inner.read().await.rows.get(&id).map(|s| s.is_read).ok_or(StoreError::NotFound)?;

        let mut inner = self.inner.write().await;
        let row = inner.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.is_read = !current;
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.check_available()?;
        self.inner.write().await.rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
