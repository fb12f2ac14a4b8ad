use super::{BookRepository, SessionStore};
use crate::core::types::{Book, SessionRecord};
use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// A session store whose backend is always down. Useful for testing the
/// infrastructure-failure path of the verifier.
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn save_session(
        &self,
        _session_id: &str,
        _record: &SessionRecord,
    ) -> Result<(), StoreError> {
        Err(StoreError::Backend("session store unavailable".to_string()))
    }

    async fn get_session(&self, _session_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        Err(StoreError::Backend("session store unavailable".to_string()))
    }
}

/// Wraps a book repository and counts calls to `save`.
pub struct CountingBookRepository<R> {
    inner: R,
    saves: AtomicUsize,
}

impl<R: BookRepository> CountingBookRepository<R> {
    pub fn new(inner: R) -> Self {
        CountingBookRepository {
            inner,
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: BookRepository> BookRepository for CountingBookRepository<R> {
    async fn save(&self, book: Book) -> Result<Book, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(book).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        self.inner.find(id).await
    }

    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        self.inner.list().await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.inner.delete(id).await
    }
}
