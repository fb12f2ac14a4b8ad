pub mod memory;
pub mod mock;
pub mod redis;

use crate::core::types::{Account, Book, Review, SessionRecord};
use crate::error::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::{
    MemoryAccountRepository, MemoryBookRepository, MemoryReviewRepository, MemorySessionStore,
};
pub use self::redis::RedisSessionStore;

/// Key-value cache of session records, keyed by opaque session id.
///
/// Accesses are single-key reads and writes; no cross-key transaction is needed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Writes the record for a freshly created session.
    async fn save_session(&self, session_id: &str, record: &SessionRecord)
        -> Result<(), StoreError>;

    /// Returns `None` when no (or an empty) record exists for the id.
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionRecord>, StoreError>;
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Returns `false` when the username is already taken.
    async fn insert(&self, account: Account) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn save(&self, book: Book) -> Result<Book, StoreError>;
    async fn find(&self, id: Uuid) -> Result<Option<Book>, StoreError>;
    async fn list(&self) -> Result<Vec<Book>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn save(&self, review: Review) -> Result<Review, StoreError>;
    async fn find(&self, id: Uuid) -> Result<Option<Review>, StoreError>;
    async fn list_for_book(&self, book_id: Option<Uuid>) -> Result<Vec<Review>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
