use super::{AccountRepository, BookRepository, ReviewRepository, SessionStore};
use crate::core::types::{Account, Book, Review, SessionRecord};
use crate::error::StoreError;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// In-process session store for development and tests. Entries never expire.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, SessionRecord>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save_session(
        &self,
        session_id: &str,
        record: &SessionRecord,
    ) -> Result<(), StoreError> {
        self.sessions.insert(session_id.to_string(), record.clone());
        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self.sessions.get(session_id).map(|r| r.value().clone()))
    }
}

#[derive(Default)]
pub struct MemoryAccountRepository {
    accounts: DashMap<String, Account>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(username).map(|a| a.value().clone()))
    }

    async fn insert(&self, account: Account) -> Result<bool, StoreError> {
        match self.accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(true)
            }
        }
    }
}

#[derive(Default)]
pub struct MemoryBookRepository {
    books: DashMap<Uuid, Book>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn save(&self, book: Book) -> Result<Book, StoreError> {
        self.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        Ok(self.books.get(&id).map(|b| b.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let mut books: Vec<Book> = self.books.iter().map(|b| b.value().clone()).collect();
        books.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(books)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.books.remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryReviewRepository {
    reviews: DashMap<Uuid, Review>,
}

impl MemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn save(&self, review: Review) -> Result<Review, StoreError> {
        self.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Review>, StoreError> {
        Ok(self.reviews.get(&id).map(|r| r.value().clone()))
    }

    async fn list_for_book(&self, book_id: Option<Uuid>) -> Result<Vec<Review>, StoreError> {
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| book_id.map_or(true, |id| r.book_id == id))
            .map(|r| r.value().clone())
            .collect();
        reviews.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(reviews)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.reviews.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;
    use chrono::Utc;

    fn account(username: &str) -> Account {
        Account {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "hash".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_session_lookup_misses_unknown_id() {
        let store = MemorySessionStore::new();
        assert!(store.get_session("nope").await.unwrap().is_none());

        let record = SessionRecord::from_account(&account("alice"));
        store.save_session("s1", &record).await.unwrap();
        assert_eq!(store.get_session("s1").await.unwrap(), Some(record));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_refused() {
        let repo = MemoryAccountRepository::new();
        assert!(repo.insert(account("alice")).await.unwrap());
        assert!(!repo.insert(account("alice")).await.unwrap());
        assert!(repo.find_by_username("alice").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reviews_filter_by_book() {
        let repo = MemoryReviewRepository::new();
        let book_a = Uuid::new_v4();
        let book_b = Uuid::new_v4();
        for book_id in [book_a, book_a, book_b] {
            repo.save(Review {
                id: Uuid::new_v4(),
                book_id,
                author: "alice".to_string(),
                rating: 4,
                body: "fine".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.list_for_book(Some(book_a)).await.unwrap().len(), 2);
        assert_eq!(repo.list_for_book(None).await.unwrap().len(), 3);
    }
}
