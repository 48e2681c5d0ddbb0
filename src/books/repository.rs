pub mod sqlite_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::{BookEntity, NewBook};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait BookRepository: Sync + Send {
    // persists a book, assigning id and created_at; a duplicate isbn is rejected by the unique index
    async fn create(&self, book: &NewBook) -> LibraryResult<BookEntity>;

    // all books in insertion order
    async fn list_all(&self) -> LibraryResult<Vec<BookEntity>>;

    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>>;

    // removes every book, for teardown only
    async fn delete_all(&self) -> LibraryResult<usize>;
}
