use crate::books::repository::BookRepository;
use crate::books::repository::sqlite_book_repository::SqliteBookRepository;
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;
use crate::utils::db::{create_table, open_connection};

pub const BOOKS_TABLE: &str = "books";

pub async fn create_book_repository(store: &RepositoryStore) -> LibraryResult<Box<dyn BookRepository>> {
    let conn = open_connection(store)?;
    create_table(&conn, BOOKS_TABLE)?;
    Ok(Box::new(SqliteBookRepository::new(conn, BOOKS_TABLE)))
}
