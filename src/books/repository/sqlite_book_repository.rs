use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{error, info};

use crate::books::domain::model::{BookEntity, NewBook};
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::db::{parse_date, string_date};

#[derive(Debug, Clone)]
pub struct SqliteBookRepository {
    conn: Arc<Mutex<Connection>>,
    table_name: String,
}

impl SqliteBookRepository {
    pub(crate) fn new(conn: Connection, table_name: &str) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            table_name: table_name.to_string(),
        }
    }

    fn select_sql(&self) -> String {
        format!("SELECT id, title, author, isbn, published_year, available, created_at FROM {}", self.table_name)
    }

    // runs blocking sqlite work off the async executor
    async fn with_conn<T, F>(&self, f: F) -> LibraryResult<T>
        where T: Send + 'static,
              F: FnOnce(&mut Connection) -> LibraryResult<T> + Send + 'static {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|err| LibraryError::runtime(
                format!("sqlite connection poisoned {}", err).as_str(), None))?;
            f(&mut *guard)
        }).await?
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn create(&self, book: &NewBook) -> LibraryResult<BookEntity> {
        let book = book.clone();
        let table_name = self.table_name.clone();
        let select_sql = self.select_sql();
        let res = self.with_conn(move |conn| {
            // dropping the transaction without commit rolls the insert back
            let tx = conn.transaction()?;
            tx.execute(
                format!("INSERT INTO {} (title, author, isbn, published_year, available, created_at) \
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)", table_name).as_str(),
                params![book.title, book.author, book.isbn, book.published_year, book.available,
                        string_date(Utc::now().naive_utc())],
            )?;
            let id = tx.last_insert_rowid();
            let entity = tx.query_row(
                format!("{} WHERE id = ?1", select_sql).as_str(), params![id], map_to_book)?;
            tx.commit()?;
            Ok(entity)
        }).await;
        match &res {
            Ok(entity) => info!(id = entity.id, isbn = entity.isbn.as_str(), "book persisted"),
            Err(LibraryError::DuplicateKey { .. }) => {}
            Err(err) => error!(error = %err, "failed to persist book"),
        }
        res
    }

    async fn list_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let select_sql = self.select_sql();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(format!("{} ORDER BY id", select_sql).as_str())?;
            let books = stmt.query_map([], map_to_book)?
                .collect::<rusqlite::Result<Vec<BookEntity>>>()?;
            Ok(books)
        }).await
    }

    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        let select_sql = self.select_sql();
        let isbn = isbn.to_string();
        self.with_conn(move |conn| {
            let book = conn.query_row(
                format!("{} WHERE isbn = ?1", select_sql).as_str(), params![isbn], map_to_book)
                .optional()?;
            Ok(book)
        }).await
    }

    async fn delete_all(&self) -> LibraryResult<usize> {
        let table_name = self.table_name.clone();
        self.with_conn(move |conn| {
            let deleted = conn.execute(format!("DELETE FROM {}", table_name).as_str(), [])?;
            Ok(deleted)
        }).await
    }
}

fn map_to_book(row: &Row<'_>) -> rusqlite::Result<BookEntity> {
    let created_at: String = row.get(6)?;
    Ok(BookEntity {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        isbn: row.get(3)?,
        published_year: row.get(4)?,
        available: row.get(5)?,
        created_at: parse_date(6, created_at.as_str())?,
    })
}
