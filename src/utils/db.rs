use chrono::NaiveDateTime;
use rusqlite::{Connection, ErrorCode};
use tracing::info;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;
use crate::utils::date::{DATE_FMT, STORED_DATE_FMT};

// helper method to open a connection for the given store
pub(crate) fn open_connection(store: &RepositoryStore) -> LibraryResult<Connection> {
    let conn = match store {
        RepositoryStore::Sqlite(path) => {
            info!(path = path.as_str(), "opening sqlite database");
            Connection::open(path)?
        }
        RepositoryStore::InMemorySqlite => {
            Connection::open_in_memory()?
        }
    };
    Ok(conn)
}

// creates the books table if missing; isbn carries the unique index that backs duplicate detection
pub(crate) fn create_table(conn: &Connection, table_name: &str) -> LibraryResult<()> {
    conn.execute_batch(format!(
        "CREATE TABLE IF NOT EXISTS {table_name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            isbn TEXT NOT NULL UNIQUE,
            published_year INTEGER NULL,
            available INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );").as_str())?;
    Ok(())
}

pub(crate) fn string_date(date: NaiveDateTime) -> String {
    format!("{}", date.format(STORED_DATE_FMT))
}

pub(crate) fn parse_date(idx: usize, str: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(str, DATE_FMT).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
    })
}

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false)
        .json()
        .init();
}

impl From<rusqlite::Error> for LibraryError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _) => {
                let reason = Some(code.extended_code.to_string());
                if code.code == ErrorCode::ConstraintViolation
                    && code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
                    LibraryError::duplicate_key(err.to_string().as_str())
                } else {
                    LibraryError::database(err.to_string().as_str(), reason)
                }
            }
            _ => {
                LibraryError::database(err.to_string().as_str(), None)
            }
        }
    }
}
