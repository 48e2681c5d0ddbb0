use serde::{Deserialize, Serialize};

const MEMORY_TARGET: &str = ":memory:";

// RepositoryStore selects the relational engine target behind repositories
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub enum RepositoryStore {
    Sqlite(String),
    InMemorySqlite,
}

impl RepositoryStore {
    /// Parses a connection target such as `books.db`, `sqlite:///books.db`,
    /// `sqlite:////var/lib/books.db` or `:memory:`.
    pub fn from_url(url: &str) -> RepositoryStore {
        let path = url.strip_prefix("sqlite:///")
            .or_else(|| url.strip_prefix("sqlite://"))
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        if path.is_empty() || path == MEMORY_TARGET {
            RepositoryStore::InMemorySqlite
        } else {
            RepositoryStore::Sqlite(path.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_parse_store_urls() {
        assert_eq!(RepositoryStore::InMemorySqlite, RepositoryStore::from_url(":memory:"));
        assert_eq!(RepositoryStore::InMemorySqlite, RepositoryStore::from_url("sqlite:///:memory:"));
        assert_eq!(RepositoryStore::InMemorySqlite, RepositoryStore::from_url("sqlite://"));
        assert_eq!(RepositoryStore::Sqlite("books.db".to_string()), RepositoryStore::from_url("books.db"));
        assert_eq!(RepositoryStore::Sqlite("books.db".to_string()), RepositoryStore::from_url("sqlite:///books.db"));
        assert_eq!(RepositoryStore::Sqlite("/var/lib/books.db".to_string()), RepositoryStore::from_url("sqlite:////var/lib/books.db"));
    }
}
