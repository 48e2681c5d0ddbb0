use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEV_DATABASE_PATH: &str = "books_dev.db";

// Profile names the environment the service runs in
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Profile {
    Development,
    Testing,
    Production,
}

impl TryFrom<&str> for Profile {
    type Error = LibraryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "testing" | "test" => Ok(Profile::Testing),
            "production" | "prod" => Ok(Profile::Production),
            _ => Err(LibraryError::validation(format!("unknown profile {}", s).as_str(), None)),
        }
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Profile::Development => write!(f, "development"),
            Profile::Testing => write!(f, "testing"),
            Profile::Production => write!(f, "production"),
        }
    }
}

// Configuration abstracts config options for the catalog service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub profile: Profile,
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Configuration {
    pub fn new(profile: Profile) -> Self {
        Configuration {
            profile,
            database_url: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Reads `APP_ENV`, `DATABASE_URL`, `HOST` and `PORT` from the process environment.
    pub fn from_env() -> LibraryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> LibraryResult<Self>
        where F: Fn(&str) -> Option<String> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let profile = match var("APP_ENV") {
            Some(name) => Profile::try_from(name.as_str())?,
            None => Profile::Development,
        };
        let port = match var("PORT") {
            Some(port) => port.parse::<u16>().map_err(|err| LibraryError::validation(
                format!("invalid PORT {}: {}", port, err).as_str(), None))?,
            None => DEFAULT_PORT,
        };
        Ok(Configuration {
            profile,
            database_url: var("DATABASE_URL"),
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    // An explicit DATABASE_URL always wins over the profile default.
    pub fn store(&self) -> LibraryResult<RepositoryStore> {
        if let Some(url) = &self.database_url {
            return Ok(RepositoryStore::from_url(url));
        }
        match self.profile {
            Profile::Development => Ok(RepositoryStore::Sqlite(DEV_DATABASE_PATH.to_string())),
            Profile::Testing => Ok(RepositoryStore::InMemorySqlite),
            Profile::Production => Err(LibraryError::validation(
                "DATABASE_URL must be set for the production profile", None)),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
