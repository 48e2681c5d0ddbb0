use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::utils::date::serializer;

// BookDto is the serialized shape of a book in every response body.
// published_year is written as null when unknown, never omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_year: Option<i64>,
    pub available: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            isbn: other.isbn.to_string(),
            published_year: other.published_year,
            available: other.available,
            created_at: other.created_at,
        }
    }
}
