use chrono::NaiveDateTime;

// NewBook carries the caller-supplied fields of a book that has not been persisted yet.
// id and created_at are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_year: Option<i64>,
    pub available: bool,
}

impl NewBook {
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            published_year: None,
            available: true,
        }
    }

    pub fn with_published_year(mut self, published_year: Option<i64>) -> Self {
        self.published_year = published_year;
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

// BookEntity is a persisted row of the books table.
#[derive(Debug, Clone, PartialEq)]
pub struct BookEntity {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_year: Option<i64>,
    pub available: bool,
    pub created_at: NaiveDateTime,
}
