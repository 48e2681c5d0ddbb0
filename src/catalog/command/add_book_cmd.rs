use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::books::domain::model::NewBook;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

// checked by key presence only, in this order; empty strings pass
const REQUIRED_FIELDS: [&str; 3] = ["title", "author", "isbn"];

pub struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct AddBookCommandRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[serde(default, deserialize_with = "lenient::year")]
    pub published_year: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub available: Option<bool>,
}

// Numeric fields as JSON clients send them: `2024.0` is a year, `1` and `0` are flags.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde::de::Error;
    use serde_json::Value;

    pub fn year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() <= i32::MAX as f64).map(|f| f as i64))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid published_year {}, expected an integer", n))),
            Some(other) => Err(D::Error::custom(format!("invalid published_year {}, expected an integer", other))),
        }
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(Value::Number(n)) if n.as_i64() == Some(1) => Ok(Some(true)),
            Some(Value::Number(n)) if n.as_i64() == Some(0) => Ok(Some(false)),
            Some(other) => Err(D::Error::custom(format!("invalid available {}, expected a boolean", other))),
        }
    }
}

impl AddBookCommandRequest {
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            published_year: None,
            available: None,
        }
    }

    /// Validates a raw JSON body: it must be an object carrying `title`, `author` and `isbn`.
    /// Only the first missing field is reported.
    pub fn from_json(json: Value) -> Result<Self, CommandError> {
        let fields = json.as_object()
            .ok_or_else(|| CommandError::validation("Request body must be a JSON object"))?;
        if let Some(missing) = REQUIRED_FIELDS.iter().find(|field| !fields.contains_key(**field)) {
            return Err(CommandError::validation(format!("Missing required field: {}", missing).as_str()));
        }
        serde_json::from_value(json).map_err(CommandError::from)
    }

    pub fn build_book(&self) -> NewBook {
        NewBook::new(self.title.as_str(), self.author.as_str(), self.isbn.as_str())
            .with_published_year(self.published_year)
            .with_available(self.available.unwrap_or(true))
    }
}


#[derive(Debug, Serialize, Deserialize)]
pub struct AddBookCommandResponse {
    pub success: bool,
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            success: true,
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.add_book(&book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use serde_json::json;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::{Configuration, Profile};

    async fn new_command() -> AddBookCommand {
        let config = Configuration::new(Profile::Testing);
        let svc = factory::create_catalog_service(&config).await.expect("should build service");
        AddBookCommand::new(Arc::clone(&svc))
    }

    fn validation_message(res: Result<AddBookCommandRequest, CommandError>) -> String {
        match res {
            Err(CommandError::Validation { message, .. }) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_run_add_book() {
        let cmd = new_command().await;
        let res = cmd.execute(AddBookCommandRequest::new("test book", "test author", "9999999999999"))
            .await.expect("should add book");
        assert!(res.success);
        assert_eq!("9999999999999", res.book.isbn);
        assert!(res.book.available);
        assert_eq!(None, res.book.published_year);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_book() {
        let cmd = new_command().await;
        let _ = cmd.execute(AddBookCommandRequest::new("a", "a", "1111111111111")).await.expect("should add book");
        let res = cmd.execute(AddBookCommandRequest::new("b", "b", "1111111111111")).await;
        assert!(matches!(res, Err(CommandError::DuplicateKey { .. })));
    }

    #[tokio::test]
    async fn test_should_parse_full_request() {
        let req = AddBookCommandRequest::from_json(json!({
            "title": "New Test Book",
            "author": "New Test Author",
            "isbn": "9999999999999",
            "published_year": 2024,
            "available": false
        })).expect("should parse request");
        let book = req.build_book();
        assert_eq!("New Test Book", book.title);
        assert_eq!(Some(2024), book.published_year);
        assert!(!book.available);
    }

    #[tokio::test]
    async fn test_should_default_optional_fields() {
        let req = AddBookCommandRequest::from_json(json!({
            "title": "", "author": "", "isbn": "8888888888888", "published_year": null, "available": null
        })).expect("should accept empty strings");
        let book = req.build_book();
        assert_eq!("", book.title);
        assert_eq!(None, book.published_year);
        assert!(book.available);
    }

    #[tokio::test]
    async fn test_should_report_first_missing_field() {
        assert_eq!("Missing required field: title",
                   validation_message(AddBookCommandRequest::from_json(json!({}))));
        assert_eq!("Missing required field: title",
                   validation_message(AddBookCommandRequest::from_json(json!({"isbn": "1"}))));
        assert_eq!("Missing required field: author",
                   validation_message(AddBookCommandRequest::from_json(json!({"title": "t", "isbn": "1"}))));
        assert_eq!("Missing required field: isbn",
                   validation_message(AddBookCommandRequest::from_json(json!({"title": "t", "author": "a"}))));
    }

    #[tokio::test]
    async fn test_should_reject_non_object_body() {
        let message = validation_message(AddBookCommandRequest::from_json(json!(["title", "author", "isbn"])));
        assert!(message.contains("JSON object"));
    }

    #[tokio::test]
    async fn test_should_reject_wrong_field_types() {
        let res = AddBookCommandRequest::from_json(json!({"title": 5, "author": "a", "isbn": "1"}));
        assert!(matches!(res, Err(CommandError::Serialization { .. })));
        let res = AddBookCommandRequest::from_json(json!({"title": "t", "author": "a", "isbn": "1", "available": "yes"}));
        assert!(matches!(res, Err(CommandError::Serialization { .. })));
        let res = AddBookCommandRequest::from_json(json!({"title": "t", "author": "a", "isbn": "1", "available": 2}));
        assert!(matches!(res, Err(CommandError::Serialization { .. })));
        let res = AddBookCommandRequest::from_json(json!({"title": "t", "author": "a", "isbn": "1", "published_year": 2024.5}));
        assert!(matches!(res, Err(CommandError::Serialization { .. })));
        let res = AddBookCommandRequest::from_json(json!({"title": "t", "author": "a", "isbn": "1", "published_year": "2024"}));
        assert!(matches!(res, Err(CommandError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_should_accept_integral_numbers() {
        let req = AddBookCommandRequest::from_json(json!({
            "title": "t", "author": "a", "isbn": "1", "published_year": 2024.0, "available": 0
        })).expect("should parse request");
        assert_eq!(Some(2024), req.published_year);
        assert_eq!(Some(false), req.available);

        let req = AddBookCommandRequest::from_json(json!({
            "title": "t", "author": "a", "isbn": "1", "available": 1
        })).expect("should parse request");
        assert_eq!(None, req.published_year);
        assert!(req.build_book().available);
    }
}
