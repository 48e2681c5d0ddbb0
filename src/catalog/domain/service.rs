use async_trait::async_trait;
use tracing::warn;
use crate::books::domain::model::NewBook;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::library::{LibraryError, LibraryResult};

pub const DUPLICATE_ISBN_MESSAGE: &str = "Book with this ISBN already exists";

pub struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    // The isbn lookup only gives a friendly early answer; the unique index decides races.
    async fn add_book(&self, book: &NewBook) -> LibraryResult<BookDto> {
        if self.book_repository.find_by_isbn(book.isbn.as_str()).await?.is_some() {
            warn!(isbn = book.isbn.as_str(), "rejected duplicate isbn");
            return Err(LibraryError::duplicate_key(DUPLICATE_ISBN_MESSAGE));
        }
        match self.book_repository.create(book).await {
            Ok(created) => Ok(BookDto::from(&created)),
            Err(LibraryError::DuplicateKey { .. }) => {
                warn!(isbn = book.isbn.as_str(), "unique index rejected duplicate isbn");
                Err(LibraryError::duplicate_key(DUPLICATE_ISBN_MESSAGE))
            }
            Err(err) => Err(err),
        }
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.list_all().await?;
        Ok(books.iter().map(BookDto::from).collect())
    }
}
