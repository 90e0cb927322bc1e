//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookSummary, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books with availability, optionally filtered by keyword
    pub async fn list_books(&self, keyword: Option<&str>) -> AppResult<Vec<BookSummary>> {
        let rows = match keyword {
            Some(kw) if !kw.trim().is_empty() => {
                self.repository.books.search_summaries(kw.trim()).await?
            }
            _ => self.repository.books.list_summaries().await?,
        };
        Ok(rows.into_iter().map(BookSummary::from).collect())
    }

    /// Get one book with availability
    pub async fn get_book(&self, id: i64) -> AppResult<BookSummary> {
        let row = self.repository.books.get_summary(id).await?;
        Ok(BookSummary::from(row))
    }

    /// Create a new book after checking the ISBN is not already catalogued
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        if let Some(existing) = self.repository.books.get_by_isbn_opt(&book.isbn).await? {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} already exists (id={})",
                book.isbn, existing.id
            )));
        }

        let created = self.repository.books.create(&book).await?;
        tracing::info!("Book created: id={} isbn={}", created.id, created.isbn);
        Ok(created)
    }

    /// Update a book (full-field update).
    ///
    /// The copy count may be set below the current active-loan count; the
    /// availability computation then yields zero or a negative value and the
    /// book reads as not available. That is not an error.
    pub async fn update_book(&self, id: i64, book: UpdateBook) -> AppResult<Book> {
        book.validate()?;

        if let Some(existing) = self.repository.books.get_by_isbn_opt(&book.isbn).await? {
            if existing.id != id {
                return Err(AppError::Conflict(format!(
                    "A book with ISBN {} already exists (id={})",
                    book.isbn, existing.id
                )));
            }
        }

        self.repository.books.update(id, &book).await
    }

    /// Delete a book. There is no cascade protection: loans referencing the
    /// book stay in the ledger and resolve to a placeholder label.
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }
}
