//! Books repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookSummaryRow, CreateBook, UpdateBook},
};

/// Shared SELECT for book rows with the active-loan count derived from the
/// loan ledger. Availability is recomputed on every read; nothing is cached.
const SUMMARY_SELECT: &str = r#"
    SELECT b.id, b.title, b.author, b.isbn, b.category, b.copy_count,
           (SELECT COUNT(*) FROM loans l
             WHERE l.book_id = b.id AND l.return_date IS NULL) AS active_loans
      FROM books b
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.get_opt(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get book by ID, returning None when absent
    pub async fn get_opt(&self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Get book by ISBN, returning None when absent
    pub async fn get_by_isbn_opt(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = ?")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// List all books with availability, ordered by title
    pub async fn list_summaries(&self) -> AppResult<Vec<BookSummaryRow>> {
        let query = format!("{} ORDER BY b.title ASC", SUMMARY_SELECT);
        let rows = sqlx::query_as::<_, BookSummaryRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Keyword search over title, author, isbn and category
    pub async fn search_summaries(&self, keyword: &str) -> AppResult<Vec<BookSummaryRow>> {
        let query = format!(
            r#"{}
             WHERE b.title    LIKE ?
                OR b.author   LIKE ?
                OR b.isbn     LIKE ?
                OR b.category LIKE ?
             ORDER BY b.title ASC"#,
            SUMMARY_SELECT
        );
        let pattern = format!("%{}%", keyword);
        let rows = sqlx::query_as::<_, BookSummaryRow>(&query)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get one book with availability
    pub async fn get_summary(&self, id: i64) -> AppResult<BookSummaryRow> {
        let query = format!("{} WHERE b.id = ?", SUMMARY_SELECT);
        sqlx::query_as::<_, BookSummaryRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO books (title, author, isbn, category, copy_count)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.category)
        .bind(book.copy_count)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update a book (full-field update)
    pub async fn update(&self, id: i64, book: &UpdateBook) -> AppResult<Book> {
        let result = sqlx::query(
            r#"
            UPDATE books
               SET title = ?,
                   author = ?,
                   isbn = ?,
                   category = ?,
                   copy_count = ?
             WHERE id = ?
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.category)
        .bind(book.copy_count)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete a book. Open loans referencing it are left in place; loan views
    /// fall back to a placeholder label for the missing book.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
