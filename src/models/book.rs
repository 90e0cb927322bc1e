//! Book (catalog) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: Option<String>,
    pub copy_count: i64,
}

/// Internal row structure for availability queries
#[derive(Debug, Clone, FromRow)]
pub struct BookSummaryRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: Option<String>,
    pub copy_count: i64,
    pub active_loans: i64,
}

impl From<BookSummaryRow> for BookSummary {
    fn from(row: BookSummaryRow) -> Self {
        // Editing copy_count below the active loan count makes this negative;
        // the book is then simply not available.
        let available_copies = row.copy_count - row.active_loans;
        BookSummary {
            id: row.id,
            title: row.title,
            author: row.author,
            isbn: row.isbn,
            category: row.category,
            copy_count: row.copy_count,
            active_loans: row.active_loans,
            available_copies,
            available: available_copies > 0,
        }
    }
}

/// Book with availability derived from the loan ledger
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: Option<String>,
    pub copy_count: i64,
    pub active_loans: i64,
    pub available_copies: i64,
    pub available: bool,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Copy count must not be negative"))]
    pub copy_count: i64,
}

/// Update book request (full-field update)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Copy count must not be negative"))]
    pub copy_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(copy_count: i64, active_loans: i64) -> BookSummaryRow {
        BookSummaryRow {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441172719".to_string(),
            category: Some("Science Fiction".to_string()),
            copy_count,
            active_loans,
        }
    }

    #[test]
    fn available_when_copies_exceed_active_loans() {
        let summary = BookSummary::from(row(3, 2));
        assert_eq!(summary.available_copies, 1);
        assert!(summary.available);
    }

    #[test]
    fn not_available_when_all_copies_on_loan() {
        let summary = BookSummary::from(row(2, 2));
        assert_eq!(summary.available_copies, 0);
        assert!(!summary.available);
    }

    #[test]
    fn copy_count_edited_below_active_loans_reports_negative_not_error() {
        let summary = BookSummary::from(row(1, 3));
        assert_eq!(summary.available_copies, -2);
        assert!(!summary.available);
    }

    #[test]
    fn create_book_rejects_negative_copy_count() {
        let request = CreateBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441172719".to_string(),
            category: None,
            copy_count: -1,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_book_rejects_empty_isbn() {
        let request = CreateBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: String::new(),
            category: None,
            copy_count: 1,
        };
        assert!(request.validate().is_err());
    }
}
