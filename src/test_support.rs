//! Shared fixtures for in-crate tests: an in-memory SQLite database with the
//! schema applied, plus seed helpers for the common entities.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::models::book::{Book, CreateBook};
use crate::models::member::{CreateMember, Member};
use crate::repository::Repository;

/// In-memory database with migrations applied. A single connection keeps the
/// memory database alive for the whole test.
pub async fn test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

pub async fn test_repository() -> Repository {
    Repository::new(test_pool().await)
}

pub async fn seed_book(
    repo: &Repository,
    title: &str,
    author: &str,
    isbn: &str,
    copy_count: i64,
) -> Book {
    repo.books
        .create(&CreateBook {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            category: Some("Fiction".to_string()),
            copy_count,
        })
        .await
        .expect("failed to seed book")
}

pub async fn seed_book_in_category(
    repo: &Repository,
    title: &str,
    author: &str,
    isbn: &str,
    category: Option<&str>,
) -> Book {
    repo.books
        .create(&CreateBook {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            category: category.map(str::to_string),
            copy_count: 10,
        })
        .await
        .expect("failed to seed book")
}

pub async fn seed_member(repo: &Repository, username: &str) -> Member {
    repo.members
        .create(&CreateMember {
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            username: username.to_string(),
            password: "secret".to_string(),
            phone: "555-0100".to_string(),
            email: format!("{}@example.org", username),
            home_address: None,
        })
        .await
        .expect("failed to seed member")
}
