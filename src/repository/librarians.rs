//! Librarians repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{error::AppResult, models::librarian::Librarian};

#[derive(Clone)]
pub struct LibrariansRepository {
    pool: Pool<Sqlite>,
}

impl LibrariansRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Check whether a librarian username exists
    pub async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM librarians WHERE username = ?)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Look up a librarian by plaintext credentials
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<Librarian>> {
        let librarian = sqlx::query_as::<_, Librarian>(
            "SELECT * FROM librarians WHERE username = ? AND password = ?",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;
        Ok(librarian)
    }

    /// Insert a librarian account
    pub async fn create(&self, username: &str, password: &str) -> AppResult<Librarian> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO librarians (username, password)
            VALUES (?, ?)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await?;

        Ok(Librarian {
            id,
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}
