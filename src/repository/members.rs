//! Members repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, UpdateMember},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Sqlite>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Member> {
        self.get_opt(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Get member by ID, returning None when absent
    pub async fn get_opt(&self, id: i64) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    /// Check whether a username is already taken
    pub async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE username = ?)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Look up a member by plaintext credentials
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE username = ? AND password = ?",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }

    /// List all members ordered by surname, then name
    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let members =
            sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY surname ASC, name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(members)
    }

    /// Keyword search over name, surname, username, phone, email and address
    pub async fn search(&self, keyword: &str) -> AppResult<Vec<Member>> {
        let pattern = format!("%{}%", keyword);
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT * FROM members
             WHERE name         LIKE ?
                OR surname      LIKE ?
                OR username     LIKE ?
                OR phone        LIKE ?
                OR email        LIKE ?
                OR home_address LIKE ?
             ORDER BY surname ASC, name ASC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    /// Create a new member
    pub async fn create(&self, member: &CreateMember) -> AppResult<Member> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO members (name, surname, username, password, phone, email, home_address)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&member.name)
        .bind(&member.surname)
        .bind(&member.username)
        .bind(&member.password)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(&member.home_address)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update a member (full-field update)
    pub async fn update(&self, id: i64, member: &UpdateMember) -> AppResult<Member> {
        let result = sqlx::query(
            r#"
            UPDATE members
               SET name = ?,
                   surname = ?,
                   username = ?,
                   password = ?,
                   phone = ?,
                   email = ?,
                   home_address = ?
             WHERE id = ?
            "#,
        )
        .bind(&member.name)
        .bind(&member.surname)
        .bind(&member.username)
        .bind(&member.password)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(&member.home_address)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete a member. Loans referencing it are left in place; loan views
    /// fall back to a placeholder label for the missing member.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member with id {} not found", id)));
        }

        Ok(())
    }

    /// Count all members
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
