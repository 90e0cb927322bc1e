//! Member roster and credential checks

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::librarian::Librarian,
    models::member::{CreateMember, Member, UpdateMember},
    repository::Repository,
};

#[derive(Clone)]
pub struct DirectoryService {
    repository: Repository,
}

impl DirectoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new member. Usernames are unique among members only; there
    /// is no cross-check against librarian accounts.
    pub async fn register_member(&self, member: CreateMember) -> AppResult<Member> {
        member.validate()?;

        if self
            .repository
            .members
            .exists_by_username(&member.username)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Username {} is already taken",
                member.username
            )));
        }

        let created = self.repository.members.create(&member).await?;
        tracing::info!("Member registered: id={} username={}", created.id, created.username);
        Ok(created)
    }

    /// Get a member by ID
    pub async fn get_member(&self, id: i64) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    /// List members, optionally filtered by keyword
    pub async fn list_members(&self, keyword: Option<&str>) -> AppResult<Vec<Member>> {
        match keyword {
            Some(kw) if !kw.trim().is_empty() => self.repository.members.search(kw.trim()).await,
            _ => self.repository.members.list().await,
        }
    }

    /// Update a member (full-field update)
    pub async fn update_member(&self, id: i64, member: UpdateMember) -> AppResult<Member> {
        member.validate()?;

        let current = self.repository.members.get_by_id(id).await?;
        if member.username != current.username
            && self
                .repository
                .members
                .exists_by_username(&member.username)
                .await?
        {
            return Err(AppError::Conflict(format!(
                "Username {} is already taken",
                member.username
            )));
        }

        self.repository.members.update(id, &member).await
    }

    /// Delete a member. Loans referencing the member stay in the ledger and
    /// resolve to a placeholder label.
    pub async fn delete_member(&self, id: i64) -> AppResult<()> {
        self.repository.members.delete(id).await?;
        tracing::info!("Member deleted: id={}", id);
        Ok(())
    }

    /// Authenticate a member by plaintext credentials
    pub async fn authenticate_member(&self, username: &str, password: &str) -> AppResult<Member> {
        self.repository
            .members
            .find_by_credentials(username, password)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))
    }

    /// Authenticate a librarian by plaintext credentials
    pub async fn authenticate_librarian(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Librarian> {
        self.repository
            .librarians
            .find_by_credentials(username, password)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))
    }
}
