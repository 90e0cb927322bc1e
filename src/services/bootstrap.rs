//! First-run bootstrap: ensure at least one administrative identity exists.

use crate::{error::AppResult, repository::Repository};

pub const DEFAULT_LIBRARIAN_USERNAME: &str = "admin";
pub const DEFAULT_LIBRARIAN_PASSWORD: &str = "admin123";

/// Seed the default librarian account when absent. Idempotent; invoked once
/// from the process entry point after migrations.
pub async fn ensure_default_librarian(repository: &Repository) -> AppResult<()> {
    if repository
        .librarians
        .exists_by_username(DEFAULT_LIBRARIAN_USERNAME)
        .await?
    {
        return Ok(());
    }

    repository
        .librarians
        .create(DEFAULT_LIBRARIAN_USERNAME, DEFAULT_LIBRARIAN_PASSWORD)
        .await?;

    tracing::info!("Default librarian account created: {}", DEFAULT_LIBRARIAN_USERNAME);

    Ok(())
}
