//! Librarian model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Librarian model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Librarian {
    pub id: i64,
    pub username: String,
    /// Stored as plaintext; credential hardening is out of scope
    #[serde(skip_serializing)]
    pub password: String,
}
