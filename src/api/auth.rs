//! Authentication endpoints.
//!
//! Credentials are stored and compared as plaintext; hardening is explicitly
//! out of scope for this system. A successful login returns the identity
//! record (passwords are never serialized).

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{librarian::Librarian, member::{CreateMember, Member}},
};

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Register a new member (self-registration)
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member registered", body = Member),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    let member = state.services.directory.register_member(request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// Log in as a member
#[utoipa::path(
    post,
    path = "/auth/login/member",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated member", body = Member),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login_member(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<Member>> {
    let member = state
        .services
        .directory
        .authenticate_member(&request.username, &request.password)
        .await?;
    Ok(Json(member))
}

/// Log in as a librarian
#[utoipa::path(
    post,
    path = "/auth/login/librarian",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated librarian", body = Librarian),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login_librarian(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<Librarian>> {
    let librarian = state
        .services
        .directory
        .authenticate_librarian(&request.username, &request.password)
        .await?;
    Ok(Json(librarian))
}
