//! Member roster endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::member::{CreateMember, Member, UpdateMember},
};

/// Keyword search query
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Keyword matched against name, surname, username, phone, email, address
    pub q: Option<String>,
}

/// Favorite category response
#[derive(Serialize, ToSchema)]
pub struct FavoriteCategoryResponse {
    /// Most borrowed category, absent when the member has no loans
    pub favorite_category: Option<String>,
}

/// List members, optionally filtered by keyword
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    params(SearchQuery),
    responses(
        (status = 200, description = "List of members", body = Vec<Member>)
    )
)]
pub async fn list_members(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Member>>> {
    let members = state
        .services
        .directory
        .list_members(query.q.as_deref())
        .await?;
    Ok(Json(members))
}

/// Get member details
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member details", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Member>> {
    let member = state.services.directory.get_member(id).await?;
    Ok(Json(member))
}

/// Create a new member (librarian action; same rules as self-registration)
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_member(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    let created = state.services.directory.register_member(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing member
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn update_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMember>,
) -> AppResult<Json<Member>> {
    let updated = state.services.directory.update_member(id, request).await?;
    Ok(Json(updated))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.directory.delete_member(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a member's favorite (most borrowed) category
#[utoipa::path(
    get,
    path = "/members/{id}/favorite-category",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Favorite category", body = FavoriteCategoryResponse),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_favorite_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FavoriteCategoryResponse>> {
    let favorite_category = state.services.stats.member_favorite_category(id).await?;
    Ok(Json(FavoriteCategoryResponse { favorite_category }))
}
