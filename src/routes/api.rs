// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: user state and the level list.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{LevelSummary, UserRecord};
use crate::services::provider::ProviderIdentity;
use crate::AppState;

/// Routes that require authentication.
/// The auth middleware is applied in routes/mod.rs.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user", get(get_user))
        .route("/api/heart/{id}", post(heart_level))
        .route("/api/queue/{id}", post(queue_level))
        .route("/api/profile", post(update_profile))
}

/// Public routes (no session required).
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/levels", get(get_levels))
}

/// Acknowledgment body for mutations.
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl AuthUser {
    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity {
            id: self.user_id,
            username: self.username.clone(),
        }
    }
}

/// Get the caller's record, creating it on first sight.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserRecord>> {
    let record = state.store.get_or_create(&user.identity()).await?;
    Ok(Json(record))
}

/// List levels for the configured universe.
///
/// An empty upstream result is an empty list, not an error.
async fn get_levels(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LevelSummary>>> {
    let levels = state.provider.fetch_levels().await?;
    Ok(Json(levels))
}

/// Heart a level. Duplicate hearts are acknowledged but not recorded.
async fn heart_level(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(level_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let added = state.store.heart(&user.identity(), &level_id).await?;

    tracing::debug!(user_id = user.user_id, level_id = %level_id, added, "Heart");
    Ok(Json(SuccessResponse { success: true }))
}

/// Queue a level to play later. Duplicates are acknowledged but not recorded.
async fn queue_level(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(level_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let added = state.store.queue(&user.identity(), &level_id).await?;

    tracing::debug!(user_id = user.user_id, level_id = %level_id, added, "Queue");
    Ok(Json(SuccessResponse { success: true }))
}

/// Replace the caller's profile with the request body.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(profile): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<Json<SuccessResponse>> {
    state.store.set_profile(&user.identity(), profile).await?;
    Ok(Json(SuccessResponse { success: true }))
}
