// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider abstraction.
//!
//! All provider-specific OAuth and metadata handling sits behind this trait
//! so handlers never touch Roblox directly and tests can swap in a fake.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::LevelSummary;

/// Stable identity returned by the provider's "authenticated user" endpoint.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    /// Provider-issued numeric user ID
    pub id: u64,
    /// Display name
    pub username: String,
}

/// OAuth2 identity and game-metadata provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Build the authorize-endpoint URL to redirect an unauthenticated
    /// user to, carrying the given opaque `state` parameter.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<String, AppError>;

    /// Fetch the authenticated user's identity with an access token.
    async fn fetch_identity(&self, access_token: &str) -> Result<ProviderIdentity, AppError>;

    /// Fetch public metadata for the configured universe's levels.
    async fn fetch_levels(&self) -> Result<Vec<LevelSummary>, AppError>;
}
