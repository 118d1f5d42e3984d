// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Roblox API client.
//!
//! Handles:
//! - OAuth2 authorization-code exchange
//! - Authenticated-user lookup
//! - Public game metadata for the configured universe

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::LevelSummary;
use crate::services::provider::{IdentityProvider, ProviderIdentity};

/// Roblox API client.
#[derive(Clone)]
pub struct RobloxClient {
    http: reqwest::Client,
    oauth_base_url: String,
    users_base_url: String,
    games_base_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    universe_id: String,
}

impl RobloxClient {
    /// Create a new Roblox client with OAuth credentials.
    pub fn new(
        client_id: String,
        client_secret: String,
        redirect_uri: String,
        universe_id: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            oauth_base_url: "https://apis.roblox.com/oauth/v1".to_string(),
            users_base_url: "https://users.roblox.com/v1".to_string(),
            games_base_url: "https://games.roblox.com/v1".to_string(),
            client_id,
            client_secret,
            redirect_uri,
            universe_id,
        }
    }

    /// Override the API base URLs (tests only).
    #[cfg(test)]
    fn with_base_urls(mut self, oauth: &str, users: &str, games: &str) -> Self {
        self.oauth_base_url = oauth.to_string();
        self.users_base_url = users.to_string();
        self.games_base_url = games.to_string();
        self
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RobloxApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::RobloxApi(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for RobloxClient {
    fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}/authorize?client_id={}&redirect_uri={}&response_type=code&scope=openid%20profile&state={}",
            self.oauth_base_url,
            self.client_id,
            urlencoding::encode(&self.redirect_uri),
            state
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        let url = format!("{}/token", self.oauth_base_url);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::RobloxApi(format!("Token exchange request failed: {}", e)))?;

        let token: TokenResponse = self.check_response_json(response).await?;
        Ok(token.access_token)
    }

    async fn fetch_identity(&self, access_token: &str) -> Result<ProviderIdentity, AppError> {
        let url = format!("{}/users/authenticated", self.users_base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::RobloxApi(e.to_string()))?;

        let user: AuthenticatedUser = self.check_response_json(response).await?;
        Ok(ProviderIdentity {
            id: user.id,
            username: user.name,
        })
    }

    async fn fetch_levels(&self) -> Result<Vec<LevelSummary>, AppError> {
        let url = format!("{}/games", self.games_base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("universeIds", self.universe_id.as_str())])
            .send()
            .await
            .map_err(|e| AppError::RobloxApi(e.to_string()))?;

        let games: GamesResponse = self.check_response_json(response).await?;

        Ok(games
            .data
            .into_iter()
            .map(|game| LevelSummary {
                id: game.place_id.to_string(),
                name: game.name,
                visits: game.visits,
                playing: game.playing,
                hearts: game.favorite_count,
            })
            .collect())
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// `users/authenticated` response.
#[derive(Debug, Clone, Deserialize)]
struct AuthenticatedUser {
    id: u64,
    name: String,
}

/// `games` endpoint response wrapper.
#[derive(Debug, Clone, Deserialize)]
struct GamesResponse {
    #[serde(default)]
    data: Vec<GameDetails>,
}

/// Per-game metadata from the games endpoint.
#[derive(Debug, Clone, Deserialize)]
struct GameDetails {
    #[serde(rename = "placeId")]
    place_id: u64,
    name: String,
    #[serde(default)]
    visits: u64,
    #[serde(default)]
    playing: u64,
    #[serde(rename = "favoriteCount", default)]
    favorite_count: u64,
}
