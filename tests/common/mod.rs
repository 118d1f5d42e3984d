// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use std::sync::Arc;

use levelhub::config::Config;
use levelhub::error::AppError;
use levelhub::middleware::auth::create_jwt;
use levelhub::models::LevelSummary;
use levelhub::routes::create_router;
use levelhub::services::{IdentityProvider, ProviderIdentity};
use levelhub::sessions::Session;
use levelhub::store::{MemoryBackend, UserStore};
use levelhub::AppState;

/// Fake identity provider for router-level tests.
///
/// Returns a fixed identity and a configurable level list so tests never
/// touch the network.
pub struct FakeProvider {
    pub identity: ProviderIdentity,
    pub levels: Result<Vec<LevelSummary>, String>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            identity: ProviderIdentity {
                id: 12345678,
                username: "builderman".to_string(),
            },
            levels: Ok(vec![]),
        }
    }
}

impl FakeProvider {
    #[allow(dead_code)]
    pub fn with_levels(levels: Vec<LevelSummary>) -> Self {
        Self {
            levels: Ok(levels),
            ..Self::default()
        }
    }

    #[allow(dead_code)]
    pub fn failing_levels() -> Self {
        Self {
            levels: Err("upstream down".to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://provider.test/authorize?state={}", state)
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        if code == "good_code" {
            Ok("fake_access_token".to_string())
        } else {
            Err(AppError::RobloxApi("invalid code".to_string()))
        }
    }

    async fn fetch_identity(&self, access_token: &str) -> Result<ProviderIdentity, AppError> {
        if access_token == "fake_access_token" {
            Ok(self.identity.clone())
        } else {
            Err(AppError::RobloxApi("bad token".to_string()))
        }
    }

    async fn fetch_levels(&self) -> Result<Vec<LevelSummary>, AppError> {
        match &self.levels {
            Ok(levels) => Ok(levels.clone()),
            Err(msg) => Err(AppError::RobloxApi(msg.clone())),
        }
    }
}

/// Create a test app backed by an in-memory store and a fake provider.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(provider: FakeProvider) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = UserStore::new(Arc::new(MemoryBackend::default()));

    let state = Arc::new(AppState {
        config,
        store,
        provider: Arc::new(provider),
        sessions: levelhub::sessions::SessionStore::new(),
    });

    (create_router(state.clone()), state)
}

/// Log a user in directly: seed the server-side session and mint the
/// matching session token.
#[allow(dead_code)]
pub fn login(state: &Arc<AppState>, user_id: u64, username: &str) -> String {
    state.sessions.insert(
        user_id,
        Session {
            access_token: "fake_access_token".to_string(),
            username: username.to_string(),
        },
    );

    create_jwt(user_id, &state.config.session_signing_key).expect("Failed to create JWT")
}
