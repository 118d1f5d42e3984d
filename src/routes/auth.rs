// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Roblox OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::sessions::Session;
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Where a failed login lands. No detail beyond the error tag is leaked.
const LOGIN_FAILURE_REDIRECT: &str = "/?error=login_failed";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", get(auth_start))
        .route("/auth/callback", get(auth_callback))
        .route("/auth/logout", get(logout))
}

/// Start OAuth flow - redirect to Roblox authorization.
async fn auth_start(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    let oauth_state = sign_state(timestamp, &state.config.session_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;

    let auth_url = state.provider.authorize_url(&oauth_state);

    tracing::info!(
        client_id = %state.config.roblox_client_id,
        "Starting OAuth flow, redirecting to Roblox"
    );

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code for a token, create the session.
///
/// Any failure aborts the login and redirects to the failure page; nothing
/// is retried and no detail reaches the browser.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, Redirect) {
    match handle_callback(&state, params).await {
        Ok(jwt) => {
            let cookie = session_cookie(jwt);
            (jar.add(cookie), Redirect::temporary("/"))
        }
        Err(e) => {
            tracing::warn!(error = %e, "OAuth callback failed");
            (jar, Redirect::temporary(LOGIN_FAILURE_REDIRECT))
        }
    }
}

async fn handle_callback(state: &Arc<AppState>, params: CallbackParams) -> Result<String> {
    if let Some(error) = params.error {
        return Err(AppError::BadRequest(format!("OAuth error: {}", error)));
    }

    let oauth_state = params
        .state
        .ok_or_else(|| AppError::BadRequest("Missing state parameter".to_string()))?;
    if !verify_state(&oauth_state, &state.config.session_signing_key) {
        return Err(AppError::BadRequest(
            "Invalid or tampered state parameter".to_string(),
        ));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;

    tracing::info!("Exchanging authorization code for token");
    let access_token = state.provider.exchange_code(&code).await?;

    let identity = state.provider.fetch_identity(&access_token).await?;

    tracing::info!(
        user_id = identity.id,
        username = %identity.username,
        "OAuth successful, session created"
    );

    state.sessions.insert(
        identity.id,
        Session {
            access_token,
            username: identity.username,
        },
    );

    create_jwt(identity.id, &state.config.session_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))
}

/// Logout - drop the server-side session and clear the cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    use crate::middleware::auth::Claims;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let key = DecodingKey::from_secret(&state.config.session_signing_key);
        let validation = Validation::new(Algorithm::HS256);

        if let Ok(token_data) = decode::<Claims>(cookie.value(), &key, &validation) {
            if let Ok(user_id) = token_data.claims.sub.parse::<u64>() {
                state.sessions.remove(user_id);
                tracing::info!(user_id, "Logged out");
            }
        }
    }

    let jar = jar.remove(Cookie::from(SESSION_COOKIE));
    (jar, Redirect::temporary("/"))
}

fn session_cookie(jwt: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, jwt))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Sign a timestamp into an opaque OAuth state parameter.
///
/// Format before encoding is "timestamp_hex|signature_hex".
fn sign_state(timestamp: u128, secret: &[u8]) -> std::result::Result<String, hmac::digest::InvalidLength> {
    let payload = format!("{:x}", timestamp);

    let mut mac = HmacSha256::new_from_slice(secret)?;
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    let signed = format!("{}|{}", payload, signature);
    Ok(URL_SAFE_NO_PAD.encode(signed.as_bytes()))
}

/// Verify the HMAC signature on the OAuth state parameter.
fn verify_state(state: &str, secret: &[u8]) -> bool {
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(state) else {
        return false;
    };
    let Ok(state_str) = String::from_utf8(bytes) else {
        return false;
    };

    let parts: Vec<&str> = state_str.splitn(2, '|').collect();
    if parts.len() != 2 {
        return false;
    }

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(parts[0].as_bytes());
    let expected = hex::encode(mac.finalize().into_bytes());

    if parts[1] != expected {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip() {
        let secret = b"secret_key";
        let state = sign_state(1234567890, secret).unwrap();
        assert!(verify_state(&state, secret));
    }

    #[test]
    fn test_state_wrong_secret() {
        let secret = b"secret_key";
        let state = sign_state(1234567890, secret).unwrap();
        assert!(!verify_state(&state, b"wrong_key"));
    }

    #[test]
    fn test_state_tampered_payload() {
        let secret = b"secret_key";
        let state = sign_state(1234567890, secret).unwrap();

        let decoded = URL_SAFE_NO_PAD.decode(&state).unwrap();
        let mut text = String::from_utf8(decoded).unwrap();
        text.replace_range(0..1, "0");
        let tampered = URL_SAFE_NO_PAD.encode(text.as_bytes());

        // Either the payload actually changed (signature mismatch) or the
        // replacement was a no-op; only accept the original.
        if tampered != state {
            assert!(!verify_state(&tampered, secret));
        }
    }

    #[test]
    fn test_state_malformed() {
        assert!(!verify_state("not-base64!!!", b"secret_key"));
        let no_separator = URL_SAFE_NO_PAD.encode("deadbeef");
        assert!(!verify_state(&no_separator, b"secret_key"));
    }
}
