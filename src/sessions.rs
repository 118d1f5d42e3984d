// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-side session storage.
//!
//! Sessions live only in memory for the process lifetime and are never
//! persisted to the store document. The browser holds a signed token naming
//! the user ID; the entry here is what makes that token usable.

use dashmap::DashMap;
use std::sync::Arc;

/// Authenticated session data, keyed by Roblox user ID.
#[derive(Debug, Clone)]
pub struct Session {
    /// Provider access token obtained at login. Held for the session's
    /// lifetime; there is no refresh handling.
    pub access_token: String,
    pub username: String,
}

/// Shared in-memory session map.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<u64, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user_id: u64, session: Session) {
        self.sessions.insert(user_id, session);
    }

    pub fn get(&self, user_id: u64) -> Option<Session> {
        self.sessions.get(&user_id).map(|s| s.value().clone())
    }

    pub fn remove(&self, user_id: u64) {
        self.sessions.remove(&user_id);
    }
}
