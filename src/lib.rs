// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Levelhub: Roblox-backed level hub with hearts, a play queue, and profiles.
//!
//! This crate provides the backend API: OAuth2 login against Roblox, public
//! game metadata for one universe, and per-user state persisted to a single
//! JSON document.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod sessions;
pub mod store;

use std::sync::Arc;

use config::Config;
use services::IdentityProvider;
use sessions::SessionStore;
use store::UserStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: UserStore,
    pub provider: Arc<dyn IdentityProvider>,
    pub sessions: SessionStore,
}
