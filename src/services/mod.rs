// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod provider;
pub mod roblox;

pub use provider::{IdentityProvider, ProviderIdentity};
pub use roblox::RobloxClient;
