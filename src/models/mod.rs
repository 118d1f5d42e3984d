// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod level;
pub mod user;

pub use level::LevelSummary;
pub use user::{StoreDocument, UserRecord};
