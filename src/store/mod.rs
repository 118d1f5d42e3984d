// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer for per-user state.
//!
//! The whole store is one JSON document, loaded and saved as a unit. The
//! backend is a trait so tests can run against an in-memory fake, and
//! `UserStore` serializes every read-modify-write behind one async mutex so
//! concurrent requests cannot overwrite each other's saves.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::{StoreDocument, UserRecord};
use crate::services::provider::ProviderIdentity;

pub use file::JsonFileBackend;
pub use memory::MemoryBackend;

/// Whole-document storage backend.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Load the store document, producing an empty one if none exists yet.
    async fn load(&self) -> Result<StoreDocument, AppError>;

    /// Overwrite stable storage with the given document.
    async fn save(&self, doc: &StoreDocument) -> Result<(), AppError>;
}

struct Inner {
    backend: Arc<dyn StoreBackend>,
    // Serializes load-modify-save sequences; without it two concurrent
    // mutations would race and the last save would win.
    write_lock: Mutex<()>,
}

/// Typed operations over the store document.
///
/// All lazy record creation goes through `ensure_user`, so every handler
/// shares one default-record shape.
#[derive(Clone)]
pub struct UserStore {
    inner: Arc<Inner>,
}

impl UserStore {
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Return the caller's record, creating and persisting the default
    /// record on first sight of this identity.
    pub async fn get_or_create(&self, identity: &ProviderIdentity) -> Result<UserRecord, AppError> {
        let _guard = self.inner.write_lock.lock().await;

        let mut doc = self.inner.backend.load().await?;
        let user_id = identity.id.to_string();

        if let Some(record) = doc.users.get(&user_id) {
            return Ok(record.clone());
        }

        let record = ensure_user(&mut doc, identity).clone();
        self.inner.backend.save(&doc).await?;

        tracing::info!(user_id = %user_id, "Created user record");
        Ok(record)
    }

    /// Add a level to the user's hearted set. Returns false if it was
    /// already present (nothing is written in that case).
    pub async fn heart(
        &self,
        identity: &ProviderIdentity,
        level_id: &str,
    ) -> Result<bool, AppError> {
        self.add_to_list(identity, level_id, |record| &mut record.hearted)
            .await
    }

    /// Add a level to the user's play queue. Returns false if it was
    /// already present.
    pub async fn queue(
        &self,
        identity: &ProviderIdentity,
        level_id: &str,
    ) -> Result<bool, AppError> {
        self.add_to_list(identity, level_id, |record| &mut record.queue)
            .await
    }

    /// Replace the user's profile object wholesale (not a merge).
    pub async fn set_profile(
        &self,
        identity: &ProviderIdentity,
        profile: serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), AppError> {
        let _guard = self.inner.write_lock.lock().await;

        let mut doc = self.inner.backend.load().await?;
        ensure_user(&mut doc, identity).profile = profile;
        self.inner.backend.save(&doc).await
    }

    async fn add_to_list(
        &self,
        identity: &ProviderIdentity,
        level_id: &str,
        list: fn(&mut UserRecord) -> &mut Vec<String>,
    ) -> Result<bool, AppError> {
        let _guard = self.inner.write_lock.lock().await;

        let mut doc = self.inner.backend.load().await?;
        let ids = list(ensure_user(&mut doc, identity));

        if ids.iter().any(|id| id == level_id) {
            return Ok(false);
        }

        ids.push(level_id.to_string());
        self.inner.backend.save(&doc).await?;
        Ok(true)
    }
}

/// Locate the caller's record, lazily creating the default one.
fn ensure_user<'a>(doc: &'a mut StoreDocument, identity: &ProviderIdentity) -> &'a mut UserRecord {
    doc.users
        .entry(identity.id.to_string())
        .or_insert_with(|| UserRecord::new_for(identity))
}
