// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory backend for tests (no file I/O).

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::StoreDocument;
use crate::store::StoreBackend;

/// Store backend holding the document in memory.
#[derive(Default)]
pub struct MemoryBackend {
    doc: Mutex<StoreDocument>,
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn load(&self) -> Result<StoreDocument, AppError> {
        Ok(self.doc.lock().await.clone())
    }

    async fn save(&self, doc: &StoreDocument) -> Result<(), AppError> {
        *self.doc.lock().await = doc.clone();
        Ok(())
    }
}
