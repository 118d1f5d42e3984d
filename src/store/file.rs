// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON file backend: one pretty-printed document at a fixed path.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::AppError;
use crate::models::StoreDocument;
use crate::store::StoreBackend;

/// Whole-document JSON file storage.
///
/// No append log and no atomic rename; this only needs to survive process
/// restarts, not crashes mid-write.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StoreBackend for JsonFileBackend {
    async fn load(&self) -> Result<StoreDocument, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreDocument::default());
            }
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    async fn save(&self, doc: &StoreDocument) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(doc)
            .map_err(|e| AppError::Storage(format!("Failed to serialize store: {}", e)))?;

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}
