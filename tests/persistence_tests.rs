// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence tests: state must survive a process restart, which here
//! means a fresh `UserStore` over the same file.

use std::sync::Arc;

use levelhub::services::ProviderIdentity;
use levelhub::store::{JsonFileBackend, UserStore};

fn identity() -> ProviderIdentity {
    ProviderIdentity {
        id: 42,
        username: "builderman".to_string(),
    }
}

#[tokio::test]
async fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    {
        let store = UserStore::new(Arc::new(JsonFileBackend::new(path.clone())));
        store.heart(&identity(), "100").await.unwrap();
        store.queue(&identity(), "200").await.unwrap();
    }

    // "Restart": new store over the same file
    let store = UserStore::new(Arc::new(JsonFileBackend::new(path)));
    let record = store.get_or_create(&identity()).await.unwrap();

    assert_eq!(record.hearted, vec!["100"]);
    assert_eq!(record.queue, vec!["200"]);
    assert_eq!(record.roblox_id, "42");
}

#[tokio::test]
async fn test_on_disk_shape_matches_contract() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let store = UserStore::new(Arc::new(JsonFileBackend::new(path.clone())));
    store.heart(&identity(), "100").await.unwrap();

    let raw = tokio::fs::read(&path).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();

    // { "users": { "<id>": { hearted, queue, profile, robloxId } } }
    let user = &json["users"]["42"];
    assert_eq!(user["robloxId"], "42");
    assert_eq!(user["hearted"], serde_json::json!(["100"]));
    assert_eq!(user["queue"], serde_json::json!([]));
    assert!(user["profile"].is_object());
}

#[tokio::test]
async fn test_fresh_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = UserStore::new(Arc::new(JsonFileBackend::new(dir.path().join("data.json"))));

    let record = store.get_or_create(&identity()).await.unwrap();
    assert!(record.hearted.is_empty());
    assert!(record.queue.is_empty());
}
