//! User records and the on-disk store document.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::services::provider::ProviderIdentity;

/// Per-user state persisted in the store document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    /// Level IDs the user has hearted (insertion order, no duplicates)
    pub hearted: Vec<String>,
    /// Level IDs queued to play later (insertion order, no duplicates)
    pub queue: Vec<String>,
    /// Client-supplied profile fields; replaced wholesale on update
    pub profile: serde_json::Map<String, serde_json::Value>,
    /// Roblox user ID, stored as a string (also the document key)
    #[serde(rename = "robloxId")]
    pub roblox_id: String,
}

impl UserRecord {
    /// Build the default record for a freshly seen identity: empty
    /// hearted/queue and a profile derived from the Roblox account.
    pub fn new_for(identity: &ProviderIdentity) -> Self {
        let user_id = identity.id.to_string();

        let mut profile = serde_json::Map::new();
        profile.insert(
            "name".to_string(),
            serde_json::Value::String(identity.username.clone()),
        );
        profile.insert(
            "avatar".to_string(),
            serde_json::Value::String(format!(
                "https://www.roblox.com/headshot-thumbnail/image?userId={}&width=150&height=150&format=png",
                user_id
            )),
        );

        Self {
            hearted: Vec::new(),
            queue: Vec::new(),
            profile,
            roblox_id: user_id,
        }
    }
}

/// The whole persisted document: every user record, keyed by Roblox ID.
///
/// Loaded and saved as a unit; there are no partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub users: HashMap<String, UserRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_shape() {
        let identity = ProviderIdentity {
            id: 123456,
            username: "builderman".to_string(),
        };

        let record = UserRecord::new_for(&identity);

        assert!(record.hearted.is_empty());
        assert!(record.queue.is_empty());
        assert_eq!(record.roblox_id, "123456");
        assert_eq!(
            record.profile.get("name"),
            Some(&serde_json::Value::String("builderman".to_string()))
        );
        let avatar = record.profile.get("avatar").unwrap().as_str().unwrap();
        assert!(avatar.contains("userId=123456"));
    }

    #[test]
    fn test_store_document_wire_shape() {
        // Matches the original data.json layout:
        // { "users": { "<id>": { hearted, queue, profile, robloxId } } }
        let json = serde_json::json!({
            "users": {
                "42": {
                    "hearted": ["100"],
                    "queue": [],
                    "profile": { "name": "someone" },
                    "robloxId": "42"
                }
            }
        });

        let doc: StoreDocument = serde_json::from_value(json).unwrap();
        let record = doc.users.get("42").unwrap();
        assert_eq!(record.hearted, vec!["100"]);
        assert_eq!(record.roblox_id, "42");

        let round = serde_json::to_value(&doc).unwrap();
        assert!(round["users"]["42"]["robloxId"].is_string());
    }

    #[test]
    fn test_empty_document_parses() {
        let doc: StoreDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.users.is_empty());
    }
}
