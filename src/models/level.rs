//! Level projection returned by `/api/levels`.

use serde::{Deserialize, Serialize};

/// Small projection of a Roblox game for the level list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelSummary {
    /// Place ID as a string
    pub id: String,
    pub name: String,
    pub visits: u64,
    /// Concurrent player count
    pub playing: u64,
    /// Favorite count
    pub hearts: u64,
}
