//! Player aggregate as seen by the game core.

use serde::{Deserialize, Serialize};

use super::score::Score;

/// Lifecycle flag replacing row-level soft delete. Store lookups only ever
/// return `Active` players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Active,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub nickname: String,
    pub total_score: Score,
    pub status: PlayerStatus,
}
