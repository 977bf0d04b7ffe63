//! Registered destinations.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::geo::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub position: Position,
    /// Player who registered the place
    pub registered_player_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
