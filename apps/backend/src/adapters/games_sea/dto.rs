//! DTOs for games_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new IN_PROGRESS game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub player_id: i64,
    pub place_id: i64,
    pub start_latitude: f64,
    pub start_longitude: f64,
}

impl GameCreate {
    pub fn new(player_id: i64, place_id: i64) -> Self {
        Self {
            player_id,
            place_id,
            start_latitude: 0.0,
            start_longitude: 0.0,
        }
    }

    pub fn starting_at(mut self, latitude: f64, longitude: f64) -> Self {
        self.start_latitude = latitude;
        self.start_longitude = longitude;
        self
    }
}

/// DTO for the IN_PROGRESS -> DONE transition.
#[derive(Debug, Clone, Copy)]
pub struct GameFinish {
    pub id: i64,
    pub ended_at: OffsetDateTime,
}
