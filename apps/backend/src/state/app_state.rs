use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::player_locks::PlayerLocks;
use crate::config::game::GameSettings;
use crate::domain::recommend::Recommender;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    pub settings: GameSettings,
    pub recommender: Arc<Recommender>,
    /// Serializes create/end for the same player
    pub player_locks: PlayerLocks,
}

impl AppState {
    pub fn new(db: DatabaseConnection, settings: GameSettings, recommender: Recommender) -> Self {
        Self {
            db: Some(db),
            settings,
            recommender: Arc::new(recommender),
            player_locks: PlayerLocks::default(),
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn without_db(settings: GameSettings) -> Self {
        Self {
            db: None,
            settings,
            recommender: Arc::new(Recommender::default()),
            player_locks: PlayerLocks::default(),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
