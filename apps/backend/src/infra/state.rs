use crate::config::db::{DbKind, DbProfile};
use crate::config::game::GameSettings;
use crate::domain::recommend::Recommender;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and binaries)
pub struct StateBuilder {
    settings: Option<GameSettings>,
    db: Option<(DbProfile, DbKind)>,
    recommender_seed: Option<u64>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            settings: None,
            db: None,
            recommender_seed: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile, kind: DbKind) -> Self {
        self.db = Some((profile, kind));
        self
    }

    /// Explicit settings; otherwise they are read from the environment.
    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Fixed recommender seed for reproducible destination choice.
    pub fn with_recommender_seed(mut self, seed: u64) -> Self {
        self.recommender_seed = Some(seed);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let settings = match self.settings {
            Some(settings) => settings,
            None => GameSettings::from_env()?,
        };
        if let Some((profile, kind)) = self.db {
            // single entrypoint: build + migrate
            let conn = bootstrap_db(profile, kind).await?;
            Ok(AppState::new(
                conn,
                settings,
                Recommender::new(self.recommender_seed),
            ))
        } else {
            Ok(AppState::without_db(settings))
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
