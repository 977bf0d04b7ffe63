//! Player domain service.

use tracing::info;

use crate::db::require_db;
use crate::domain::player::Player;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::players;
use crate::state::app_state::AppState;

pub const MAX_NICKNAME_CHARS: usize = 20;

/// Player domain service.
pub struct PlayerService {
    state: AppState,
}

impl PlayerService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Active player by id; `PLAYER_NOT_FOUND` for unknown or deleted players.
    pub async fn find_player(&self, player_id: i64) -> Result<Player, AppError> {
        let conn = require_db(&self.state)?;
        Ok(players::require_player(conn, player_id).await?)
    }

    pub async fn register_player(&self, nickname: &str) -> Result<Player, AppError> {
        let nickname = nickname.trim();
        if nickname.is_empty() || nickname.chars().count() > MAX_NICKNAME_CHARS {
            return Err(DomainError::validation(
                ValidationKind::Other("Nickname".into()),
                format!("nickname must be 1 to {MAX_NICKNAME_CHARS} characters"),
            )
            .into());
        }
        let conn = require_db(&self.state)?;
        let player = players::create_player(conn, nickname).await?;
        info!(player_id = player.id, "player registered");
        Ok(player)
    }
}
