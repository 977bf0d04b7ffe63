//! Player repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea as players_adapter;
use crate::domain::player::{Player, PlayerStatus};
use crate::domain::score::Score;
use crate::entities::players;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            nickname: model.nickname,
            total_score: Score::new(model.total_score.max(0) as u64),
            status: match model.status {
                players::PlayerStatus::Active => PlayerStatus::Active,
                players::PlayerStatus::Deleted => PlayerStatus::Deleted,
            },
        }
    }
}

pub async fn find_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_active_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

/// Active player by id, or `NotFound(Player)`.
pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    find_player(conn, player_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
    })
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    nickname: &str,
) -> Result<Player, DomainError> {
    let player = players_adapter::create_player(conn, nickname).await?;
    Ok(Player::from(player))
}

/// Add `score` to the stored total of an active player.
pub async fn add_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    score: Score,
) -> Result<(), DomainError> {
    let delta = i64::try_from(score.value()).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::Other("ScoreOverflow".into()),
            format!("score {score} does not fit the stored total"),
        )
    })?;
    players_adapter::add_score(conn, player_id, delta)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotFound(_) => DomainError::not_found(
                NotFoundKind::Player,
                format!("Player {player_id} not found"),
            ),
            other => DomainError::from(other),
        })
}

pub async fn mark_deleted<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<(), DomainError> {
    players_adapter::mark_deleted(conn, player_id).await?;
    Ok(())
}
