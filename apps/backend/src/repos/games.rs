//! Game repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use super::stored_position;
use crate::adapters::games_sea::{self as games_adapter, GameCreate, GameFinish};
use crate::domain::game::{Game, GameStatus};
use crate::domain::geo::Position;
use crate::entities::games;
use crate::errors::domain::{DomainError, NotFoundKind};

impl From<GameStatus> for games::GameStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::InProgress => games::GameStatus::InProgress,
            GameStatus::Done => games::GameStatus::Done,
        }
    }
}

impl From<games::GameStatus> for GameStatus {
    fn from(status: games::GameStatus) -> Self {
        match status {
            games::GameStatus::InProgress => GameStatus::InProgress,
            games::GameStatus::Done => GameStatus::Done,
        }
    }
}

fn to_domain(model: games::Model) -> Result<Game, DomainError> {
    let start_position = stored_position(model.start_latitude, model.start_longitude, "game")?;
    Ok(Game {
        id: model.id,
        player_id: model.player_id,
        place_id: model.place_id,
        start_position,
        status: model.status.into(),
        started_at: model.started_at,
        ended_at: model.ended_at,
    })
}

fn to_domain_all(models: Vec<games::Model>) -> Result<Vec<Game>, DomainError> {
    models.into_iter().map(to_domain).collect()
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    games_adapter::find_by_id(conn, game_id)
        .await?
        .map(to_domain)
        .transpose()
}

/// Find game by ID or return `NotFound(Game)`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    })
}

/// IN_PROGRESS games of the player; at most one while the index holds.
pub async fn find_active_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<Game>, DomainError> {
    find_by_player_and_status(conn, player_id, GameStatus::InProgress).await
}

pub async fn find_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<Game>, DomainError> {
    to_domain_all(games_adapter::find_by_player(conn, player_id).await?)
}

pub async fn find_by_player_and_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    status: GameStatus,
) -> Result<Vec<Game>, DomainError> {
    to_domain_all(
        games_adapter::find_by_player_and_status(conn, player_id, status.into()).await?,
    )
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    place_id: i64,
    start: Position,
) -> Result<Game, DomainError> {
    let dto = GameCreate::new(player_id, place_id).starting_at(start.latitude(), start.longitude());
    to_domain(games_adapter::create_game(conn, dto).await?)
}

/// Store the DONE transition. `Conflict(GameAlreadyFinished)` if another
/// writer got there first.
pub async fn mark_done<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    ended_at: OffsetDateTime,
) -> Result<Game, DomainError> {
    let model = games_adapter::mark_done(
        conn,
        GameFinish {
            id: game_id,
            ended_at,
        },
    )
    .await
    .map_err(|e| match e {
        sea_orm::DbErr::RecordNotFound(_) => {
            DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
        }
        other => DomainError::from(other),
    })?;
    to_domain(model)
}
