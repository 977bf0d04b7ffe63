//! SeaORM adapter for game repository - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::games::{self, GameStatus};
use crate::infra::db_errors::GAME_NOT_IN_PROGRESS;

pub mod dto;

pub use dto::{GameCreate, GameFinish};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Find game by ID or return RecordNotFound error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

pub async fn find_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::PlayerId.eq(player_id))
        .order_by_asc(games::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_player_and_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    status: GameStatus,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::PlayerId.eq(player_id))
        .filter(games::Column::Status.eq(status))
        .order_by_asc(games::Column::Id)
        .all(conn)
        .await
}

/// Inserting a second IN_PROGRESS game for a player trips the partial
/// unique index `ux_games_active_player`.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let game = games::ActiveModel {
        id: NotSet,
        player_id: Set(dto.player_id),
        place_id: Set(dto.place_id),
        start_latitude: Set(dto.start_latitude),
        start_longitude: Set(dto.start_longitude),
        status: Set(GameStatus::InProgress),
        started_at: Set(time::OffsetDateTime::now_utc()),
        ended_at: Set(None),
    };
    game.insert(conn).await
}

/// Conditional IN_PROGRESS -> DONE update, then refetch.
///
/// Zero affected rows on an existing game yields a `DbErr::Custom` carrying
/// the [`GAME_NOT_IN_PROGRESS`] prefix.
pub async fn mark_done<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameFinish,
) -> Result<games::Model, sea_orm::DbErr> {
    let result = games::Entity::update_many()
        .col_expr(games::Column::Status, Expr::val(GameStatus::Done).into())
        .col_expr(games::Column::EndedAt, Expr::val(Some(dto.ended_at)).into())
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::Status.eq(GameStatus::InProgress))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(_) => Err(sea_orm::DbErr::Custom(format!(
                "{GAME_NOT_IN_PROGRESS}{}",
                dto.id
            ))),
            None => Err(sea_orm::DbErr::RecordNotFound("Game not found".to_string())),
        };
    }

    require_game(conn, dto.id).await
}
