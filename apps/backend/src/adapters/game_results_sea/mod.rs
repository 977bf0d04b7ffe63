//! SeaORM adapter for game results - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::game_results::{self, Outcome};

#[derive(Debug, Clone)]
pub struct GameResultCreate {
    pub game_id: i64,
    pub outcome: Outcome,
    pub score: i64,
}

/// Fails with a unique violation on `ux_game_results_game_id` if the game
/// already has a result.
pub async fn create_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameResultCreate,
) -> Result<game_results::Model, sea_orm::DbErr> {
    let result = game_results::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        outcome: Set(dto.outcome),
        score: Set(dto.score),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    result.insert(conn).await
}

pub async fn find_by_game_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<game_results::Model>, sea_orm::DbErr> {
    game_results::Entity::find()
        .filter(game_results::Column::GameId.eq(game_id))
        .one(conn)
        .await
}

pub async fn find_by_game_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: &[i64],
) -> Result<Vec<game_results::Model>, sea_orm::DbErr> {
    if game_ids.is_empty() {
        return Ok(Vec::new());
    }
    game_results::Entity::find()
        .filter(game_results::Column::GameId.is_in(game_ids.iter().copied()))
        .all(conn)
        .await
}
