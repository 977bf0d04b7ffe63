//! SeaORM adapter for player repository - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::players::{self, PlayerStatus};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Only ACTIVE rows are visible.
pub async fn find_active_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id)
        .filter(players::Column::Status.eq(PlayerStatus::Active))
        .one(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    nickname: &str,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let player = players::ActiveModel {
        id: NotSet,
        nickname: Set(nickname.to_string()),
        total_score: Set(0),
        status: Set(PlayerStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
    };
    player.insert(conn).await
}

/// Increment `total_score` in place so concurrent writers never lose points.
pub async fn add_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    delta: i64,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = players::Entity::update_many()
        .col_expr(
            players::Column::TotalScore,
            Expr::col(players::Column::TotalScore).add(delta),
        )
        .col_expr(players::Column::UpdatedAt, Expr::val(now).into())
        .filter(players::Column::Id.eq(player_id))
        .filter(players::Column::Status.eq(PlayerStatus::Active))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "Player {player_id} not found"
        )));
    }
    Ok(())
}

pub async fn mark_deleted<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    players::Entity::update_many()
        .col_expr(players::Column::Status, Expr::val(PlayerStatus::Deleted).into())
        .col_expr(players::Column::UpdatedAt, Expr::val(now).into())
        .filter(players::Column::Id.eq(player_id))
        .exec(conn)
        .await?;
    Ok(())
}
