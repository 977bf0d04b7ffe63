use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Players {
    Table,
    Id,
    Nickname,
    TotalScore,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Places {
    Table,
    Id,
    Name,
    Description,
    Latitude,
    Longitude,
    RegisteredPlayerId,
    CreatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    PlayerId,
    PlaceId,
    StartLatitude,
    StartLongitude,
    Status,
    StartedAt,
    EndedAt,
}

#[derive(Iden)]
enum GameResults {
    Table,
    Id,
    GameId,
    Outcome,
    Score,
    CreatedAt,
}

/// Partial unique index backing the one-active-game-per-player rule.
///
/// Postgres and SQLite both accept the same statement, so it is issued raw
/// instead of through the index builder.
const CREATE_ACTIVE_GAME_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS ux_games_active_player \
     ON games (player_id) WHERE status = 'IN_PROGRESS'";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres | sea_orm::DatabaseBackend::Sqlite => {}
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Players::Nickname).text().not_null())
                    .col(
                        ColumnDef::new(Players::TotalScore)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Players::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // places
        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Places::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Places::Name).text().not_null())
                    .col(ColumnDef::new(Places::Description).text().not_null())
                    .col(ColumnDef::new(Places::Latitude).double().not_null())
                    .col(ColumnDef::new(Places::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(Places::RegisteredPlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Places::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_places_registered_player_id")
                            .from(Places::Table, Places::RegisteredPlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Bounding-box prefilter for radius queries
        manager
            .create_index(
                Index::create()
                    .name("ix_places_lat_lng")
                    .table(Places::Table)
                    .col(Places::Latitude)
                    .col(Places::Longitude)
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::PlayerId).big_integer().not_null())
                    .col(ColumnDef::new(Games::PlaceId).big_integer().not_null())
                    .col(ColumnDef::new(Games::StartLatitude).double().not_null())
                    .col(ColumnDef::new(Games::StartLongitude).double().not_null())
                    .col(
                        ColumnDef::new(Games::Status)
                            .string_len(16)
                            .not_null()
                            .default("IN_PROGRESS"),
                    )
                    .col(
                        ColumnDef::new(Games::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_player_id")
                            .from(Games::Table, Games::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_place_id")
                            .from(Games::Table, Games::PlaceId)
                            .to(Places::Table, Places::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_player_status")
                    .table(Games::Table)
                    .col(Games::PlayerId)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(CREATE_ACTIVE_GAME_INDEX)
            .await?;

        // game_results
        manager
            .create_table(
                Table::create()
                    .table(GameResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameResults::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(GameResults::GameId).big_integer().not_null())
                    .col(ColumnDef::new(GameResults::Outcome).string_len(16).not_null())
                    .col(ColumnDef::new(GameResults::Score).big_integer().not_null())
                    .col(
                        ColumnDef::new(GameResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_results_game_id")
                            .from(GameResults::Table, GameResults::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One result per game
        manager
            .create_index(
                Index::create()
                    .name("ux_game_results_game_id")
                    .table(GameResults::Table)
                    .col(GameResults::GameId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_game_results_game_id")
                    .table(GameResults::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(GameResults::Table).to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS ux_games_active_player")
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ix_games_player_status")
                    .table(Games::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_places_lat_lng")
                    .table(Places::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Places::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;

        Ok(())
    }
}
