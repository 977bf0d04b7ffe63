//! Game coordination: starting, ending and querying rounds.
//!
//! Create and end run under the player's lock and inside one transaction.
//! Ending a game stores the DONE transition first and settles score and
//! result inside a savepoint, so a failed settlement leaves the game DONE.

use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseTransaction, TransactionTrait};
use time::OffsetDateTime;
use tracing::{info, warn};

use super::places::{recommend, SeaPlaceCatalog};
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::domain::game::{EndType, Finish, Game, GameStatus, OutcomeKind};
use crate::domain::geo::{distance, Position};
use crate::domain::recommend::Recommender;
use crate::domain::record::{sort_newest_first, GameRecord, GameResult, Statistic};
use crate::domain::scoring::{score_round, RoundFacts};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::repos::{game_results, games, places, players};
use crate::state::app_state::AppState;

/// What the end transaction produced; the settlement may have failed on its own.
struct EndReport {
    game: Game,
    finish: Finish,
    settlement: Result<GameResult, AppError>,
}

/// Game domain service.
pub struct GameService {
    state: AppState,
}

impl GameService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Start a round for `player_id` at `position` with a recommended destination.
    pub async fn create_game(&self, player_id: i64, position: Position) -> Result<Game, AppError> {
        let _guard = self.state.player_locks.lock(player_id).await;

        let recommender = Arc::clone(&self.state.recommender);
        let radius_km = self.state.settings.recommend_radius_km;

        let result = with_txn(&self.state, move |txn| {
            Box::pin(async move {
                start_game(txn, &recommender, radius_km, player_id, position).await
            })
        })
        .await;

        match &result {
            Ok(game) => info!(
                player_id,
                game_id = game.id,
                place_id = game.place_id,
                "game started"
            ),
            Err(e) if e.is_domain() => {
                warn!(player_id, code = %e.code(), "game start rejected")
            }
            Err(_) => {}
        }
        result
    }

    /// Finish `game_id` on behalf of `player_id` and record its result.
    ///
    /// A claimed arrival outside the threshold still stores DONE and a FAIL
    /// result, then reports `GAME_NOT_ARRIVAL`.
    pub async fn end_game(
        &self,
        player_id: i64,
        game_id: i64,
        end_type: EndType,
        end_position: Position,
    ) -> Result<GameResult, AppError> {
        let _guard = self.state.player_locks.lock(player_id).await;

        let threshold_km = self.state.settings.arrival_threshold_km;

        let report = with_txn(&self.state, move |txn| {
            Box::pin(async move {
                finish_game(txn, player_id, game_id, end_type, end_position, threshold_km).await
            })
        })
        .await
        .inspect_err(|e| {
            if e.is_domain() {
                warn!(player_id, game_id, code = %e.code(), "game end rejected");
            }
        })?;

        let result = report.settlement.inspect_err(|e| {
            warn!(
                player_id,
                game_id,
                code = %e.code(),
                "game is DONE but its result could not be recorded"
            );
        })?;

        if report.finish.arrival_rejected {
            warn!(
                player_id,
                game_id,
                distance_km = report.finish.distance_to_destination_km,
                "arrival claimed too far from the destination"
            );
            return Err(DomainError::validation(
                ValidationKind::GameNotArrival,
                format!(
                    "game {} ended {:.3} km from the destination",
                    report.game.id, report.finish.distance_to_destination_km
                ),
            )
            .into());
        }

        info!(
            player_id,
            game_id,
            outcome = ?result.outcome,
            score = result.score.value(),
            "game finished"
        );
        Ok(result)
    }

    /// A game owned by `player_id`.
    pub async fn find_game_by_id(&self, player_id: i64, game_id: i64) -> Result<Game, AppError> {
        let conn = require_db(&self.state)?;
        let game = games::require_game(conn, game_id).await?;
        let player = players::require_player(conn, player_id).await?;
        game.ensure_owned_by(player.id)?;
        Ok(game)
    }

    pub async fn find_games_by_status(
        &self,
        player_id: i64,
        status: GameStatus,
    ) -> Result<Vec<Game>, AppError> {
        let conn = require_db(&self.state)?;
        let player = players::require_player(conn, player_id).await?;
        Ok(games::find_by_player_and_status(conn, player.id, status).await?)
    }

    pub async fn find_all_games(&self, player_id: i64) -> Result<Vec<Game>, AppError> {
        let conn = require_db(&self.state)?;
        let player = players::require_player(conn, player_id).await?;
        Ok(games::find_by_player(conn, player.id).await?)
    }

    /// The recorded result of `game_id`; `GAME_RESULT_NOT_EXIST` until one is stored.
    pub async fn find_result(&self, game_id: i64) -> Result<GameResult, AppError> {
        let conn = require_db(&self.state)?;
        let result = game_results::find_by_game_id(conn, game_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::GameResult,
                    format!("Game {game_id} has no result"),
                )
            })?;
        Ok(result)
    }

    /// Finished games of the player with their results, newest result first.
    pub async fn find_all_results(&self, player_id: i64) -> Result<Vec<GameRecord>, AppError> {
        let conn = require_db(&self.state)?;
        let player = players::require_player(conn, player_id).await?;
        let finished = games::find_by_player_and_status(conn, player.id, GameStatus::Done).await?;
        let mut records = load_records(conn, &finished).await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    pub async fn find_statistic(&self, player_id: i64) -> Result<Statistic, AppError> {
        let conn = require_db(&self.state)?;
        let player = players::require_player(conn, player_id).await?;
        let finished = games::find_by_player_and_status(conn, player.id, GameStatus::Done).await?;
        let records = load_records(conn, &finished).await?;
        Ok(Statistic::of(&records))
    }
}

async fn start_game(
    txn: &DatabaseTransaction,
    recommender: &Recommender,
    radius_km: f64,
    player_id: i64,
    position: Position,
) -> Result<Game, AppError> {
    let player = players::require_player(txn, player_id).await?;

    if let Some(active) = games::find_active_by_player(txn, player.id).await?.first() {
        return Err(AppError::conflict(
            ErrorCode::AlreadyInProgress,
            format!("game {} is already in progress", active.id),
        ));
    }

    let place = recommend(&SeaPlaceCatalog::new(txn), recommender, position, radius_km)
        .await
        .map_err(|e| match e {
            DomainError::NotFound(NotFoundKind::Place, detail) => {
                DomainError::not_found(NotFoundKind::Destination, detail)
            }
            other => other,
        })?;

    // The partial unique index reports a lost race as AlreadyInProgress.
    Ok(games::create_game(txn, player.id, place.id, position).await?)
}

async fn finish_game(
    txn: &DatabaseTransaction,
    player_id: i64,
    game_id: i64,
    end_type: EndType,
    end_position: Position,
    threshold_km: f64,
) -> Result<EndReport, AppError> {
    let mut game = games::require_game(txn, game_id).await?;
    let player = players::require_player(txn, player_id).await?;
    game.ensure_owned_by(player.id)?;

    let place = places::find_by_id(txn, game.place_id).await?.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("game {} references missing place {}", game.id, game.place_id),
        )
    })?;

    let ended_at = OffsetDateTime::now_utc();
    let finish = game.finish(end_type, end_position, place.position, threshold_km, ended_at)?;
    let game = games::mark_done(txn, game.id, ended_at).await?;

    let facts = RoundFacts {
        route_km: distance(game.start_position, place.position),
        elapsed: game.play_time().unwrap_or_default(),
    };
    let settlement = settle(txn, &game, finish.outcome, facts).await;

    Ok(EndReport {
        game,
        finish,
        settlement,
    })
}

/// Score, accumulate and record inside a savepoint of `txn`.
async fn settle(
    txn: &DatabaseTransaction,
    game: &Game,
    outcome: OutcomeKind,
    facts: RoundFacts,
) -> Result<GameResult, AppError> {
    let savepoint = txn.begin().await?;
    match record_result(&savepoint, game, outcome, &facts).await {
        Ok(result) => {
            savepoint.commit().await?;
            Ok(result)
        }
        Err(err) => {
            if let Err(rollback_err) = savepoint.rollback().await {
                warn!(game_id = game.id, error = %rollback_err, "savepoint rollback failed");
            }
            Err(err)
        }
    }
}

async fn record_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
    outcome: OutcomeKind,
    facts: &RoundFacts,
) -> Result<GameResult, AppError> {
    let score = score_round(outcome, facts);
    players::add_score(conn, game.player_id, score).await?;
    Ok(game_results::create_result(conn, game.id, outcome, score).await?)
}

/// Join finished games with their results and destinations.
///
/// A DONE game without a result is skipped.
async fn load_records<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    finished: &[Game],
) -> Result<Vec<GameRecord>, AppError> {
    let game_ids: Vec<i64> = finished.iter().map(|g| g.id).collect();
    let results: HashMap<i64, GameResult> = game_results::find_by_game_ids(conn, &game_ids)
        .await?
        .into_iter()
        .map(|r| (r.game_id, r))
        .collect();

    let mut place_ids: Vec<i64> = finished.iter().map(|g| g.place_id).collect();
    place_ids.sort_unstable();
    place_ids.dedup();
    let destinations: HashMap<i64, _> = places::find_by_ids(conn, &place_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let mut records = Vec::with_capacity(results.len());
    for game in finished {
        let Some(result) = results.get(&game.id) else {
            continue;
        };
        let place = destinations.get(&game.place_id).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("game {} references missing place {}", game.id, game.place_id),
            )
        })?;
        if let Some(record) = GameRecord::assemble(game, place, result) {
            records.push(record);
        }
    }
    Ok(records)
}
