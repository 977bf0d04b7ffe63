//! Game result repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::game_results_sea::{self as results_adapter, GameResultCreate};
use crate::domain::game::OutcomeKind;
use crate::domain::record::GameResult;
use crate::domain::score::Score;
use crate::entities::game_results::{self, Outcome};
use crate::errors::domain::{DomainError, InfraErrorKind};

impl From<OutcomeKind> for Outcome {
    fn from(kind: OutcomeKind) -> Self {
        match kind {
            OutcomeKind::Success => Outcome::Success,
            OutcomeKind::Fail => Outcome::Fail,
        }
    }
}

impl From<Outcome> for OutcomeKind {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => OutcomeKind::Success,
            Outcome::Fail => OutcomeKind::Fail,
        }
    }
}

fn to_domain(model: game_results::Model) -> Result<GameResult, DomainError> {
    let score = u64::try_from(model.score).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("game result {} has negative score {}", model.id, model.score),
        )
    })?;
    Ok(GameResult {
        id: model.id,
        game_id: model.game_id,
        outcome: model.outcome.into(),
        score: Score::new(score),
        created_at: model.created_at,
    })
}

/// `Conflict(ResultAlreadyRecorded)` if the game already has a result.
pub async fn create_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    outcome: OutcomeKind,
    score: Score,
) -> Result<GameResult, DomainError> {
    let score = i64::try_from(score.value()).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::Other("ScoreOverflow".into()),
            format!("score {score} does not fit the result column"),
        )
    })?;
    let row = results_adapter::create_result(
        conn,
        GameResultCreate {
            game_id,
            outcome: outcome.into(),
            score,
        },
    )
    .await?;
    to_domain(row)
}

pub async fn find_by_game_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<GameResult>, DomainError> {
    results_adapter::find_by_game_id(conn, game_id)
        .await?
        .map(to_domain)
        .transpose()
}

pub async fn find_by_game_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: &[i64],
) -> Result<Vec<GameResult>, DomainError> {
    results_adapter::find_by_game_ids(conn, game_ids)
        .await?
        .into_iter()
        .map(to_domain)
        .collect()
}
