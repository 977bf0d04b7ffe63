//! One round of play: the IN_PROGRESS -> DONE state machine.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use super::geo::{distance, Position};
use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    InProgress,
    Done,
}

/// How the player ended the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndType {
    Arrived,
    GiveUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Success,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub player_id: i64,
    pub place_id: i64,
    pub start_position: Position,
    pub status: GameStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
}

/// What [`Game::finish`] decided about the round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finish {
    pub outcome: OutcomeKind,
    /// Distance from the end position to the destination, in kilometers
    pub distance_to_destination_km: f64,
    /// The player claimed arrival but was outside the arrival threshold.
    pub arrival_rejected: bool,
}

impl Game {
    /// Fails with `Forbidden` unless `player_id` owns this game.
    pub fn ensure_owned_by(&self, player_id: i64) -> Result<(), DomainError> {
        if self.player_id != player_id {
            return Err(DomainError::forbidden(format!(
                "game {} does not belong to player {player_id}",
                self.id
            )));
        }
        Ok(())
    }

    pub fn ensure_in_progress(&self) -> Result<(), DomainError> {
        match self.status {
            GameStatus::InProgress => Ok(()),
            GameStatus::Done => Err(DomainError::conflict(
                ConflictKind::GameAlreadyFinished,
                format!("game {} is already finished", self.id),
            )),
        }
    }

    /// Terminate the round and classify it.
    ///
    /// The transition to DONE happens for every end type; a claimed arrival
    /// outside `arrival_threshold_km` is classified FAIL and flagged in
    /// [`Finish::arrival_rejected`] so the caller can report it after the
    /// transition is stored.
    pub fn finish(
        &mut self,
        end_type: EndType,
        end_position: Position,
        destination: Position,
        arrival_threshold_km: f64,
        ended_at: OffsetDateTime,
    ) -> Result<Finish, DomainError> {
        self.ensure_in_progress()?;

        let d = distance(end_position, destination);
        let outcome = classify(end_type, d, arrival_threshold_km);

        self.status = GameStatus::Done;
        self.ended_at = Some(ended_at);

        Ok(Finish {
            outcome,
            distance_to_destination_km: d,
            arrival_rejected: end_type == EndType::Arrived && outcome == OutcomeKind::Fail,
        })
    }

    /// Elapsed time between start and end; `None` while in progress.
    pub fn play_time(&self) -> Option<Duration> {
        self.ended_at.map(|end| end - self.started_at)
    }
}

/// SUCCESS iff the player claimed arrival within the threshold (inclusive).
pub fn classify(end_type: EndType, distance_km: f64, arrival_threshold_km: f64) -> OutcomeKind {
    match end_type {
        EndType::Arrived if distance_km <= arrival_threshold_km => OutcomeKind::Success,
        EndType::Arrived | EndType::GiveUp => OutcomeKind::Fail,
    }
}
