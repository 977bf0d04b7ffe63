//! Persisted results and the read models derived from them.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use super::game::{Game, OutcomeKind};
use super::geo::distance;
use super::place::Place;
use super::score::Score;

/// Immutable outcome of one finished game; at most one per game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub id: i64,
    pub game_id: i64,
    pub outcome: OutcomeKind,
    pub score: Score,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A finished game joined with its result and destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub game_id: i64,
    pub place_id: i64,
    pub outcome: OutcomeKind,
    pub score: Score,
    pub play_time_seconds: i64,
    /// Start position to destination, in kilometers
    pub route_km: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ended_at: OffsetDateTime,
    #[serde(skip)]
    pub recorded_at: OffsetDateTime,
}

impl GameRecord {
    /// `None` for a game that was never finished.
    pub fn assemble(game: &Game, place: &Place, result: &GameResult) -> Option<Self> {
        let ended_at = game.ended_at?;
        Some(Self {
            game_id: game.id,
            place_id: place.id,
            outcome: result.outcome,
            score: result.score,
            play_time_seconds: (ended_at - game.started_at).whole_seconds().max(0),
            route_km: distance(game.start_position, place.position),
            started_at: game.started_at,
            ended_at,
            recorded_at: result.created_at,
        })
    }

    pub fn play_time(&self) -> Duration {
        Duration::seconds(self.play_time_seconds)
    }
}

/// Newest result first; ties broken by descending game id.
pub fn sort_newest_first(records: &mut [GameRecord]) {
    records.sort_by(|a, b| {
        b.recorded_at
            .cmp(&a.recorded_at)
            .then_with(|| b.game_id.cmp(&a.game_id))
    });
}

/// Aggregate over a player's finished games.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistic {
    pub game_count: u64,
    pub success_count: u64,
    pub fail_count: u64,
    pub total_play_time_seconds: i64,
    pub total_route_km: f64,
}

impl Statistic {
    pub fn of(records: &[GameRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.game_count += 1;
            match r.outcome {
                OutcomeKind::Success => acc.success_count += 1,
                OutcomeKind::Fail => acc.fail_count += 1,
            }
            acc.total_play_time_seconds += r.play_time_seconds;
            acc.total_route_km += r.route_km;
            acc
        })
    }
}
