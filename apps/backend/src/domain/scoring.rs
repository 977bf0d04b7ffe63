//! Score rules per outcome kind.

use time::Duration;

use super::game::OutcomeKind;
use super::score::Score;

/// Expected walking pace used by the time bonus.
pub const MINUTES_PER_KM: f64 = 15.0;

/// Upper bound of the time bonus.
pub const MAX_TIME_BONUS: i64 = 50;

/// Recorded data of a finished round that scoring may depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundFacts {
    /// Start position to destination, in kilometers
    pub route_km: f64,
    pub elapsed: Duration,
}

pub trait ScorePolicy: Send + Sync {
    fn calculate(&self, round: &RoundFacts) -> Score;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FailScorePolicy;

impl ScorePolicy for FailScorePolicy {
    fn calculate(&self, _round: &RoundFacts) -> Score {
        Score::ZERO
    }
}

/// Distance points plus a bounded bonus for beating the walking pace.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuccessScorePolicy;

impl ScorePolicy for SuccessScorePolicy {
    fn calculate(&self, round: &RoundFacts) -> Score {
        let route_km = round.route_km.max(0.0);
        let distance_points = (route_km * 100.0).round() as u64;

        let expected_minutes = (route_km * MINUTES_PER_KM).round() as i64;
        let elapsed_minutes = round.elapsed.whole_minutes().max(0);
        let time_bonus = (expected_minutes - elapsed_minutes).clamp(0, MAX_TIME_BONUS) as u64;

        Score::new(distance_points).plus(Score::new(time_bonus))
    }
}

static FAIL: FailScorePolicy = FailScorePolicy;
static SUCCESS: SuccessScorePolicy = SuccessScorePolicy;

/// The rule for `outcome`. Every outcome kind has exactly one rule.
pub fn policy_for(outcome: OutcomeKind) -> &'static dyn ScorePolicy {
    match outcome {
        OutcomeKind::Fail => &FAIL,
        OutcomeKind::Success => &SUCCESS,
    }
}

pub fn score_round(outcome: OutcomeKind, round: &RoundFacts) -> Score {
    policy_for(outcome).calculate(round)
}
