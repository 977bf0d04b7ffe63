use time::Duration;

use crate::domain::game::OutcomeKind;
use crate::domain::score::Score;
use crate::domain::scoring::{score_round, RoundFacts};

fn facts(route_km: f64, elapsed_minutes: i64) -> RoundFacts {
    RoundFacts {
        route_km,
        elapsed: Duration::minutes(elapsed_minutes),
    }
}

#[test]
fn fail_is_always_zero() {
    for round in [facts(0.0, 0), facts(0.8, 3), facts(12.0, 600)] {
        assert_eq!(score_round(OutcomeKind::Fail, &round), Score::ZERO);
    }
}

#[test]
fn success_adds_distance_points_and_time_bonus() {
    // 0.5 km: 50 distance points, expected 8 minutes, walked in 3 -> bonus 5
    assert_eq!(score_round(OutcomeKind::Success, &facts(0.5, 3)), Score::new(55));
}

#[test]
fn time_bonus_never_goes_negative() {
    // 0.5 km walked in an hour still scores the distance points
    assert_eq!(score_round(OutcomeKind::Success, &facts(0.5, 60)), Score::new(50));
}

#[test]
fn time_bonus_is_capped() {
    // 10 km: expected 150 minutes, finished instantly -> bonus capped at 50
    assert_eq!(score_round(OutcomeKind::Success, &facts(10.0, 0)), Score::new(1050));
}

#[test]
fn elapsed_time_is_floored_to_minutes() {
    let round = RoundFacts {
        route_km: 1.0,
        elapsed: Duration::seconds(10 * 60 + 59),
    };
    // expected 15 minutes, 10 full minutes elapsed -> bonus 5
    assert_eq!(score_round(OutcomeKind::Success, &round), Score::new(105));
}

#[test]
fn success_is_deterministic() {
    let round = facts(0.734, 7);
    assert_eq!(
        score_round(OutcomeKind::Success, &round),
        score_round(OutcomeKind::Success, &round)
    );
}
