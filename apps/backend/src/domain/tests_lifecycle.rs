use time::{Duration, OffsetDateTime};

use crate::domain::game::{classify, EndType, Game, GameStatus, OutcomeKind};
use crate::domain::geo::Position;
use crate::errors::domain::{ConflictKind, DomainError};

const ARRIVAL_KM: f64 = 0.05;

fn pos(lat: f64, lng: f64) -> Position {
    Position::new(lat, lng).unwrap()
}

fn in_progress_game() -> Game {
    Game {
        id: 11,
        player_id: 3,
        place_id: 5,
        start_position: pos(37.5, 127.0),
        status: GameStatus::InProgress,
        started_at: OffsetDateTime::UNIX_EPOCH,
        ended_at: None,
    }
}

#[test]
fn arrived_at_destination_is_success() {
    let mut game = in_progress_game();
    let dest = pos(37.5045, 127.0);
    let ended_at = OffsetDateTime::UNIX_EPOCH + Duration::minutes(4);

    let finish = game
        .finish(EndType::Arrived, dest, dest, ARRIVAL_KM, ended_at)
        .unwrap();

    assert_eq!(finish.outcome, OutcomeKind::Success);
    assert!(!finish.arrival_rejected);
    assert_eq!(game.status, GameStatus::Done);
    assert_eq!(game.ended_at, Some(ended_at));
    assert_eq!(game.play_time(), Some(Duration::minutes(4)));
}

#[test]
fn arrived_too_far_is_fail_and_flagged() {
    let mut game = in_progress_game();
    // ~0.11 km north of the destination
    let finish = game
        .finish(
            EndType::Arrived,
            pos(37.506, 127.0),
            pos(37.505, 127.0),
            ARRIVAL_KM,
            OffsetDateTime::UNIX_EPOCH,
        )
        .unwrap();

    assert_eq!(finish.outcome, OutcomeKind::Fail);
    assert!(finish.arrival_rejected);
    assert_eq!(game.status, GameStatus::Done);
}

#[test]
fn give_up_is_fail_even_on_the_spot() {
    let mut game = in_progress_game();
    let dest = pos(37.505, 127.0);
    let finish = game
        .finish(EndType::GiveUp, dest, dest, ARRIVAL_KM, OffsetDateTime::UNIX_EPOCH)
        .unwrap();

    assert_eq!(finish.outcome, OutcomeKind::Fail);
    assert!(!finish.arrival_rejected);
}

#[test]
fn finishing_twice_is_already_finished() {
    let mut game = in_progress_game();
    let dest = pos(37.505, 127.0);
    game.finish(EndType::GiveUp, dest, dest, ARRIVAL_KM, OffsetDateTime::UNIX_EPOCH)
        .unwrap();

    let err = game
        .finish(EndType::Arrived, dest, dest, ARRIVAL_KM, OffsetDateTime::UNIX_EPOCH)
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::GameAlreadyFinished, _)
    ));
}

#[test]
fn arrival_threshold_is_inclusive() {
    assert_eq!(classify(EndType::Arrived, 0.05, ARRIVAL_KM), OutcomeKind::Success);
    assert_eq!(classify(EndType::Arrived, 0.0501, ARRIVAL_KM), OutcomeKind::Fail);
    assert_eq!(classify(EndType::GiveUp, 0.0, ARRIVAL_KM), OutcomeKind::Fail);
}

#[test]
fn ownership_is_checked() {
    let game = in_progress_game();
    assert!(game.ensure_owned_by(3).is_ok());
    assert!(matches!(
        game.ensure_owned_by(4),
        Err(DomainError::Forbidden(_))
    ));
}
