//! Fixtures for service-level integration tests.

use waymark::config::db::{DbKind, DbProfile};
use waymark::config::game::GameSettings;
use waymark::db::require_db;
use waymark::domain::geo::Position;
use waymark::domain::place::Place;
use waymark::domain::player::Player;
use waymark::infra::state::build_state;
use waymark::repos::places;
use waymark::services::players::PlayerService;
use waymark::state::app_state::AppState;

/// Seeded recommender, default radii, fresh in-memory database.
pub async fn test_state() -> AppState {
    build_state()
        .with_db(DbProfile::Test, DbKind::SqliteMemory)
        .with_settings(GameSettings::default())
        .with_recommender_seed(7)
        .build()
        .await
        .expect("build in-memory test state")
}

pub fn pos(latitude: f64, longitude: f64) -> Position {
    Position::new(latitude, longitude).expect("valid test position")
}

pub async fn seed_player(state: &AppState, nickname: &str) -> Player {
    PlayerService::new(state.clone())
        .register_player(nickname)
        .await
        .expect("register player")
}

/// Insert a place directly, skipping the proximity guard.
pub async fn seed_place(state: &AppState, owner_id: i64, latitude: f64, longitude: f64) -> Place {
    let db = require_db(state).expect("state has db");
    places::create_place(
        db,
        &format!("place {latitude},{longitude}"),
        "seeded",
        pos(latitude, longitude),
        owner_id,
    )
    .await
    .expect("seed place")
}
