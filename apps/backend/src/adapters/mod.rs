//! Adapters for external dependencies.

pub mod game_results_sea;
pub mod games_sea;
pub mod places_sea;
pub mod players_sea;
