//! Domain layer: pure game logic types and helpers.

pub mod game;
pub mod geo;
pub mod place;
pub mod player;
pub mod recommend;
pub mod record;
pub mod score;
pub mod scoring;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_lifecycle;
#[cfg(test)]
mod tests_props_geo;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use game::{EndType, Finish, Game, GameStatus, OutcomeKind};
pub use geo::{distance, BoundingBox, Position};
pub use place::Place;
pub use player::{Player, PlayerStatus};
pub use recommend::Recommender;
pub use record::{GameRecord, GameResult, Statistic};
pub use score::Score;
pub use scoring::{policy_for, score_round, RoundFacts, ScorePolicy};
