pub mod game_results;
pub mod games;
pub mod places;
pub mod players;

pub use game_results::Entity as GameResults;
pub use game_results::Model as GameResult;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use places::Entity as Places;
pub use places::Model as Place;
pub use players::Entity as Players;
pub use players::Model as Player;
