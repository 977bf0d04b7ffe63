pub mod app_state;
pub mod player_locks;
