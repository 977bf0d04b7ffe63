#![allow(dead_code)]

pub mod factory;

#[allow(unused_imports)]
pub use factory::{pos, seed_place, seed_player, test_state};
