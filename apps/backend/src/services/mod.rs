//! Services: orchestration of repos and domain logic per request.

pub mod games;
pub mod places;
pub mod players;
