//! Repository functions for the domain layer.

pub mod game_results;
pub mod games;
pub mod places;
pub mod players;

use crate::domain::geo::Position;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Rebuild a stored coordinate pair; a row outside the valid range is corrupt.
pub(crate) fn stored_position(
    latitude: f64,
    longitude: f64,
    row: &str,
) -> Result<Position, DomainError> {
    Position::new(latitude, longitude).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("{row} has out-of-range coordinates ({latitude}, {longitude})"),
        )
    })
}
