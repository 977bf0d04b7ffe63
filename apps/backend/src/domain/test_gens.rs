// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::geo::Position;

/// Any valid coordinate pair, already rounded to storage precision.
pub fn position() -> impl Strategy<Value = Position> {
    (-90.0f64..=90.0, -180.0f64..=180.0)
        .prop_map(|(lat, lng)| Position::new(lat, lng).expect("generated in range"))
}

/// A position within a few kilometers of Seoul city hall.
pub fn seoul_position() -> impl Strategy<Value = Position> {
    (37.53f64..=37.60, 126.94f64..=127.02)
        .prop_map(|(lat, lng)| Position::new(lat, lng).expect("generated in range"))
}

pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}
