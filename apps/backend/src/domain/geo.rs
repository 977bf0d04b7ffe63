//! Coordinates and great-circle distance.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Mean earth radius used by every distance in the game, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers spanned by one degree of latitude on the sphere model.
const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * PI / 180.0;

/// Decimal places kept on every coordinate.
pub const COORDINATE_SCALE: i32 = 6;

/// A latitude/longitude pair in decimal degrees.
///
/// Coordinates are rounded to [`COORDINATE_SCALE`] decimal places on
/// construction so that equality is by stored value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::validation(
                ValidationKind::InvalidPosition,
                format!("latitude {latitude} is outside [-90, 90]"),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::validation(
                ValidationKind::InvalidPosition,
                format!("longitude {longitude} is outside [-180, 180]"),
            ));
        }
        Ok(Self {
            latitude: round_to_scale(latitude),
            longitude: round_to_scale(longitude),
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_to(&self, other: &Position) -> f64 {
        distance(*self, *other)
    }
}

fn round_to_scale(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_SCALE);
    let rounded = (value * factor).round() / factor;
    // Normalize -0.0 so equality and hashing of stored values agree.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Haversine distance between two positions in kilometers.
pub fn distance(a: Position, b: Position) -> f64 {
    if a == b {
        return 0.0;
    }
    let to_rad = |deg: f64| deg * PI / 180.0;

    let dlat = to_rad(b.latitude - a.latitude);
    let dlng = to_rad(b.longitude - a.longitude);

    let h = (dlat / 2.0).sin().powi(2)
        + to_rad(a.latitude).cos() * to_rad(b.latitude).cos() * (dlng / 2.0).sin().powi(2);

    // Clamp guards asin against h drifting past 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Latitude/longitude rectangle that contains every point within a radius.
///
/// Used as a cheap store-side prefilter; callers still apply [`distance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    /// `None` when the box touches a pole or wraps the antimeridian; the
    /// longitude filter is skipped in that case.
    pub longitude_range: Option<(f64, f64)>,
}

impl BoundingBox {
    pub fn around(center: Position, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE;
        let min_latitude = center.latitude - lat_delta;
        let max_latitude = center.latitude + lat_delta;

        let longitude_range = if min_latitude <= -90.0 || max_latitude >= 90.0 {
            None
        } else {
            // The widest longitude span is at the latitude edge nearest a pole.
            let widest = min_latitude.abs().max(max_latitude.abs());
            let lng_delta = radius_km / (KM_PER_DEGREE * widest.to_radians().cos());
            let min_longitude = center.longitude - lng_delta;
            let max_longitude = center.longitude + lng_delta;
            if min_longitude < -180.0 || max_longitude > 180.0 {
                None
            } else {
                Some((min_longitude, max_longitude))
            }
        };

        Self {
            min_latitude: min_latitude.max(-90.0),
            max_latitude: max_latitude.min(90.0),
            longitude_range,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        let lat_ok = (self.min_latitude..=self.max_latitude).contains(&position.latitude);
        let lng_ok = match self.longitude_range {
            Some((min, max)) => (min..=max).contains(&position.longitude),
            None => true,
        };
        lat_ok && lng_ok
    }
}
