//! Property tests for great-circle distance (pure domain, no DB).
//!
//! Properties tested:
//! - distance is symmetric
//! - distance from a point to itself is zero
//! - distance is non-negative and bounded by half the circumference
//! - the bounding box never excludes a point within the radius

use proptest::prelude::*;

use crate::domain::geo::{distance, BoundingBox, EARTH_RADIUS_KM};
use crate::domain::test_gens;

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    #[test]
    fn prop_distance_is_symmetric(p in test_gens::position(), q in test_gens::position()) {
        let pq = distance(p, q);
        let qp = distance(q, p);
        prop_assert!((pq - qp).abs() <= 1e-9, "{pq} != {qp}");
    }

    #[test]
    fn prop_distance_to_self_is_zero(p in test_gens::position()) {
        prop_assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn prop_distance_is_bounded(p in test_gens::position(), q in test_gens::position()) {
        let d = distance(p, q);
        prop_assert!(d >= 0.0);
        prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
    }

    #[test]
    fn prop_bounding_box_keeps_points_in_radius(
        center in test_gens::seoul_position(),
        p in test_gens::seoul_position(),
        radius_km in 0.01f64..5.0,
    ) {
        if distance(center, p) <= radius_km {
            prop_assert!(BoundingBox::around(center, radius_km).contains(p));
        }
    }
}
