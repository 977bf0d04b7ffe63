//! Distance thresholds of the game rules.

use std::env;

use tracing::debug;

use crate::error::AppError;

pub const DEFAULT_RECOMMEND_RADIUS_KM: f64 = 1.0;
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 0.02;
pub const DEFAULT_ARRIVAL_THRESHOLD_KM: f64 = 0.05;

/// Radii used by recommendation, the proximity guard and arrival checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSettings {
    /// Candidates for a new game lie within this distance of the start
    pub recommend_radius_km: f64,
    /// A new place strictly closer than this to an existing one is rejected
    pub nearby_radius_km: f64,
    /// A claimed arrival counts when within this distance (inclusive)
    pub arrival_threshold_km: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            recommend_radius_km: DEFAULT_RECOMMEND_RADIUS_KM,
            nearby_radius_km: DEFAULT_NEARBY_RADIUS_KM,
            arrival_threshold_km: DEFAULT_ARRIVAL_THRESHOLD_KM,
        }
    }
}

impl GameSettings {
    /// Defaults overridden by `WAYMARK_*_KM` environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let settings = Self {
            recommend_radius_km: km_var("WAYMARK_RECOMMEND_RADIUS_KM", DEFAULT_RECOMMEND_RADIUS_KM)?,
            nearby_radius_km: km_var("WAYMARK_NEARBY_RADIUS_KM", DEFAULT_NEARBY_RADIUS_KM)?,
            arrival_threshold_km: km_var(
                "WAYMARK_ARRIVAL_THRESHOLD_KM",
                DEFAULT_ARRIVAL_THRESHOLD_KM,
            )?,
        };
        debug!(?settings, "game settings loaded");
        Ok(settings)
    }
}

fn km_var(name: &str, default: f64) -> Result<f64, AppError> {
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(default),
        Err(e) => return Err(AppError::from(e)),
    };
    match raw.trim().parse::<f64>() {
        Ok(km) if km.is_finite() && km > 0.0 => Ok(km),
        _ => Err(AppError::config(format!(
            "{name} must be a positive number of kilometers, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;
    use crate::errors::ErrorCode;

    fn clear() {
        env::remove_var("WAYMARK_RECOMMEND_RADIUS_KM");
        env::remove_var("WAYMARK_NEARBY_RADIUS_KM");
        env::remove_var("WAYMARK_ARRIVAL_THRESHOLD_KM");
    }

    #[test]
    #[serial]
    fn defaults_without_env() {
        clear();
        assert_eq!(GameSettings::from_env().unwrap(), GameSettings::default());
    }

    #[test]
    #[serial]
    fn env_overrides_defaults() {
        clear();
        env::set_var("WAYMARK_RECOMMEND_RADIUS_KM", "2.5");
        env::set_var("WAYMARK_ARRIVAL_THRESHOLD_KM", " 0.1 ");

        let settings = GameSettings::from_env().unwrap();
        assert_eq!(settings.recommend_radius_km, 2.5);
        assert_eq!(settings.nearby_radius_km, DEFAULT_NEARBY_RADIUS_KM);
        assert_eq!(settings.arrival_threshold_km, 0.1);
        clear();
    }

    #[test]
    #[serial]
    fn rejects_non_positive_or_garbage() {
        for bad in ["0", "-1", "NaN", "inf", "one"] {
            clear();
            env::set_var("WAYMARK_NEARBY_RADIUS_KM", bad);
            let err = GameSettings::from_env().unwrap_err();
            assert_eq!(err.code(), ErrorCode::ConfigError);
            assert!(err.detail().contains("WAYMARK_NEARBY_RADIUS_KM"));
        }
        clear();
    }
}
