//! Simulation configuration
//!
//! Process-wide constants for one run. Loaded from JSON or taken from the
//! defaults below, then validated once before any session is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the platform generator
    pub seed: u64,

    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Actor ===
    pub actor_width: f32,
    pub actor_height: f32,

    // === Platforms ===
    /// Platform width as a multiple of actor width
    pub platform_width_factor: f32,
    pub platform_height: f32,
    /// Highest allowed platform top
    pub min_y: f32,
    /// Space kept free below the lowest platform
    pub bottom_margin: f32,
    /// y of the platform before the first one
    pub start_y: f32,
    /// Vertical step between neighbours as a multiple of actor height
    pub y_step_factor: f32,
    /// Gap band as multiples of actor width, `[min, max)`
    pub gap_min_factor: f32,
    pub gap_max_factor: f32,

    // === Kinematics (per tick) ===
    pub jump_velocity: f32,
    pub gravity: f32,
    pub fast_fall: f32,
    pub scroll_speed: f32,
    /// Speed used only to size the platform set
    pub nominal_speed: f32,

    // === Run control ===
    /// Delay before the stopwatch restarts after a reset
    pub reset_delay_ms: u64,
    /// Start the stopwatch with the session. When `false` it stays stopped
    /// until the first reset schedules a restart, and that first fall
    /// records no run.
    pub autostart_timer: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            actor_width: ACTOR_SIZE,
            actor_height: ACTOR_SIZE,

            platform_width_factor: PLATFORM_WIDTH_FACTOR,
            platform_height: PLATFORM_HEIGHT,
            min_y: PLATFORM_MIN_Y,
            bottom_margin: PLATFORM_BOTTOM_MARGIN,
            start_y: PLATFORM_START_Y,
            y_step_factor: PLATFORM_Y_STEP_FACTOR,
            gap_min_factor: GAP_MIN_FACTOR,
            gap_max_factor: GAP_MAX_FACTOR,

            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            fast_fall: FAST_FALL,
            scroll_speed: SCROLL_SPEED,
            nominal_speed: NOMINAL_SPEED,

            reset_delay_ms: RESET_DELAY_MS,
            autostart_timer: true,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn platform_width(&self) -> f32 {
        self.actor_width * self.platform_width_factor
    }

    /// Lowest allowed platform top
    pub fn max_y(&self) -> f32 {
        self.viewport_height - self.platform_height - self.bottom_margin
    }

    /// Largest vertical offset between neighbouring platforms (whole pixels)
    pub fn y_step(&self) -> i32 {
        (self.actor_height * self.y_step_factor).floor() as i32
    }

    pub fn reset_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.reset_delay_ms)
    }

    /// Reject constants the kinematics cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.gravity) {
            return Err(ConfigError::NonPositiveGravity(self.gravity));
        }
        if !is_positive(self.fast_fall) {
            return Err(ConfigError::NonPositiveFastFall(self.fast_fall));
        }
        if !is_positive(-self.jump_velocity) {
            return Err(ConfigError::NonNegativeJumpVelocity(self.jump_velocity));
        }
        if !self.scroll_speed.is_finite() || self.scroll_speed < 0.0 {
            return Err(ConfigError::InvalidScrollSpeed(self.scroll_speed));
        }

        let dimensions = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("platform_width_factor", self.platform_width_factor),
            ("platform_height", self.platform_height),
            ("nominal_speed", self.nominal_speed),
        ];
        for (name, value) in dimensions {
            if !is_positive(value) {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }

        let layout = [
            ("start_y", self.start_y),
            ("min_y", self.min_y),
            ("bottom_margin", self.bottom_margin),
        ];
        for (name, value) in layout {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if !self.y_step_factor.is_finite() || self.y_step_factor < 0.0 {
            return Err(ConfigError::InvalidYStep(self.y_step_factor));
        }

        if self.min_y > self.max_y() {
            return Err(ConfigError::InvertedBand {
                min_y: self.min_y,
                max_y: self.max_y(),
            });
        }
        // Checked in pixels too: a finite factor can still overflow the width
        let gap_ok = is_positive(self.gap_min_factor)
            && is_positive(self.gap_max_factor)
            && self.gap_min_factor <= self.gap_max_factor
            && is_positive(self.actor_width * self.gap_max_factor);
        if !gap_ok {
            return Err(ConfigError::InvalidGapBand {
                min: self.gap_min_factor,
                max: self.gap_max_factor,
            });
        }
        Ok(())
    }
}

/// Finite and strictly greater than zero
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.platform_width() - 110.0).abs() < 1e-4);
        assert_eq!(config.max_y(), 768.0 - 32.0 - 10.0);
        assert_eq!(config.y_step(), 70);
    }

    #[test]
    fn test_rejects_bad_gravity() {
        let config = SimConfig {
            gravity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveGravity(_))
        ));
    }

    #[test]
    fn test_rejects_upward_positive_jump() {
        let config = SimConfig {
            jump_velocity: 18.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonNegativeJumpVelocity(_))
        ));
    }

    #[test]
    fn test_rejects_nan_dimension() {
        let config = SimConfig {
            actor_width: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveDimension { name: "actor_width", .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_band() {
        let config = SimConfig {
            viewport_height: 200.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBand { .. })
        ));
    }

    #[test]
    fn test_rejects_overflowing_gap_band() {
        // 1e300 does not fit in f32 and parses as infinity
        let result = SimConfig::from_json_str(r#"{ "gap_max_factor": 1e300 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidGapBand { .. })));

        let config = SimConfig {
            gap_max_factor: 1e37,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGapBand { .. })
        ));

        let config = SimConfig {
            gap_min_factor: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGapBand { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_layout() {
        let config = SimConfig {
            start_y: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "start_y", .. })
        ));

        let config = SimConfig {
            bottom_margin: f32::NEG_INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "bottom_margin", .. })
        ));

        let config = SimConfig {
            y_step_factor: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidYStep(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(r#"{ "seed": 7, "scroll_speed": 3.0 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.scroll_speed, 3.0);
        assert_eq!(config.gravity, GRAVITY);
    }

    #[test]
    fn test_json_validation_runs() {
        let result = SimConfig::from_json_str(r#"{ "gravity": -1.0 }"#);
        assert!(matches!(result, Err(ConfigError::NonPositiveGravity(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json_str(&json).unwrap(), config);
    }
}
