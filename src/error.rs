//! Error types
//!
//! The simulation itself has no recoverable errors; everything that can go
//! wrong happens while building a session from its configuration.

use thiserror::Error;

/// Fatal configuration problems, reported before a session is created
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("gravity must be positive, got {0}")]
    NonPositiveGravity(f32),
    #[error("fast-fall step must be positive, got {0}")]
    NonPositiveFastFall(f32),
    #[error("jump velocity must be negative (upward), got {0}")]
    NonNegativeJumpVelocity(f32),
    #[error("scroll speed must be finite and non-negative, got {0}")]
    InvalidScrollSpeed(f32),
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("y_step_factor must be finite and non-negative, got {0}")]
    InvalidYStep(f32),
    #[error("vertical band is empty: min_y {min_y} > max_y {max_y}")]
    InvertedBand { min_y: f32, max_y: f32 },
    #[error("gap band must satisfy 0 < min <= max, got [{min}, {max}]")]
    InvalidGapBand { min: f32, max: f32 },
    #[error("platform set is empty")]
    EmptyPlatformSet,
    #[error("gap registry holds {gaps} entries for {platforms} platforms")]
    GapRegistryMismatch { platforms: usize, gaps: usize },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
