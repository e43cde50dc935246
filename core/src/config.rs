//! Engine configuration, validated at construction time.
//!
//! Every invalid parameter is rejected before the first tick; nothing inside a
//! tick re-checks configuration.

use thiserror::Error;

use crate::sim::Schedule;

/// Result type returned by fallible configuration routines.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error produced by configuration validation.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid dimension must be positive")]
    GridSize,
    #[error("grid is {actual}x{actual} but the configuration says {expected}")]
    GridSizeMismatch { expected: usize, actual: usize },
    #[error("fullness {0} outside [0, 1]")]
    Fullness(f64),
    #[error("step radius {radius} degenerate for grid dimension {size}")]
    StepRadius { radius: usize, size: usize },
    #[error("body weight must be positive")]
    BodyWeight,
    #[error("ingested volume must not be negative")]
    IngestedVolume,
}

/// How strongly fullness suppresses substance movement.
const FULLNESS_DAMPING: f64 = 0.8;

/// Validated engine parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Grid dimension N.
    pub size: usize,
    /// Cavity fullness in `[0, 1]`; fuller means less substance movement.
    pub fullness: f64,
    /// Maximum per-axis relocation distance for a moving cell.
    pub step_radius: usize,
    /// Clearance schedule for the excretion pass.
    pub clearance: Schedule,
}

impl Params {
    /// Creates a parameter set, rejecting degenerate values.
    pub fn new(size: usize, fullness: f64, step_radius: usize) -> ConfigResult<Self> {
        if size == 0 {
            return Err(ConfigError::GridSize);
        }
        if !(0.0..=1.0).contains(&fullness) {
            return Err(ConfigError::Fullness(fullness));
        }
        if step_radius >= size / 2 {
            return Err(ConfigError::StepRadius {
                radius: step_radius,
                size,
            });
        }
        Ok(Self {
            size,
            fullness,
            step_radius,
            clearance: Schedule::default(),
        })
    }

    /// Replaces the clearance schedule.
    pub fn with_clearance(mut self, clearance: Schedule) -> Self {
        self.clearance = clearance;
        self
    }

    /// Probability that a substance cell attempts to move on a given pass.
    #[inline]
    pub fn move_probability(&self) -> f64 {
        1.0 - self.fullness * FULLNESS_DAMPING
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new(100, 0.25, 2).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_parameters() {
        assert_eq!(Err(ConfigError::GridSize), Params::new(0, 0.5, 1));
        assert_eq!(Err(ConfigError::Fullness(1.5)), Params::new(10, 1.5, 1));
        assert_eq!(Err(ConfigError::Fullness(-0.1)), Params::new(10, -0.1, 1));
        assert!(Params::new(10, f64::NAN, 1).is_err());
        assert_eq!(
            Err(ConfigError::StepRadius {
                radius: 5,
                size: 10
            }),
            Params::new(10, 0.5, 5)
        );
        assert!(Params::new(10, 0.5, 4).is_ok());
    }

    #[test]
    fn test_move_probability_range() {
        assert_eq!(1.0, Params::new(10, 0.0, 1).unwrap().move_probability());
        let full = Params::new(10, 1.0, 1).unwrap().move_probability();
        assert!((full - 0.2).abs() < 1e-12);
    }
}
