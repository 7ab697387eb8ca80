//! Runtime configuration for an integration run and its optional shooting solve.
//!
//! A [`Config`] can be built in code or, with the `serde-derive` feature,
//! deserialized from a file. Call [`Config::validate`] before using it.

use std::fmt;

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{EquationSystem, Error, GridError, Parameters, Stepping, TimeGrid};

/// Which quantity a shooting solve varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BisectionMode {
    /// The initial value of an equation.
    InitialCondition,
    /// The value of a parameter.
    Parameter,
}

impl fmt::Display for BisectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitialCondition => f.write_str("initial condition"),
            Self::Parameter => f.write_str("parameter"),
        }
    }
}

/// Settings for the bisection shooting solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct BisectionConfig {
    pub mode: BisectionMode,
    /// Index of the equation or parameter being solved for.
    pub target_index: usize,
    pub min: f64,
    pub max: f64,
    /// Relative bracket width at which the search stops.
    pub precision: f64,
    #[cfg_attr(feature = "serde-derive", serde(default = "default_max_iters"))]
    pub max_iters: usize,
}

/// Settings for the early-exit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct ExitConfig {
    /// Number of extra points computed after the exit condition first holds.
    pub lookahead: usize,
}

/// Configuration for an integration run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(Serialize, Deserialize),
    serde(default)
)]
pub struct Config {
    pub equation_count: usize,
    pub parameter_count: usize,
    pub point_count: usize,
    pub t_start: f64,
    pub t_end: f64,
    pub stepping: Stepping,
    pub bisection: Option<BisectionConfig>,
    pub exit: Option<ExitConfig>,
    /// Digits after the decimal point in the result table.
    pub output_precision: usize,
}

/// Errors that can occur when validating a [`Config`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("equation_count must be at least 1")]
    EquationCount,

    #[error("invalid time grid: {0}")]
    Grid(#[from] GridError),

    #[error("bisection bounds must be finite with min < max")]
    BisectionBounds,

    #[error("bisection precision must be finite and positive")]
    BisectionPrecision,

    #[error("bisection max_iters must be at least 1")]
    BisectionMaxIters,

    #[error("bisection target index {index} is out of range for {len} {kind}s")]
    BisectionTarget {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

fn default_max_iters() -> usize {
    200
}

impl Default for Config {
    fn default() -> Self {
        Self {
            equation_count: 2,
            parameter_count: 1,
            point_count: 10_000,
            t_start: 0.0,
            t_end: 1.0,
            stepping: Stepping::Linear,
            bisection: None,
            exit: None,
            output_precision: 5,
        }
    }
}

impl BisectionConfig {
    /// Creates bisection settings with the default iteration cap.
    #[must_use]
    pub fn new(mode: BisectionMode, target_index: usize, min: f64, max: f64, precision: f64) -> Self {
        Self {
            mode,
            target_index,
            min,
            max,
            precision,
            max_iters: default_max_iters(),
        }
    }

    /// Checks bounds, precision, and iteration cap.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ConfigError::BisectionBounds);
        }
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(ConfigError::BisectionPrecision);
        }
        if self.max_iters == 0 {
            return Err(ConfigError::BisectionMaxIters);
        }
        Ok(())
    }
}

impl Config {
    /// Checks that the configuration describes a runnable problem.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.equation_count == 0 {
            return Err(ConfigError::EquationCount);
        }

        self.time_grid()?;

        if let Some(bisection) = &self.bisection {
            bisection.validate()?;

            let (kind, len) = match bisection.mode {
                BisectionMode::InitialCondition => ("equation", self.equation_count),
                BisectionMode::Parameter => ("parameter", self.parameter_count),
            };
            if bisection.target_index >= len {
                return Err(ConfigError::BisectionTarget {
                    kind,
                    index: bisection.target_index,
                    len,
                });
            }
        }

        Ok(())
    }

    /// Builds the time grid described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if the grid settings are invalid.
    pub fn time_grid(&self) -> Result<TimeGrid, GridError> {
        TimeGrid::new(self.stepping, self.t_start, self.t_end, self.point_count)
    }

    /// Checks that a problem definition matches the declared counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CountMismatch`] if the number of equations or
    /// parameters differs from the configuration.
    pub fn check_problem(&self, system: &EquationSystem, params: &Parameters) -> Result<(), Error> {
        if system.len() != self.equation_count {
            return Err(Error::CountMismatch {
                kind: "equation",
                declared: self.equation_count,
                found: system.len(),
            });
        }
        if params.len() != self.parameter_count {
            return Err(Error::CountMismatch {
                kind: "parameter",
                declared: self.parameter_count,
                found: params.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Equation;

    fn bisection() -> BisectionConfig {
        BisectionConfig::new(BisectionMode::InitialCondition, 1, -1.0, 5.0, 0.01)
    }

    #[test]
    fn default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_equations() {
        let config = Config {
            equation_count: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EquationCount));
    }

    #[test]
    fn rejects_bad_grid() {
        let config = Config {
            point_count: 1,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Grid(GridError::TooFewPoints { points: 1 }))
        );

        let config = Config {
            stepping: Stepping::Log10,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Grid(GridError::NonPositiveLogBound { .. }))
        ));
    }

    #[test]
    fn rejects_bad_bisection() {
        let config = Config {
            bisection: Some(BisectionConfig {
                min: 5.0,
                max: -1.0,
                ..bisection()
            }),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BisectionBounds));

        let config = Config {
            bisection: Some(BisectionConfig {
                precision: 0.0,
                ..bisection()
            }),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BisectionPrecision));

        let config = Config {
            bisection: Some(BisectionConfig {
                max_iters: 0,
                ..bisection()
            }),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BisectionMaxIters));
    }

    #[test]
    fn mode_names_the_free_variable() {
        assert_eq!(BisectionMode::InitialCondition.to_string(), "initial condition");
        assert_eq!(BisectionMode::Parameter.to_string(), "parameter");
    }

    #[test]
    fn rejects_out_of_range_target() {
        let config = Config {
            bisection: Some(BisectionConfig {
                mode: BisectionMode::Parameter,
                target_index: 1,
                ..bisection()
            }),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BisectionTarget {
                kind: "parameter",
                index: 1,
                len: 1
            })
        );
    }

    #[test]
    fn check_problem_compares_counts() {
        let config = Config::default();
        let system = EquationSystem::new(vec![Equation::new(
            "x",
            |_t: f64, _s: &[f64], _p: &Parameters| 0.0,
        )])
        .unwrap();
        let params = Parameters::new().with("omega", 1.0);

        assert_eq!(
            config.check_problem(&system, &params),
            Err(Error::CountMismatch {
                kind: "equation",
                declared: 2,
                found: 1
            })
        );

        let config = Config {
            equation_count: 1,
            ..Config::default()
        };
        assert_eq!(config.check_problem(&system, &params), Ok(()));

        let params = params.with("damping", 0.1);
        assert_eq!(
            config.check_problem(&system, &params),
            Err(Error::CountMismatch {
                kind: "parameter",
                declared: 1,
                found: 2
            })
        );
    }
}
