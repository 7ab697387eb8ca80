use std::ops::Deref;

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How grid points are spaced between the start and end times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde-derive",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Stepping {
    /// Evenly spaced points.
    #[default]
    Linear,
    /// Points evenly spaced in `log10(t)`.
    Log10,
}

/// Errors that can occur when building a [`TimeGrid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("a time grid needs at least 2 points, got {points}")]
    TooFewPoints { points: usize },

    #[error("time bound {value} is not finite")]
    NonFiniteBound { value: f64 },

    #[error("time bounds must increase: start {start}, end {end}")]
    NotIncreasing { start: f64, end: f64 },

    #[error("logarithmic stepping needs positive bounds, got {value}")]
    NonPositiveLogBound { value: f64 },

    #[error("grid point {index} is not followed by a later time")]
    NotStrictlyMonotonic { index: usize },
}

/// Strictly increasing sample times shared by every integration run.
///
/// Both endpoints are stored exactly as given.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid(Vec<f64>);

impl TimeGrid {
    /// Builds a grid of `points` samples from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if there are fewer than two points, the bounds
    /// are not finite and increasing, or (for [`Stepping::Log10`]) the bounds
    /// are not positive.
    pub fn new(stepping: Stepping, start: f64, end: f64, points: usize) -> Result<Self, GridError> {
        match stepping {
            Stepping::Linear => Self::linear(start, end, points),
            Stepping::Log10 => Self::log10(start, end, points),
        }
    }

    /// Builds an evenly spaced grid.
    ///
    /// # Errors
    ///
    /// See [`TimeGrid::new`].
    pub fn linear(start: f64, end: f64, points: usize) -> Result<Self, GridError> {
        check_bounds(start, end, points)?;

        #[allow(clippy::cast_precision_loss)]
        let h = (end - start) / (points - 1) as f64;

        #[allow(clippy::cast_precision_loss)]
        let times = (0..points)
            .map(|j| {
                if j == points - 1 {
                    end
                } else {
                    start + j as f64 * h
                }
            })
            .collect();

        Self::from_times(times)
    }

    /// Builds a grid evenly spaced in `log10(t)`.
    ///
    /// # Errors
    ///
    /// See [`TimeGrid::new`].
    pub fn log10(start: f64, end: f64, points: usize) -> Result<Self, GridError> {
        check_bounds(start, end, points)?;
        if start <= 0.0 {
            return Err(GridError::NonPositiveLogBound { value: start });
        }

        let a = start.log10();
        let b = end.log10();

        #[allow(clippy::cast_precision_loss)]
        let h = (b - a) / (points - 1) as f64;

        #[allow(clippy::cast_precision_loss)]
        let times = (0..points)
            .map(|j| match j {
                0 => start,
                j if j == points - 1 => end,
                j => 10.0_f64.powf(a + j as f64 * h),
            })
            .collect();

        Self::from_times(times)
    }

    /// Returns the first time.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.0[0]
    }

    /// Returns the last time.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    fn from_times(times: Vec<f64>) -> Result<Self, GridError> {
        if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(GridError::NotStrictlyMonotonic { index });
        }
        Ok(Self(times))
    }
}

impl Deref for TimeGrid {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

fn check_bounds(start: f64, end: f64, points: usize) -> Result<(), GridError> {
    if points < 2 {
        return Err(GridError::TooFewPoints { points });
    }
    for value in [start, end] {
        if !value.is_finite() {
            return Err(GridError::NonFiniteBound { value });
        }
    }
    if start >= end {
        return Err(GridError::NotIncreasing { start, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn log10_grid_hits_decades_exactly() {
        let grid = TimeGrid::log10(1.0, 100.0, 3).expect("valid bounds");

        assert_eq!(&grid[..], &[1.0, 10.0, 100.0]);
    }

    #[test]
    fn linear_grid_spans_bounds() {
        let grid = TimeGrid::linear(2.0, 3.0, 5).expect("valid bounds");

        assert_eq!(grid.len(), 5);
        assert_eq!(grid.start(), 2.0);
        assert_eq!(grid.end(), 3.0);
        assert_relative_eq!(grid[1], 2.25);
        assert_relative_eq!(grid[2], 2.5);
        assert_relative_eq!(grid[3], 2.75);
    }

    #[test]
    fn new_dispatches_on_stepping() {
        let linear = TimeGrid::new(Stepping::Linear, 1.0, 100.0, 3).unwrap();
        let log = TimeGrid::new(Stepping::Log10, 1.0, 100.0, 3).unwrap();

        assert_relative_eq!(linear[1], 50.5);
        assert_relative_eq!(log[1], 10.0);
    }

    #[test]
    fn rejects_too_few_points() {
        assert_eq!(
            TimeGrid::linear(0.0, 1.0, 1),
            Err(GridError::TooFewPoints { points: 1 })
        );
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(matches!(
            TimeGrid::linear(1.0, 1.0, 10),
            Err(GridError::NotIncreasing { .. })
        ));
        assert!(matches!(
            TimeGrid::linear(0.0, f64::NAN, 10),
            Err(GridError::NonFiniteBound { .. })
        ));
        assert!(matches!(
            TimeGrid::log10(0.0, 10.0, 10),
            Err(GridError::NonPositiveLogBound { .. })
        ));
    }
}
