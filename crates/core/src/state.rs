use std::ops::{Deref, DerefMut};

use crate::Error;

/// The value of every equation at a single instant.
///
/// Elementwise operations that combine two vectors fail with
/// [`Error::LengthMismatch`] instead of truncating to the shorter operand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateVector(Vec<f64>);

impl StateVector {
    /// Creates a state vector from its component values.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Creates a state vector of `len` zeros.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    /// Returns the elementwise sum `self + other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the lengths differ.
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        self.check_len(other)?;
        Ok(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())
    }

    /// Returns `self + k * other`, the update used by each RK4 stage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the lengths differ.
    pub fn add_scaled(&self, k: f64, other: &Self) -> Result<Self, Error> {
        self.check_len(other)?;
        Ok(self
            .0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| a + k * b)
            .collect())
    }

    /// Returns every component multiplied by `k`.
    #[must_use]
    pub fn scale(&self, k: f64) -> Self {
        self.0.iter().map(|v| k * v).collect()
    }

    /// Returns every component shifted by `k`.
    #[must_use]
    pub fn shift(&self, k: f64) -> Self {
        self.0.iter().map(|v| v + k).collect()
    }

    /// Consumes the vector and returns its components.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    fn check_len(&self, other: &Self) -> Result<(), Error> {
        if self.0.len() == other.0.len() {
            Ok(())
        } else {
            Err(Error::LengthMismatch {
                expected: self.0.len(),
                found: other.0.len(),
            })
        }
    }
}

impl Deref for StateVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl DerefMut for StateVector {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

impl From<Vec<f64>> for StateVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl FromIterator<f64> for StateVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
