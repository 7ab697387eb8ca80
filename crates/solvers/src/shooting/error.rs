use thiserror::Error;

use kutta_core::config::ConfigError;

use crate::transient::rk4;

/// Errors that can occur during a shooting solve.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("problem error: {0}")]
    Problem(#[from] kutta_core::Error),

    #[error("integration failed: {0}")]
    Integration(#[from] rk4::Error),

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },
}
