/// Errors that can occur during RK4 integration.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("problem error: {0}")]
    Problem(#[from] kutta_core::Error),
}
