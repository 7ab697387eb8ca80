//! Fixed-step time integration.
//!
//! - [`rk4`]: classical fourth-order Runge-Kutta with an optional exit condition

pub mod rk4;
