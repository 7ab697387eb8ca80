//! Core types for fixed-step ODE integration and shooting problems.
//!
//! This crate defines the pieces a problem is built from:
//!
//! - [`StateVector`]: the value of every equation at one instant, with the
//!   elementwise algebra the RK4 stages need
//! - [`Parameters`]: named scalar parameters read by the equations
//! - [`Equation`], [`EquationSystem`]: derivative callbacks with their
//!   initial values and names
//! - [`TimeGrid`]: the fixed sample times of a run
//! - [`Config`]: problem sizes, time grid, and solver settings
//! - [`Observer`]: receives solver events and optionally returns control actions

mod equation;
mod error;
mod grid;
mod observer;
mod parameters;
mod state;

pub mod config;

pub use config::Config;
pub use equation::{Equation, EquationSystem, InitialOverride, Predicate, StateFn};
pub use error::Error;
pub use grid::{GridError, Stepping, TimeGrid};
pub use observer::Observer;
pub use parameters::{Parameter, Parameters};
pub use state::StateVector;
