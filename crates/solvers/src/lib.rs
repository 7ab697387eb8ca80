//! Solvers for fixed-step ODE integration and shooting problems.
//!
//! # Modules
//!
//! - [`transient`]: fixed-step time integration ([`transient::rk4`])
//! - [`shooting`]: bisection over an initial condition or parameter so that
//!   a residual of the final state vanishes
//! - [`output`]: text tables of integration results

pub mod output;
pub mod shooting;
pub mod transient;
