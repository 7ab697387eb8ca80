//! The simple pendulum `x' = v`, `v' = -omega^2 sin(x)`.

use std::f64::consts::FRAC_PI_4;

use kutta_core::{Equation, EquationSystem, Error, Parameters};
use kutta_solvers::transient::rk4::ExitCondition;

/// Builds the equations and parameters with `x(0) = pi/4`, `v(0) = 1`, `omega = 1`.
pub fn problem() -> Result<(EquationSystem, Parameters), Error> {
    let system = EquationSystem::new(vec![
        Equation::new("x", |_t: f64, s: &[f64], _p: &Parameters| s[1]).with_initial_value(FRAC_PI_4),
        Equation::new("v", |_t: f64, s: &[f64], p: &Parameters| {
            let omega = p[0];
            -omega * omega * s[0].sin()
        })
        .with_initial_value(1.0),
    ])?;

    Ok((system, Parameters::new().with("omega", 1.0)))
}

/// Stops once the pendulum starts swinging back.
pub fn exit_condition(lookahead: usize) -> ExitCondition {
    ExitCondition::new(|_t: f64, s: &[f64], _p: &Parameters| s[1] < 0.0, lookahead)
}

/// Shooting residual: the final velocity should be 1.
pub fn shooting_target(_t: f64, state: &[f64], _params: &Parameters) -> f64 {
    state[1] - 1.0
}
