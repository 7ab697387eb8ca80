//! Bisection shooting for boundary value problems.
//!
//! # Algorithm
//!
//! A shooting solve picks one free quantity, either the initial value of an
//! equation or a parameter, and searches `[min, max]` for the value that
//! drives a target residual of the final state to zero. Each trial runs the
//! integrator from scratch:
//!
//! 1. Run a trial at `min` and keep its residual.
//! 2. Run a trial at the midpoint `C` of the bracket.
//! 3. If the residuals at `min` and `C` share a sign, the root lies in
//!    `[C, max]`; otherwise it lies in `[min, C]`.
//! 4. Repeat until `|max - min| / |min|` is at or below the precision
//!    (`|max - min|` when `min` is zero).
//!
//! A trial whose residual is exactly zero ends the search at that value.
//!
//! If either end of the bracket never moved, the search never straddled a
//! sign change and reports [`Status::NotBracketed`]. Only a
//! [`Status::Converged`] solve writes the root back into the problem.
//!
//! # Trials
//!
//! Trials never mutate the caller's problem. Initial-condition trials pass an
//! [`InitialOverride`] to the integrator, and parameter trials run on a copy
//! of the parameters.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per midpoint trial. Observers can return
//! [`Action::StopEarly`] to halt the search without applying a result.

mod action;
mod error;
mod event;
mod solution;


pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use kutta_core::{
    EquationSystem, InitialOverride, Observer, Parameters, StateFn,
    config::{BisectionConfig, BisectionMode},
};
use log::{debug, info, warn};

use crate::transient::rk4::Integrator;

/// Solves for the free variable named by `config` with bisection.
///
/// When shooting on an initial condition whose equation computes its initial
/// value from a function, the function is switched off with a warning so the
/// trial values take effect. This change persists regardless of the outcome.
///
/// A residual of exactly zero, including one at `min` before the first
/// midpoint, is taken as the root with [`Status::Converged`]. The bracket
/// is not narrowed further toward `max` in that case.
///
/// # Errors
///
/// Returns an error if the config is invalid, the target index does not fit
/// the problem, an integration fails, or a residual is not finite.
pub fn solve<T, Obs>(
    integrator: &Integrator,
    system: &mut EquationSystem,
    params: &mut Parameters,
    target: &T,
    config: &BisectionConfig,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    T: StateFn + ?Sized,
    Obs: Observer<Event, Action>,
{
    config.validate()?;

    let shot = Shot {
        integrator,
        mode: config.mode,
        index: config.target_index,
    };

    let initializer_disabled = shot.prepare(system, params)?;

    let [lower, upper] = [config.min, config.max];
    let (mut lo, mut hi) = (lower, upper);

    info!(
        "shooting on {} in [{lower}, {upper}] with precision {}",
        shot.describe(system, params),
        config.precision
    );

    let finish = |status, root, bracket, iters| Solution {
        status,
        root,
        bracket,
        iters,
        initializer_disabled,
    };

    let mut lo_residual = shot.residual(system, params, target, lo)?;
    if lo_residual == 0.0 {
        let solution = finish(Status::Converged, lo, [lo, hi], 0);
        shot.apply(system, params, &solution)?;
        return Ok(solution);
    }

    let mut iters = 0;
    let status = loop {
        if is_resolved(lo, hi, config.precision) {
            #[allow(clippy::float_cmp)]
            let unmoved = lo == lower || hi == upper;
            break if unmoved {
                Status::NotBracketed
            } else {
                Status::Converged
            };
        }
        if iters == config.max_iters {
            break Status::MaxIters;
        }
        iters += 1;

        let x = 0.5 * (lo + hi);
        let residual = shot.residual(system, params, target, x)?;

        debug!(
            "iter {iters}: min {lo:.4e} max {hi:.4e} C {x:.4e} r_min {lo_residual:.4e} r_C {residual:.4e}"
        );

        let event = Event {
            iter: iters,
            bracket: [lo, hi],
            x,
            residual,
            lower_residual: lo_residual,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            break Status::StoppedByObserver;
        }

        if residual == 0.0 {
            let solution = finish(Status::Converged, x, [x, x], iters);
            shot.apply(system, params, &solution)?;
            return Ok(solution);
        }

        if lo_residual.signum() == residual.signum() {
            lo = x;
            lo_residual = residual;
        } else {
            hi = x;
        }
    };

    let solution = finish(status, 0.5 * (lo + hi), [lo, hi], iters);
    shot.apply(system, params, &solution)?;
    Ok(solution)
}

/// Runs a shooting solve without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<T>(
    integrator: &Integrator,
    system: &mut EquationSystem,
    params: &mut Parameters,
    target: &T,
    config: &BisectionConfig,
) -> Result<Solution, Error>
where
    T: StateFn + ?Sized,
{
    solve(integrator, system, params, target, config, ())
}

/// Returns `true` once the bracket is narrow relative to its lower bound.
fn is_resolved(lo: f64, hi: f64, precision: f64) -> bool {
    let width = (hi - lo).abs();
    if lo == 0.0 {
        width <= precision
    } else {
        width / lo.abs() <= precision
    }
}

/// The free variable of a shooting solve and the integrator that tests it.
struct Shot<'a> {
    integrator: &'a Integrator,
    mode: BisectionMode,
    index: usize,
}

impl Shot<'_> {
    /// Checks the target index and resolves initializer conflicts.
    fn prepare(&self, system: &mut EquationSystem, params: &Parameters) -> Result<bool, Error> {
        match self.mode {
            BisectionMode::InitialCondition => {
                let disabled = system.disable_initializer(self.index)?;
                if disabled {
                    warn!(
                        "cannot shoot on the initial condition of `{}` (equation {}) while it is \
                         computed from a function; using a fixed initial value instead",
                        system.equation(self.index)?.name(),
                        self.index
                    );
                }
                Ok(disabled)
            }
            BisectionMode::Parameter => {
                if params.get(self.index).is_none() {
                    return Err(kutta_core::Error::IndexOutOfRange {
                        kind: "parameter",
                        index: self.index,
                        len: params.len(),
                    }
                    .into());
                }
                Ok(false)
            }
        }
    }

    /// Runs one trial with the free variable set to `x`.
    fn residual<T>(
        &self,
        system: &EquationSystem,
        params: &Parameters,
        target: &T,
        x: f64,
    ) -> Result<f64, Error>
    where
        T: StateFn + ?Sized,
    {
        let residual = match self.mode {
            BisectionMode::InitialCondition => {
                let initial_override = InitialOverride {
                    index: self.index,
                    value: x,
                };
                self.integrator
                    .trial(system, params, Some(initial_override), target)?
            }
            BisectionMode::Parameter => {
                let mut trial_params = params.clone();
                trial_params.set_value(self.index, x)?;
                self.integrator.trial(system, &trial_params, None, target)?
            }
        };

        if residual.is_finite() {
            Ok(residual)
        } else {
            Err(Error::NonFiniteResidual { x, residual })
        }
    }

    /// Writes a converged root back into the problem.
    fn apply(
        &self,
        system: &mut EquationSystem,
        params: &mut Parameters,
        solution: &Solution,
    ) -> Result<(), Error> {
        match solution.status {
            Status::Converged => {
                match self.mode {
                    BisectionMode::InitialCondition => {
                        system.set_initial_value(self.index, solution.root)?;
                    }
                    BisectionMode::Parameter => params.set_value(self.index, solution.root)?,
                }
                info!(
                    "shooting converged after {} iterations: {} = {}",
                    solution.iters,
                    self.describe(system, params),
                    solution.root
                );
            }
            Status::NotBracketed => warn!(
                "the range [{}, {}] does not seem to bracket a root; leaving {} unchanged",
                solution.bracket[0],
                solution.bracket[1],
                self.describe(system, params)
            ),
            Status::MaxIters => warn!(
                "shooting stopped after {} iterations with bracket [{}, {}]",
                solution.iters, solution.bracket[0], solution.bracket[1]
            ),
            Status::StoppedByObserver => {
                info!("shooting stopped by observer after {} iterations", solution.iters);
            }
        }
        Ok(())
    }

    /// Names the free variable for log messages.
    fn describe(&self, system: &EquationSystem, params: &Parameters) -> String {
        match self.mode {
            BisectionMode::InitialCondition => system.equation(self.index).map_or_else(
                |_| format!("equation {}", self.index),
                |eq| format!("initial `{}`", eq.name()),
            ),
            BisectionMode::Parameter => params.get(self.index).map_or_else(
                || format!("parameter {}", self.index),
                |p| format!("parameter `{}`", p.name),
            ),
        }
    }
}
