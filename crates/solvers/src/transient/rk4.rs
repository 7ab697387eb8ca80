//! Classical fourth-order Runge-Kutta integration on a fixed time grid.
//!
//! Each step advances the state over one grid interval `h`:
//!
//! ```text
//! k0 = f(t,         y)
//! k1 = f(t + h / 2, y + h / 2 * k0)
//! k2 = f(t + h / 2, y + h / 2 * k1)
//! k3 = f(t + h,     y + h * k2)
//! y' = y + h / 6 * (k0 + 2 k1 + 2 k2 + k3)
//! ```
//!
//! The step size is fixed by the grid. There is no error control and no
//! NaN or infinity detection.
//!
//! # Example
//!
//! ```ignore
//! use kutta_solvers::transient::rk4::Integrator;
//!
//! let integrator = Integrator::new(grid);
//! let solution = integrator.run(&system, &params)?;
//!
//! for (t, x) in solution.times.iter().zip(solution.trajectory.component(0).unwrap()) {
//!     println!("t={t}: x={x}");
//! }
//! ```

mod error;
mod exit;
mod solution;

pub use error::Error;
pub use exit::ExitCondition;
pub use solution::{Solution, Trajectory};

use kutta_core::{EquationSystem, InitialOverride, Parameters, StateFn, StateVector, TimeGrid};

use exit::ExitTracker;

/// Advances `state` from `t` to `t + h` with one RK4 step.
///
/// # Errors
///
/// Returns an error if `state` does not have one component per equation.
pub fn step(
    t: f64,
    h: f64,
    state: &StateVector,
    system: &EquationSystem,
    params: &Parameters,
) -> Result<StateVector, Error> {
    let half = 0.5 * h;

    let k0 = system.derivatives(t, state, params)?;
    let k1 = system.derivatives(t + half, &state.add_scaled(half, &k0)?, params)?;
    let k2 = system.derivatives(t + half, &state.add_scaled(half, &k1)?, params)?;
    let k3 = system.derivatives(t + h, &state.add_scaled(h, &k2)?, params)?;

    let slope = k0.add(&k1.scale(2.0))?.add(&k2.scale(2.0))?.add(&k3)?;

    Ok(state.add_scaled(h / 6.0, &slope)?)
}

/// Integrates an equation system across a fixed time grid.
///
/// The integrator owns the grid and the optional [`ExitCondition`]. Each call
/// to [`run`](Self::run) or [`trial`](Self::trial) starts from a fresh state
/// and a fresh exit index, so runs never share mutable state.
#[derive(Debug)]
pub struct Integrator {
    grid: TimeGrid,
    exit: Option<ExitCondition>,
}

impl Integrator {
    /// Creates an integrator that covers the whole grid.
    #[must_use]
    pub fn new(grid: TimeGrid) -> Self {
        Self { grid, exit: None }
    }

    /// Attaches an exit condition.
    #[must_use]
    pub fn with_exit_condition(mut self, exit: ExitCondition) -> Self {
        self.exit = Some(exit);
        self
    }

    #[must_use]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    #[must_use]
    pub fn exit_condition(&self) -> Option<&ExitCondition> {
        self.exit.as_ref()
    }

    /// Integrates from the system's own initial conditions.
    ///
    /// # Algorithm
    ///
    /// 1. Initialize the state at the first grid time and record it.
    /// 2. For grid index `j` while `j + 1 < exit_index`:
    ///    - Check the exit condition at `(t_j, state)`.
    ///    - Step the state over `[t_j, t_{j+1}]` and record it.
    /// 3. Return the recorded history.
    ///
    /// # Errors
    ///
    /// Returns an error if the system and state lengths disagree.
    pub fn run(&self, system: &EquationSystem, params: &Parameters) -> Result<Solution, Error> {
        self.integrate(system, params, None)
    }

    /// Integrates with one initial value replaced by `initial_override`.
    ///
    /// # Errors
    ///
    /// Returns an error if the override index is invalid or the system and
    /// state lengths disagree.
    pub fn run_with_override(
        &self,
        system: &EquationSystem,
        params: &Parameters,
        initial_override: InitialOverride,
    ) -> Result<Solution, Error> {
        self.integrate(system, params, Some(initial_override))
    }

    /// Integrates a shooting trial and returns the residual at the final point.
    ///
    /// The residual is `target` evaluated at the time of the last recorded
    /// point with the final state.
    ///
    /// # Errors
    ///
    /// Returns an error if the override index is invalid or the system and
    /// state lengths disagree.
    pub fn trial(
        &self,
        system: &EquationSystem,
        params: &Parameters,
        initial_override: Option<InitialOverride>,
        target: &(impl StateFn + ?Sized),
    ) -> Result<f64, Error> {
        let solution = self.integrate(system, params, initial_override)?;
        Ok(solution.terminal_value(target, params))
    }

    fn integrate(
        &self,
        system: &EquationSystem,
        params: &Parameters,
        initial_override: Option<InitialOverride>,
    ) -> Result<Solution, Error> {
        let grid = &self.grid;
        let points = grid.len();

        let mut state = system.initialize(grid.start(), params, initial_override)?;

        let mut trajectory = Trajectory::with_capacity(system.len(), points);
        trajectory.push(&state);

        let mut exit = ExitTracker::new(self.exit.as_ref(), points);

        let mut j = 0;
        while j + 1 < exit.exit_index() {
            exit.check(j, grid[j], &state, params);

            state = step(grid[j], grid[j + 1] - grid[j], &state, system, params)?;
            trajectory.push(&state);

            j += 1;
        }

        Ok(Solution {
            times: grid[..=j].to_vec(),
            trajectory,
            exit_index: exit.exit_index(),
            triggered_at: exit.triggered_at(),
        })
    }
}
