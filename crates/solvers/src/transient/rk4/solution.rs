use kutta_core::{Parameters, StateFn, StateVector};

/// The recorded state history of one run, stored per component.
///
/// Component `i`, point `j` is the value of equation `i` at grid time `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    components: Vec<Vec<f64>>,
}

impl Trajectory {
    pub(super) fn with_capacity(equations: usize, points: usize) -> Self {
        Self {
            components: (0..equations)
                .map(|_| Vec::with_capacity(points))
                .collect(),
        }
    }

    pub(super) fn push(&mut self, state: &[f64]) {
        for (component, value) in self.components.iter_mut().zip(state) {
            component.push(*value);
        }
    }

    /// Returns the number of recorded points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of components.
    #[must_use]
    pub fn equations(&self) -> usize {
        self.components.len()
    }

    /// Returns the history of component `i`.
    #[must_use]
    pub fn component(&self, i: usize) -> Option<&[f64]> {
        self.components.get(i).map(Vec::as_slice)
    }

    /// Returns the value of component `i` at point `j`.
    #[must_use]
    pub fn value(&self, i: usize, j: usize) -> Option<f64> {
        self.components.get(i)?.get(j).copied()
    }

    /// Returns the full state at point `j`.
    #[must_use]
    pub fn state(&self, j: usize) -> Option<StateVector> {
        self.components.iter().map(|c| c.get(j).copied()).collect()
    }
}

/// The result of an RK4 integration run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Grid times of the recorded points.
    pub times: Vec<f64>,

    /// State history, one entry per recorded time.
    pub trajectory: Trajectory,

    /// Exit index reached by the run (the grid length if no exit fired).
    pub exit_index: usize,

    /// Grid index where the exit condition first held, if it did.
    pub triggered_at: Option<usize>,
}

impl Solution {
    /// Returns the number of points reported in result tables.
    ///
    /// This is `exit_index - 1`, bounded by the number of recorded points.
    #[must_use]
    pub fn reported_points(&self) -> usize {
        self.exit_index
            .saturating_sub(1)
            .min(self.trajectory.len())
    }

    /// Returns the time of the last recorded point.
    #[must_use]
    pub fn final_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(f64::NAN)
    }

    /// Returns the state at the last recorded point.
    #[must_use]
    pub fn final_state(&self) -> StateVector {
        self.trajectory
            .len()
            .checked_sub(1)
            .and_then(|j| self.trajectory.state(j))
            .unwrap_or_default()
    }

    /// Evaluates `target` at the last recorded point.
    pub fn terminal_value(&self, target: &(impl StateFn + ?Sized), params: &Parameters) -> f64 {
        target.evaluate(self.final_time(), &self.final_state(), params)
    }
}
