use kutta_core::{Parameters, Predicate};

/// Stops integration a fixed number of points after a condition first holds.
///
/// The predicate is checked at each grid point before stepping. The first
/// time it holds at index `j`, the exit index becomes
/// `min(j + 1 + lookahead, points)`. Later results are ignored.
pub struct ExitCondition {
    predicate: Box<dyn Predicate>,
    lookahead: usize,
}

impl ExitCondition {
    /// Creates an exit condition that computes `lookahead` extra points.
    pub fn new(predicate: impl Predicate + 'static, lookahead: usize) -> Self {
        Self {
            predicate: Box::new(predicate),
            lookahead,
        }
    }

    #[must_use]
    pub fn lookahead(&self) -> usize {
        self.lookahead
    }
}

impl std::fmt::Debug for ExitCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExitCondition")
            .field("lookahead", &self.lookahead)
            .finish_non_exhaustive()
    }
}

/// Per-run exit index bookkeeping.
#[derive(Debug)]
pub(super) struct ExitTracker<'a> {
    condition: Option<&'a ExitCondition>,
    points: usize,
    exit_index: usize,
    triggered_at: Option<usize>,
}

impl<'a> ExitTracker<'a> {
    pub(super) fn new(condition: Option<&'a ExitCondition>, points: usize) -> Self {
        Self {
            condition,
            points,
            exit_index: points,
            triggered_at: None,
        }
    }

    /// Checks the condition at grid index `j` and updates the exit index.
    pub(super) fn check(&mut self, j: usize, t: f64, state: &[f64], params: &Parameters) {
        let Some(condition) = self.condition else {
            return;
        };
        if self.triggered_at.is_some() {
            return;
        }
        if condition.predicate.test(t, state, params) {
            self.triggered_at = Some(j);
            self.exit_index = (j + 1 + condition.lookahead).min(self.points);
        }
    }

    pub(super) fn exit_index(&self) -> usize {
        self.exit_index
    }

    pub(super) fn triggered_at(&self) -> Option<usize> {
        self.triggered_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(threshold: f64) -> ExitCondition {
        ExitCondition::new(
            move |t: f64, _s: &[f64], _p: &Parameters| t >= threshold,
            2,
        )
    }

    #[test]
    fn without_condition_exit_index_is_points() {
        let mut tracker = ExitTracker::new(None, 10);

        for j in 0..10 {
            tracker.check(j, j as f64, &[], &Parameters::new());
        }

        assert_eq!(tracker.exit_index(), 10);
        assert_eq!(tracker.triggered_at(), None);
    }

    #[test]
    fn first_trigger_sets_exit_index() {
        let condition = after(3.0);
        let mut tracker = ExitTracker::new(Some(&condition), 10);

        for j in 0..8 {
            tracker.check(j, j as f64, &[], &Parameters::new());
        }

        assert_eq!(tracker.triggered_at(), Some(3));
        assert_eq!(tracker.exit_index(), 3 + 1 + 2);
    }

    #[test]
    fn later_triggers_are_ignored() {
        let condition = ExitCondition::new(|_t: f64, s: &[f64], _p: &Parameters| s[0] < 0.0, 0);
        let mut tracker = ExitTracker::new(Some(&condition), 100);
        let params = Parameters::new();

        tracker.check(0, 0.0, &[1.0], &params);
        tracker.check(1, 0.1, &[-1.0], &params);
        tracker.check(2, 0.2, &[1.0], &params);
        tracker.check(3, 0.3, &[-1.0], &params);

        assert_eq!(tracker.triggered_at(), Some(1));
        assert_eq!(tracker.exit_index(), 2);
    }

    #[test]
    fn exit_index_is_capped_at_points() {
        let condition = after(0.0);
        let mut tracker = ExitTracker::new(Some(&condition), 2);

        tracker.check(0, 0.0, &[], &Parameters::new());

        assert_eq!(tracker.exit_index(), 2);
    }
}
