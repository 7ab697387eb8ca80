/// Receives solver events and decides how the iteration should proceed.
///
/// Shooting solves emit one event per bisection trial. An observer can log
/// the bracket, record residuals, or stop the search.
///
/// `observe` returns `Some(action)` to request a solver-specific action and
/// `None` to let the solver continue.
///
/// Closures implement `Observer` automatically, and `()` is a no-op observer.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
