/// Control actions supported by the shooting solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the search and leave the problem unchanged.
    StopEarly,
}
