use std::fmt;

use crate::{Error, Parameters, StateVector};

/// A scalar function of time, the full state, and the parameters.
///
/// Derivatives, initializers, and shooting residuals all have this shape.
/// Implementations must not depend on anything but their arguments, and may
/// read any component of the state.
///
/// Closures of the form `Fn(f64, &[f64], &Parameters) -> f64` implement this
/// trait automatically.
pub trait StateFn {
    /// Evaluates the function at time `t`.
    fn evaluate(&self, t: f64, state: &[f64], params: &Parameters) -> f64;
}

impl<F> StateFn for F
where
    F: Fn(f64, &[f64], &Parameters) -> f64,
{
    fn evaluate(&self, t: f64, state: &[f64], params: &Parameters) -> f64 {
        self(t, state, params)
    }
}

/// A boolean test on time, the full state, and the parameters.
///
/// Closures of the form `Fn(f64, &[f64], &Parameters) -> bool` implement this
/// trait automatically.
pub trait Predicate {
    /// Returns `true` if the condition holds at time `t`.
    fn test(&self, t: f64, state: &[f64], params: &Parameters) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(f64, &[f64], &Parameters) -> bool,
{
    fn test(&self, t: f64, state: &[f64], params: &Parameters) -> bool {
        self(t, state, params)
    }
}

/// One first-order equation of the system.
///
/// The initial value comes from a fixed constant unless an initializer
/// function is attached, in which case the function wins.
pub struct Equation {
    name: String,
    derivative: Box<dyn StateFn>,
    initial_value: f64,
    initializer: Option<Box<dyn StateFn>>,
}

impl Equation {
    /// Creates an equation with an initial value of zero.
    pub fn new(name: impl Into<String>, derivative: impl StateFn + 'static) -> Self {
        Self {
            name: name.into(),
            derivative: Box::new(derivative),
            initial_value: 0.0,
            initializer: None,
        }
    }

    /// Sets the fixed initial value.
    #[must_use]
    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.initial_value = value;
        self
    }

    /// Computes the initial value from a function of the starting state.
    #[must_use]
    pub fn with_initializer(mut self, initializer: impl StateFn + 'static) -> Self {
        self.initializer = Some(Box::new(initializer));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Returns `true` if the initial value is computed by a function.
    #[must_use]
    pub fn initializes_from_function(&self) -> bool {
        self.initializer.is_some()
    }

    /// Evaluates the time derivative of this equation.
    pub fn derivative(&self, t: f64, state: &[f64], params: &Parameters) -> f64 {
        self.derivative.evaluate(t, state, params)
    }
}

impl fmt::Debug for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equation")
            .field("name", &self.name)
            .field("initial_value", &self.initial_value)
            .field("initializes_from_function", &self.initializes_from_function())
            .finish_non_exhaustive()
    }
}

/// Replaces the initial value of one equation for a single run.
///
/// Shooting solves use this to try candidate initial conditions without
/// touching the equation system itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialOverride {
    pub index: usize,
    pub value: f64,
}

/// An ordered, non-empty collection of equations.
#[derive(Debug)]
pub struct EquationSystem {
    equations: Vec<Equation>,
}

impl EquationSystem {
    /// Creates a system from its equations, in state order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySystem`] if `equations` is empty.
    pub fn new(equations: Vec<Equation>) -> Result<Self, Error> {
        if equations.is_empty() {
            return Err(Error::EmptySystem);
        }
        Ok(Self { equations })
    }

    /// Returns the number of equations, which is also the state length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    /// Always `false`; a system holds at least one equation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Returns the equation at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not a valid equation.
    pub fn equation(&self, index: usize) -> Result<&Equation, Error> {
        self.equations.get(index).ok_or(Error::IndexOutOfRange {
            kind: "equation",
            index,
            len: self.equations.len(),
        })
    }

    /// Iterates over the equation names in state order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.equations.iter().map(Equation::name)
    }

    /// Builds the starting state at `t_start`.
    ///
    /// Fixed initial values are written first for every component, with the
    /// override (if any) taking the place of its component's value. Function
    /// initializers then run in index order, each seeing the state built so
    /// far. The overridden component never runs its initializer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the override index is invalid.
    pub fn initialize(
        &self,
        t_start: f64,
        params: &Parameters,
        initial_override: Option<InitialOverride>,
    ) -> Result<StateVector, Error> {
        if let Some(InitialOverride { index, .. }) = initial_override {
            self.equation(index)?;
        }

        let mut state: StateVector = self
            .equations
            .iter()
            .enumerate()
            .map(|(i, eq)| match initial_override {
                Some(o) if o.index == i => o.value,
                _ => eq.initial_value,
            })
            .collect();

        for (i, eq) in self.equations.iter().enumerate() {
            if initial_override.is_some_and(|o| o.index == i) {
                continue;
            }
            if let Some(initializer) = &eq.initializer {
                state[i] = initializer.evaluate(t_start, &state, params);
            }
        }

        Ok(state)
    }

    /// Evaluates every derivative at `(t, state)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `state` does not have one
    /// component per equation.
    pub fn derivatives(
        &self,
        t: f64,
        state: &[f64],
        params: &Parameters,
    ) -> Result<StateVector, Error> {
        if state.len() != self.equations.len() {
            return Err(Error::LengthMismatch {
                expected: self.equations.len(),
                found: state.len(),
            });
        }
        Ok(self
            .equations
            .iter()
            .map(|eq| eq.derivative(t, state, params))
            .collect())
    }

    /// Overwrites the fixed initial value of the equation at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not a valid equation.
    pub fn set_initial_value(&mut self, index: usize, value: f64) -> Result<(), Error> {
        let len = self.equations.len();
        let eq = self.equations.get_mut(index).ok_or(Error::IndexOutOfRange {
            kind: "equation",
            index,
            len,
        })?;
        eq.initial_value = value;
        Ok(())
    }

    /// Detaches the initializer of the equation at `index`.
    ///
    /// Returns `true` if an initializer was removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not a valid equation.
    pub fn disable_initializer(&mut self, index: usize) -> Result<bool, Error> {
        let len = self.equations.len();
        let eq = self.equations.get_mut(index).ok_or(Error::IndexOutOfRange {
            kind: "equation",
            index,
            len,
        })?;
        Ok(eq.initializer.take().is_some())
    }
}
