use std::ops::Index;

use crate::Error;

/// A named scalar parameter read by the equations.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
}

/// An ordered, fixed-length set of parameters.
///
/// The number of parameters is fixed once the set is built. Values can be
/// changed in place, which is how a shooting solve applies a resolved
/// parameter.
///
/// Indexing yields the parameter value, so equations can read `params[0]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter and returns the extended set.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.push(Parameter {
            name: name.into(),
            value,
        });
        self
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the parameter at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.0.get(index)
    }

    /// Returns the value of the parameter named `name`, if any.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|p| p.name == name).map(|p| p.value)
    }

    /// Overwrites the value of the parameter at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not a valid parameter.
    pub fn set_value(&mut self, index: usize, value: f64) -> Result<(), Error> {
        let len = self.0.len();
        let parameter = self.0.get_mut(index).ok_or(Error::IndexOutOfRange {
            kind: "parameter",
            index,
            len,
        })?;
        parameter.value = value;
        Ok(())
    }

    /// Iterates over the parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.0.iter()
    }
}

impl Index<usize> for Parameters {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index].value
    }
}
