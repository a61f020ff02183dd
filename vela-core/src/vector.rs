//! The `Vector` value type.
//!
//! Component management (`push`, `remove`, `clear`) mutates the vector in place.
//! Elementwise arithmetic (`add`, `sub`, `mul`, `div`) never touches its operands
//! and returns a freshly owned vector.

use ndarray::{Array1, ArrayView1};
use std::fmt;
use std::ops;
use tracing::{trace, warn};

use crate::error::{VelaError, VelaResult};
use crate::input::Position;

/// A mathematical vector of runtime-determined dimensionality.
///
/// Equality (`==` and [`Vector::equals`]) is exact: same dimensions and
/// bitwise-equal components, no epsilon. NaN components never compare equal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector {
    components: Vec<f64>,
}

impl Vector {
    /// Number of components.
    pub fn dimensions(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.components
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.components.iter()
    }

    /// Copies the components into an `ndarray` array.
    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(self.components.clone())
    }

    fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(self.components.as_slice())
    }

    fn locate(&self, index: Position) -> VelaResult<Option<usize>> {
        index.locate(self.dimensions()).map_err(|e| {
            warn!(index = %index, dimensions = self.dimensions(), "Rejected vector index");
            e
        })
    }

    /// Retrieves the component at `index`.
    ///
    /// Returns `Ok(None)` when the index is past the end. Absent, negative and
    /// fractional indices fail with [`VelaError::InvalidIndex`].
    pub fn get(&self, index: impl Into<Position>) -> VelaResult<Option<f64>> {
        Ok(self.locate(index.into())?.map(|i| self.components[i]))
    }

    /// Appends a component and returns its index.
    pub fn push(&mut self, value: impl Into<Option<f64>>) -> VelaResult<usize> {
        let value = value.into().ok_or_else(|| {
            warn!(dimensions = self.dimensions(), "Rejected absent component push");
            VelaError::InvalidInput("pushed component cannot be null or undefined".to_string())
        })?;
        self.components.push(value);
        Ok(self.components.len() - 1)
    }

    /// Removes the component at `index`, shifting later components down.
    ///
    /// Validates like [`Vector::get`]. A past-the-end index returns `Ok(None)`
    /// and leaves the vector untouched.
    pub fn remove(&mut self, index: impl Into<Position>) -> VelaResult<Option<f64>> {
        Ok(self.locate(index.into())?.map(|i| self.components.remove(i)))
    }

    /// Removes every component.
    pub fn clear(&mut self) -> &mut Self {
        self.components.clear();
        self
    }

    /// Resolves a binary-operation operand, checking presence and dimensions.
    fn operand<'a>(&self, other: Option<&'a Vector>, op: &'static str) -> VelaResult<&'a Vector> {
        let other = other.ok_or_else(|| {
            warn!(op, "Rejected absent operand");
            VelaError::InvalidInput("input vector cannot be null or undefined".to_string())
        })?;
        if other.dimensions() != self.dimensions() {
            warn!(op, expected = self.dimensions(), actual = other.dimensions(), "Rejected operand with mismatched dimensions");
            return Err(VelaError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(other)
    }

    /// Applies `f` to both views and validates the result like a freshly constructed vector.
    ///
    /// A NaN component (`inf - inf`, `0 * inf`, or a NaN already held by an operand)
    /// fails the whole operation with [`VelaError::InvalidInput`].
    fn elementwise<F>(&self, rhs: &Vector, op: &'static str, f: F) -> VelaResult<Vector>
    where
        F: Fn(&ArrayView1<'_, f64>, &ArrayView1<'_, f64>) -> Array1<f64>,
    {
        trace!(op, dimensions = self.dimensions(), "Elementwise operation");
        let result = f(&self.view(), &rhs.view());
        if let Some(position) = result.iter().position(|v| v.is_nan()) {
            warn!(op, position, "Rejected elementwise result with a NaN component");
            return Err(VelaError::InvalidInput(format!(
                "{} produced a non-number at component {}",
                op, position
            )));
        }
        Ok(Vector::from(result.to_vec()))
    }

    /// Componentwise `self + other`.
    pub fn add<'a>(&self, other: impl Into<Option<&'a Vector>>) -> VelaResult<Vector> {
        let rhs = self.operand(other.into(), "add")?;
        self.elementwise(rhs, "add", |a, b| a + b)
    }

    /// Componentwise `self - other`.
    pub fn sub<'a>(&self, other: impl Into<Option<&'a Vector>>) -> VelaResult<Vector> {
        let rhs = self.operand(other.into(), "sub")?;
        self.elementwise(rhs, "sub", |a, b| a - b)
    }

    /// Componentwise `self * other`.
    pub fn mul<'a>(&self, other: impl Into<Option<&'a Vector>>) -> VelaResult<Vector> {
        let rhs = self.operand(other.into(), "mul")?;
        self.elementwise(rhs, "mul", |a, b| a * b)
    }

    /// Componentwise `self / other`.
    ///
    /// Fails with [`VelaError::DivisionByZero`] if any divisor component is zero;
    /// no result is produced in that case.
    pub fn div<'a>(&self, other: impl Into<Option<&'a Vector>>) -> VelaResult<Vector> {
        let rhs = self.operand(other.into(), "div")?;
        if let Some(index) = rhs.iter().position(|&d| d == 0.0) {
            warn!(index, "Rejected division by a zero component");
            return Err(VelaError::DivisionByZero { index });
        }
        self.elementwise(rhs, "div", |a, b| a / b)
    }

    /// Euclidean norm. Fails with [`VelaError::EmptyVector`] on a zero-dimensional vector.
    pub fn length(&self) -> VelaResult<f64> {
        if self.is_empty() {
            return Err(VelaError::EmptyVector);
        }
        let view = self.view();
        Ok(view.dot(&view).sqrt())
    }

    /// Exact structural equality. Differing dimensions or an absent operand give `false`.
    pub fn equals<'a>(&self, other: impl Into<Option<&'a Vector>>) -> bool {
        other.into().map_or(false, |other| self == other)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Vector[Empty]");
        }
        write!(f, "Vector[")?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write_component(f, *component)?;
        }
        write!(f, "]")
    }
}

/// Writes one component in the conventional number-to-string form: `0` for both
/// zeros, `Infinity`/`-Infinity`, and exponent notation (`1e+21`, `1e-7`) outside
/// `[1e-6, 1e21)`.
fn write_component(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return write!(f, "NaN");
    }
    if value.is_infinite() {
        return write!(f, "{}", if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return write!(f, "0");
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{}", value);
    }
    let exponent = format!("{:e}", value);
    match exponent.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{}e+{}", mantissa, power),
        _ => write!(f, "{}", exponent),
    }
}

// Operator forms return the same Result as the named methods.
impl<'a> ops::Add<&'a Vector> for &Vector {
    type Output = VelaResult<Vector>;

    fn add(self, rhs: &'a Vector) -> Self::Output {
        Vector::add(self, rhs)
    }
}

impl<'a> ops::Sub<&'a Vector> for &Vector {
    type Output = VelaResult<Vector>;

    fn sub(self, rhs: &'a Vector) -> Self::Output {
        Vector::sub(self, rhs)
    }
}

impl<'a> ops::Mul<&'a Vector> for &Vector {
    type Output = VelaResult<Vector>;

    fn mul(self, rhs: &'a Vector) -> Self::Output {
        Vector::mul(self, rhs)
    }
}

impl<'a> ops::Div<&'a Vector> for &Vector {
    type Output = VelaResult<Vector>;

    fn div(self, rhs: &'a Vector) -> Self::Output {
        Vector::div(self, rhs)
    }
}

// Unchecked: components are taken as-is, NaN included. Use the factory for validated input.
impl From<Vec<f64>> for Vector {
    fn from(components: Vec<f64>) -> Self {
        Vector { components }
    }
}

impl From<Vector> for Vec<f64> {
    fn from(vector: Vector) -> Self {
        vector.components
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from(iter.into_iter().collect::<Vec<f64>>())
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
