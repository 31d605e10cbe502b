use crate::node::Node;
use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A trait for types an expression tree can be evaluated over.
/// Implemented for `f64` (plain values) and `Dual` (value plus first derivative).
pub trait Scalar:
    Copy
    + Debug
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Lifts a constant into the scalar type (zero infinitesimal part for duals).
    fn from_f64(value: f64) -> Self;

    /// Integer power, following `f64::powi` semantics for the real part.
    fn powi(self, n: i32) -> Self;
}

impl Scalar for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn powi(self, n: i32) -> Self {
        f64::powi(self, n)
    }
}

/// A real function of one variable that can produce its own derivative.
///
/// The root finders and the Taylor builder only ever talk to this trait, so they
/// work for any `Node` as well as for hand-written implementations in tests.
pub trait Differentiable {
    /// Evaluates the function at `x`.
    fn value_at(&self, x: f64) -> f64;

    /// Returns the symbolic derivative as a new expression tree.
    fn derivative(&self) -> Node;
}
