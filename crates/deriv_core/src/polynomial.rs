use crate::traits::Scalar;
use serde::{Deserialize, Serialize};

/// Dense polynomial in `x`; `coefficients[i]` multiplies `x^i`.
///
/// An empty coefficient list is the zero polynomial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: impl Into<Vec<f64>>) -> Self {
        Self {
            coefficients: coefficients.into(),
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Index of the highest non-zero coefficient, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.iter().rposition(|&c| c != 0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.degree().is_none()
    }

    /// Horner evaluation.
    pub fn evaluate<T: Scalar>(&self, x: T) -> T {
        self.coefficients
            .iter()
            .rev()
            .fold(T::zero(), |acc, &c| acc * x + T::from_f64(c))
    }

    /// Term-wise derivative. The result keeps the input length: every
    /// coefficient shifts down one slot and the top slot becomes zero.
    pub fn derivative(&self) -> Polynomial {
        let n = self.coefficients.len();
        let mut out = vec![0.0; n];
        for i in 0..n.saturating_sub(1) {
            out[i] = (i + 1) as f64 * self.coefficients[i + 1];
        }
        Polynomial { coefficients: out }
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }
}
