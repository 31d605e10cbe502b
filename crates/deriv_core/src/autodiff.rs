use crate::traits::Scalar;
use num_traits::{One, Zero};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Dual number for forward-mode differentiation.
/// val: real part
/// eps: infinitesimal part (derivative with respect to the seeded variable)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dual {
    pub val: f64,
    pub eps: f64,
}

impl Dual {
    pub fn new(val: f64, eps: f64) -> Self {
        Self { val, eps }
    }

    /// Seeds the independent variable: d/dx x = 1.
    pub fn variable(x: f64) -> Self {
        Self::new(x, 1.0)
    }

    pub fn constant(value: f64) -> Self {
        Self::new(value, 0.0)
    }
}

impl Zero for Dual {
    fn zero() -> Self {
        Self::constant(0.0)
    }
    fn is_zero(&self) -> bool {
        self.val == 0.0 && self.eps == 0.0
    }
}

impl One for Dual {
    fn one() -> Self {
        Self::constant(1.0)
    }
}

impl Add for Dual {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.eps + rhs.eps)
    }
}

impl Sub for Dual {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.val - rhs.val, self.eps - rhs.eps)
    }
}

impl Mul for Dual {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.val * rhs.val, self.val * rhs.eps + self.eps * rhs.val)
    }
}

impl Div for Dual {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        let denom = rhs.val * rhs.val;
        Self::new(
            self.val / rhs.val,
            (self.eps * rhs.val - self.val * rhs.eps) / denom,
        )
    }
}

impl Neg for Dual {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.val, -self.eps)
    }
}

impl Scalar for Dual {
    fn from_f64(value: f64) -> Self {
        Self::constant(value)
    }

    fn powi(self, n: i32) -> Self {
        // d/dx u^0 is exactly zero; the general formula would give 0 * u^-1.
        if n == 0 {
            return Self::new(self.val.powi(0), 0.0);
        }
        Self::new(
            self.val.powi(n),
            (n as f64) * self.val.powi(n - 1) * self.eps,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Dual;
    use crate::traits::Scalar;

    #[test]
    fn product_and_quotient_rules() {
        let x = Dual::variable(3.0);
        let c = Dual::constant(2.0);

        let p = x * x * c;
        assert_eq!(p.val, 18.0);
        assert_eq!(p.eps, 12.0);

        let q = c / x;
        assert!((q.val - 2.0 / 3.0).abs() < 1e-15);
        assert!((q.eps + 2.0 / 9.0).abs() < 1e-15);
    }

    #[test]
    fn powi_applies_chain_rule() {
        let x = Dual::variable(2.0);
        let cube = x.powi(3);
        assert_eq!(cube.val, 8.0);
        assert_eq!(cube.eps, 12.0);

        let zeroth = Dual::variable(0.0).powi(0);
        assert_eq!(zeroth.val, 1.0);
        assert_eq!(zeroth.eps, 0.0);
    }

    #[test]
    fn negation_flips_both_parts() {
        let y = -Dual::new(1.5, -0.5);
        assert_eq!(y, Dual::new(-1.5, 0.5));
    }
}
