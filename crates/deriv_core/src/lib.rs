pub mod autodiff;
pub mod display;
pub mod error;
pub mod node;
pub mod polynomial;
pub mod roots;
pub mod taylor;
/// The `deriv_core` crate models single-variable real functions as expression trees.
/// Every tree can be evaluated, rendered canonically, and differentiated symbolically.
///
/// Key components:
/// - **Node**: the closed set of expression kinds (constants, unary/binary/n-ary combinators, polynomials).
/// - **Traits**: `Scalar` (evaluate over `f64` or `Dual`) and `Differentiable` (what the algorithms consume).
/// - **Roots**: bisection and Newton–Raphson, generic over `Differentiable`.
/// - **Taylor**: Taylor polynomials around 0 built by repeated differentiation.
/// - **Autodiff**: Dual numbers for forward-mode checks of symbolic derivatives.
pub mod traits;

#[cfg(test)]
mod proptests;

pub use error::ExprError;
pub use node::{Node, Operands};
pub use polynomial::Polynomial;
pub use roots::{
    bisection_root, newton_root, BisectionResult, BisectionSettings, NewtonResult,
    NewtonSettings, DEFAULT_TOLERANCE,
};
pub use taylor::{taylor_coefficients, taylor_polynomial};
pub use traits::{Differentiable, Scalar};
