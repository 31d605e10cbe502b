use crate::node::Node;
use crate::traits::Differentiable;
use log::trace;

/// Coefficients `f^(i)(0) / i!` for `i = 0..=degree`.
///
/// Each derivative is built from the previous one, so the function is
/// differentiated exactly `degree` times.
pub fn taylor_coefficients<F: Differentiable + ?Sized>(function: &F, degree: usize) -> Vec<f64> {
    let mut coefficients = Vec::with_capacity(degree + 1);
    coefficients.push(function.value_at(0.0));
    if degree == 0 {
        return coefficients;
    }

    let mut current = function.derivative();
    let mut factorial = 1.0;
    for i in 1..=degree {
        let c = current.value_at(0.0) / factorial;
        trace!("taylor coefficient {i}: {c}");
        coefficients.push(c);
        factorial *= (i + 1) as f64;
        if i < degree {
            current = current.derivative();
        }
    }
    coefficients
}

/// Taylor polynomial of order `degree` around 0, as a `Polynomial` node.
pub fn taylor_polynomial<F: Differentiable + ?Sized>(function: &F, degree: usize) -> Node {
    Node::polynomial(taylor_coefficients(function, degree))
}
