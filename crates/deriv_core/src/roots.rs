use crate::traits::Differentiable;
use anyhow::{bail, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Tolerance used when the caller does not pick one.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BisectionSettings {
    /// Stop once the bracket is at most this wide.
    pub tolerance: f64,
    pub max_steps: usize,
}

impl Default for BisectionSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_steps: 2200,
        }
    }
}

impl BisectionSettings {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewtonSettings {
    /// Stop once |f(x)| drops below this value.
    pub tolerance: f64,
    pub max_steps: usize,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_steps: 1000,
        }
    }
}

impl NewtonSettings {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BisectionResult {
    pub root: f64,
    pub iterations: usize,
    /// Width of the final bracket.
    pub width: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewtonResult {
    pub root: f64,
    /// |f(root)|
    pub residual: f64,
    pub iterations: usize,
}

/// Midpoint of `[left, right]` that stays finite for any finite endpoints.
fn midpoint(left: f64, right: f64) -> f64 {
    let mid = (left + right) / 2.0;
    if mid.is_finite() {
        mid
    } else {
        left / 2.0 + right / 2.0
    }
}

fn validate_tolerance(tolerance: f64) -> Result<()> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        bail!("tolerance must be positive and finite (got {:e}).", tolerance);
    }
    Ok(())
}

/// Interval-halving root search on `[a, b]`.
///
/// A sign change is assumed, not checked: each step keeps the right half when
/// `f(left) * f(mid) > 0` and the left half otherwise, so a non-bracketing
/// interval still converges to some point. The search also stops when the
/// midpoint can no longer be separated from an endpoint in floating point.
pub fn bisection_root<F: Differentiable + ?Sized>(
    function: &F,
    a: f64,
    b: f64,
    settings: BisectionSettings,
) -> Result<BisectionResult> {
    validate_tolerance(settings.tolerance)?;
    if settings.max_steps == 0 {
        bail!("max_steps must be greater than zero.");
    }
    if !(a.is_finite() && b.is_finite()) {
        bail!("Bisection bracket must be finite (got [{:e}, {:e}]).", a, b);
    }

    let mut left = a;
    let mut right = b;
    let mut iterations = 0usize;

    while right - left > settings.tolerance {
        if iterations >= settings.max_steps {
            bail!(
                "Bisection did not reach width {:e} in {} steps (width = {:e}).",
                settings.tolerance,
                settings.max_steps,
                right - left
            );
        }

        let mid = midpoint(left, right);
        if mid <= left || mid >= right {
            debug!(
                "bisection stalled at [{left}, {right}] after {iterations} steps; \
                 tolerance {:e} is below float spacing",
                settings.tolerance
            );
            break;
        }

        if function.value_at(left) * function.value_at(mid) > 0.0 {
            left = mid;
        } else {
            right = mid;
        }
        iterations += 1;
        trace!("bisection step {iterations}: [{left}, {right}]");
    }

    let root = midpoint(left, right);
    debug!("bisection finished after {iterations} steps at {root}");
    Ok(BisectionResult {
        root,
        iterations,
        width: right - left,
    })
}

/// Newton–Raphson iteration `x <- x - f(x) / f'(x)` from `initial_guess`.
///
/// The derivative is built once, symbolically. Iteration continues while
/// `|f(x)| >= tolerance`; hitting `max_steps` or producing a non-finite
/// iterate (for example from a zero derivative) is reported as an error.
pub fn newton_root<F: Differentiable + ?Sized>(
    function: &F,
    initial_guess: f64,
    settings: NewtonSettings,
) -> Result<NewtonResult> {
    validate_tolerance(settings.tolerance)?;
    if settings.max_steps == 0 {
        bail!("max_steps must be greater than zero.");
    }
    if !initial_guess.is_finite() {
        bail!("Initial guess must be finite (got {:e}).", initial_guess);
    }

    let derivative = function.derivative();
    let mut current = initial_guess;
    let mut residual = function.value_at(current);
    let mut iterations = 0usize;

    loop {
        if residual.abs() < settings.tolerance {
            break;
        }

        if iterations >= settings.max_steps {
            bail!(
                "Newton-Raphson failed to converge in {} steps (|f(x)| = {:e}).",
                settings.max_steps,
                residual.abs()
            );
        }

        let slope = derivative.value_at(current);
        let next = current - residual / slope;
        if !next.is_finite() {
            bail!(
                "Newton-Raphson produced a non-finite iterate at step {} (x = {:e}, f'(x) = {:e}).",
                iterations + 1,
                current,
                slope
            );
        }

        current = next;
        iterations += 1;
        residual = function.value_at(current);
        trace!("newton step {iterations}: x = {current}, f(x) = {residual}");
    }

    debug!("newton converged after {iterations} steps at {current}");
    Ok(NewtonResult {
        root: current,
        residual: residual.abs(),
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::{bisection_root, newton_root, BisectionSettings, NewtonSettings};
    use crate::node::Node;
    use crate::traits::Differentiable;

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    /// x^3 - 2x - 5, implemented directly against the trait.
    struct Wallis;

    const WALLIS_ROOT: f64 = 2.094_551_481_542_326_5;

    impl Differentiable for Wallis {
        fn value_at(&self, x: f64) -> f64 {
            (x * x - 2.0) * x - 5.0
        }

        fn derivative(&self) -> Node {
            Node::polynomial(vec![-2.0, 0.0, 3.0])
        }
    }

    fn x_squared_minus_four() -> Node {
        Node::polynomial(vec![-4.0, 0.0, 1.0])
    }

    #[test]
    fn bisection_finds_positive_root() {
        let f = x_squared_minus_four();
        let result = bisection_root(&f, 0.0, 5.0, BisectionSettings::with_tolerance(1e-5))
            .expect("bisection should run");
        assert!((result.root - 2.0).abs() <= 1e-5);
        assert!(result.width <= 1e-5);
        assert!(result.iterations > 0);
    }

    #[test]
    fn bisection_default_tolerance() {
        let f = Node::polynomial(vec![4.0, 0.0, -1.0]);
        let result =
            bisection_root(&f, -10.0, 0.0, BisectionSettings::default()).expect("bisection");
        assert!((result.root + 2.0).abs() <= 1e-5);
    }

    #[test]
    fn bisection_tight_tolerance_on_wide_bracket() {
        let f = x_squared_minus_four();
        let result = bisection_root(&f, 1.0, 900000.235, BisectionSettings::with_tolerance(1e-10))
            .expect("bisection");
        assert!((result.root - 2.0).abs() <= 1e-9);
    }

    #[test]
    fn bisection_stops_when_float_spacing_is_reached() {
        let f = x_squared_minus_four();
        let result = bisection_root(&f, 0.0, 5.0, BisectionSettings::with_tolerance(1e-300))
            .expect("bisection should stall, not spin");
        assert!((result.root - 2.0).abs() <= 1e-12);
    }

    #[test]
    fn bisection_default_cap_covers_the_whole_float_range() {
        // Halving 1e308 down to the smallest subnormal takes about 2100 steps.
        let f = Node::constant(1.0);
        let result = bisection_root(&f, -1e308, 0.0, BisectionSettings::with_tolerance(5e-324))
            .expect("a finite bracket must not exhaust the default step cap");
        assert!(result.root <= 0.0 && result.root >= -1e-300);
        assert!(result.iterations > 2000);
    }

    #[test]
    fn bisection_handles_brackets_near_f64_max() {
        // x - 1.5e308 on [1e308, 1.7e308]: left + right overflows.
        let f = Node::polynomial(vec![-1.5e308, 1.0]);
        let result = bisection_root(&f, 1e308, 1.7e308, BisectionSettings::default())
            .expect("bisection");
        assert!(result.root.is_finite());
        assert!((result.root - 1.5e308).abs() <= 1e-12 * 1.5e308);
    }

    #[test]
    fn step_cap_error_uses_scientific_notation() {
        let f = x_squared_minus_four();
        let settings = BisectionSettings {
            tolerance: 1e-300,
            max_steps: 3,
        };
        let err = bisection_root(&f, 0.0, 5.0, settings).expect_err("cap should fire");
        assert_eq!(
            err.to_string(),
            "Bisection did not reach width 1e-300 in 3 steps (width = 6.25e-1)."
        );
        assert_err_contains(
            newton_root(&f, 1.0, NewtonSettings::with_tolerance(-1e-300)),
            "(got -1e-300)",
        );
    }

    #[test]
    fn bisection_without_sign_change_still_terminates() {
        // x^2 + 1 has no real root; the bracket collapses onto the right end.
        let f = Node::polynomial(vec![1.0, 0.0, 1.0]);
        let result = bisection_root(&f, 0.0, 1.0, BisectionSettings::default())
            .expect("bisection does not check for a sign change");
        assert!(result.root > 1.0 - 1e-4);
    }

    #[test]
    fn root_finders_work_on_plain_trait_impl() {
        let result = bisection_root(&Wallis, 2.0, 3.0, BisectionSettings::with_tolerance(1e-12))
            .expect("bisection");
        assert!((result.root - WALLIS_ROOT).abs() < 1e-11);

        let result = newton_root(&Wallis, 2.0, NewtonSettings::with_tolerance(1e-12))
            .expect("newton");
        assert!((result.root - WALLIS_ROOT).abs() < 1e-12);
    }

    #[test]
    fn bisection_rejects_invalid_settings() {
        let f = x_squared_minus_four();
        assert_err_contains(
            bisection_root(&f, 0.0, 5.0, BisectionSettings::with_tolerance(-1.0)),
            "tolerance must be positive",
        );
        assert_err_contains(
            bisection_root(
                &f,
                0.0,
                5.0,
                BisectionSettings {
                    tolerance: 1e-5,
                    max_steps: 0,
                },
            ),
            "max_steps",
        );
        assert_err_contains(
            bisection_root(&f, f64::NEG_INFINITY, 5.0, BisectionSettings::default()),
            "must be finite",
        );
    }

    #[test]
    fn newton_converges_to_two() {
        let f = x_squared_minus_four();
        let result =
            newton_root(&f, 2.5, NewtonSettings::with_tolerance(1e-5)).expect("newton");
        assert!((result.root - 2.0).abs() <= 1e-5);
        assert!(result.residual < 1e-5);
        assert!(result.iterations >= 1);
    }

    #[test]
    fn newton_returns_guess_when_already_converged() {
        let f = x_squared_minus_four();
        let result = newton_root(&f, 2.0, NewtonSettings::default()).expect("newton");
        assert_eq!(result.root, 2.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn newton_on_rational_function() {
        // (x^2 - 4) / (x^2 + x^4)
        let f = Node::quotient(x_squared_minus_four(), Node::polynomial(vec![0.0, 0.0, 1.0, 0.0, 1.0]));
        let result = newton_root(&f, 2.1, NewtonSettings::with_tolerance(1e-10)).expect("newton");
        assert!((result.root - 2.0).abs() < 1e-8);
    }

    #[test]
    fn newton_reports_zero_derivative() {
        let f = x_squared_minus_four();
        assert_err_contains(
            newton_root(&f, 0.0, NewtonSettings::default()),
            "non-finite iterate",
        );
    }

    #[test]
    fn newton_reports_non_convergence() {
        // x^2 + 1 never reaches zero; iterates bounce around forever.
        let f = Node::polynomial(vec![1.0, 0.0, 1.0]);
        assert_err_contains(
            newton_root(
                &f,
                0.5,
                NewtonSettings {
                    tolerance: 1e-5,
                    max_steps: 50,
                },
            ),
            "failed to converge in 50 steps",
        );
    }

    #[test]
    fn newton_rejects_invalid_settings() {
        let f = x_squared_minus_four();
        assert_err_contains(
            newton_root(&f, 1.0, NewtonSettings::with_tolerance(0.0)),
            "tolerance must be positive",
        );
        assert_err_contains(newton_root(&f, f64::NAN, NewtonSettings::default()), "Initial guess");
    }
}
