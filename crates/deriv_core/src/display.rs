use crate::node::{Node, Operands};
use crate::polynomial::Polynomial;
use std::fmt::{self, Display, Formatter, Write};

/// Formats a number the way every rendered tree does: integral values without
/// a decimal point, everything else with the shortest round-tripping form.
/// Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    // f64's Display already drops the fractional part of integral values.
    value.to_string()
}

fn write_joined(f: &mut Formatter<'_>, operands: &Operands, separator: &str) -> fmt::Result {
    f.write_char('(')?;
    for (i, node) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{node}")?;
    }
    f.write_char(')')
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Constant(value) => write!(f, "({})", format_number(*value)),
            Node::Negation(operand) => write!(f, "(-{operand})"),
            Node::Sum(a, b) => write!(f, "({a} + {b})"),
            Node::Difference(a, b) => write!(f, "({a} - {b})"),
            Node::Product(a, b) => write!(f, "({a} * {b})"),
            Node::Quotient(a, b) => write!(f, "({a} / {b})"),
            Node::Power(base, exponent) => write!(f, "({base}^{exponent})"),
            Node::MultiSum(operands) => write_joined(f, operands, " + "),
            Node::MultiProduct(operands) => write_joined(f, operands, " * "),
            Node::Polynomial(p) => write!(f, "{p}"),
        }
    }
}

/// Terms run from the constant upwards. Zero terms are skipped, a unit
/// coefficient is dropped in front of `x`, and the first printed term carries
/// its sign as a bare `-`.
impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.coefficients().iter().all(|&c| c == 0.0) {
            return f.write_str("(0)");
        }

        f.write_char('(')?;
        let mut first = true;
        for (degree, &c) in self.coefficients().iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            match (c > 0.0, first) {
                (true, true) => {}
                (true, false) => f.write_str(" + ")?,
                (false, true) => f.write_char('-')?,
                (false, false) => f.write_str(" - ")?,
            }
            first = false;

            let magnitude = c.abs();
            if degree == 0 {
                f.write_str(&format_number(magnitude))?;
                continue;
            }
            if magnitude != 1.0 {
                f.write_str(&format_number(magnitude))?;
            }
            f.write_char('x')?;
            if degree >= 2 {
                write!(f, "^{degree}")?;
            }
        }
        f.write_char(')')
    }
}
