use crate::autodiff::Dual;
use crate::error::ExprError;
use crate::polynomial::Polynomial;
use crate::traits::{Differentiable, Scalar};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Expression tree over the single variable `x`.
///
/// Every combinator owns its children. Trees are built bottom-up and never
/// mutated afterwards; `derivative` always returns a fresh tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Constant(f64),
    Negation(Box<Node>),
    Sum(Box<Node>, Box<Node>),
    Difference(Box<Node>, Box<Node>),
    Product(Box<Node>, Box<Node>),
    /// numerator, denominator
    Quotient(Box<Node>, Box<Node>),
    /// base, integer exponent
    Power(Box<Node>, i32),
    MultiSum(Operands),
    MultiProduct(Operands),
    Polynomial(Polynomial),
}

/// Non-empty, ordered operand list of an n-ary combinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Node>", into = "Vec<Node>")]
pub struct Operands(Vec<Node>);

impl Operands {
    fn new(nodes: Vec<Node>, combinator: &'static str) -> Result<Self, ExprError> {
        if nodes.is_empty() {
            return Err(ExprError::EmptyOperands { combinator });
        }
        Ok(Self(nodes))
    }

    /// Wraps a list the caller already knows to be non-empty.
    fn from_nonempty(nodes: Vec<Node>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self(nodes)
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a list built through the public constructors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.0.iter()
    }

    /// Builds the `index`-th term of the generalized product rule: the
    /// precomputed `derivative` first, followed by every other operand of
    /// `operands` in order.
    fn partial_product(derivative: Node, index: usize, operands: &[Node]) -> Self {
        let mut factors = Vec::with_capacity(operands.len());
        factors.push(derivative);
        factors.extend(
            operands
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, node)| node.clone()),
        );
        Self(factors)
    }
}

impl TryFrom<Vec<Node>> for Operands {
    type Error = ExprError;

    fn try_from(nodes: Vec<Node>) -> Result<Self, Self::Error> {
        Self::new(nodes, "n-ary combinator")
    }
}

impl From<Operands> for Vec<Node> {
    fn from(operands: Operands) -> Self {
        operands.0
    }
}

impl<'a> IntoIterator for &'a Operands {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// --- Constructors ---

impl Node {
    pub fn constant(value: f64) -> Self {
        Node::Constant(value)
    }

    pub fn negation(operand: Node) -> Self {
        Node::Negation(Box::new(operand))
    }

    pub fn sum(left: Node, right: Node) -> Self {
        Node::Sum(Box::new(left), Box::new(right))
    }

    pub fn difference(left: Node, right: Node) -> Self {
        Node::Difference(Box::new(left), Box::new(right))
    }

    pub fn product(left: Node, right: Node) -> Self {
        Node::Product(Box::new(left), Box::new(right))
    }

    pub fn quotient(numerator: Node, denominator: Node) -> Self {
        Node::Quotient(Box::new(numerator), Box::new(denominator))
    }

    pub fn power(base: Node, exponent: i32) -> Self {
        Node::Power(Box::new(base), exponent)
    }

    /// Sum of an arbitrary number of operands. Fails on an empty list.
    pub fn multi_sum(operands: Vec<Node>) -> Result<Self, ExprError> {
        Operands::new(operands, "MultiSum").map(Node::MultiSum)
    }

    /// Product of an arbitrary number of operands. Fails on an empty list.
    pub fn multi_product(operands: Vec<Node>) -> Result<Self, ExprError> {
        Operands::new(operands, "MultiProduct").map(Node::MultiProduct)
    }

    pub fn polynomial(coefficients: impl Into<Vec<f64>>) -> Self {
        Node::Polynomial(Polynomial::new(coefficients))
    }

    /// The identity function `x`.
    pub fn x() -> Self {
        Node::polynomial(vec![0.0, 1.0])
    }
}

// --- Evaluation ---

impl Node {
    /// Evaluates the tree at `x` over any scalar type.
    /// Division by zero follows IEEE-754 semantics.
    pub fn evaluate<T: Scalar>(&self, x: T) -> T {
        match self {
            Node::Constant(value) => T::from_f64(*value),
            Node::Negation(operand) => -operand.evaluate(x),
            Node::Sum(f, g) => f.evaluate(x) + g.evaluate(x),
            Node::Difference(f, g) => f.evaluate(x) - g.evaluate(x),
            Node::Product(f, g) => f.evaluate(x) * g.evaluate(x),
            Node::Quotient(f, g) => f.evaluate(x) / g.evaluate(x),
            Node::Power(base, exponent) => base.evaluate(x).powi(*exponent),
            Node::MultiSum(operands) => operands
                .iter()
                .fold(T::zero(), |acc, node| acc + node.evaluate(x)),
            Node::MultiProduct(operands) => operands
                .iter()
                .fold(T::one(), |acc, node| acc * node.evaluate(x)),
            Node::Polynomial(p) => p.evaluate(x),
        }
    }

    pub fn value_at(&self, x: f64) -> f64 {
        self.evaluate(x)
    }

    /// Value and first derivative at `x` from a single forward-mode pass.
    /// Independent of `derivative`, so it can be used to check it.
    pub fn tangent_at(&self, x: f64) -> (f64, f64) {
        let out = self.evaluate(Dual::variable(x));
        (out.val, out.eps)
    }
}

// --- Differentiation ---

impl Node {
    /// Symbolic derivative with respect to `x`. No simplification is applied,
    /// so repeated differentiation grows the tree.
    pub fn derivative(&self) -> Node {
        match self {
            Node::Constant(_) => Node::Constant(0.0),
            Node::Negation(f) => Node::negation(f.derivative()),
            Node::Sum(f, g) => Node::sum(f.derivative(), g.derivative()),
            Node::Difference(f, g) => Node::difference(f.derivative(), g.derivative()),
            // (f' * g) + (g' * f)
            Node::Product(f, g) => Node::sum(
                Node::product(f.derivative(), (**g).clone()),
                Node::product(g.derivative(), (**f).clone()),
            ),
            // ((f' * g) - (g' * f)) / g^2
            Node::Quotient(f, g) => Node::quotient(
                Node::difference(
                    Node::product(f.derivative(), (**g).clone()),
                    Node::product(g.derivative(), (**f).clone()),
                ),
                Node::power((**g).clone(), 2),
            ),
            Node::Power(base, exponent) => {
                if *exponent == 1 {
                    return base.derivative();
                }
                // e * base^(e-1) * base'
                Node::MultiProduct(Operands::from_nonempty(vec![
                    Node::Constant(f64::from(*exponent)),
                    Node::power((**base).clone(), exponent.saturating_sub(1)),
                    base.derivative(),
                ]))
            }
            Node::MultiSum(operands) => Node::MultiSum(Operands::from_nonempty(
                operands.iter().map(Node::derivative).collect(),
            )),
            Node::MultiProduct(operands) => {
                let factors = operands.as_slice();
                let terms = factors
                    .iter()
                    .map(Node::derivative)
                    .enumerate()
                    .map(|(i, d)| Node::MultiProduct(Operands::partial_product(d, i, factors)))
                    .collect();
                Node::MultiSum(Operands::from_nonempty(terms))
            }
            Node::Polynomial(p) => Node::Polynomial(p.derivative()),
        }
    }

    /// Differentiates `n` times; `n == 0` returns a copy of the tree.
    pub fn nth_derivative(&self, n: usize) -> Node {
        let mut current = self.clone();
        for _ in 0..n {
            current = current.derivative();
        }
        current
    }
}

// --- Structure ---

impl Node {
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Constant(_) | Node::Polynomial(_) => Vec::new(),
            Node::Negation(f) | Node::Power(f, _) => vec![f.as_ref()],
            Node::Sum(f, g) | Node::Difference(f, g) | Node::Product(f, g) | Node::Quotient(f, g) => {
                vec![f.as_ref(), g.as_ref()]
            }
            Node::MultiSum(operands) | Node::MultiProduct(operands) => operands.iter().collect(),
        }
    }

    /// Total number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::node_count)
            .sum::<usize>()
    }

    /// Length of the longest root-to-leaf path; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }
}

impl Differentiable for Node {
    fn value_at(&self, x: f64) -> f64 {
        Node::value_at(self, x)
    }

    fn derivative(&self) -> Node {
        Node::derivative(self)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Constant(value)
    }
}

impl From<Polynomial> for Node {
    fn from(p: Polynomial) -> Self {
        Node::Polynomial(p)
    }
}

impl Add for Node {
    type Output = Node;
    fn add(self, rhs: Node) -> Node {
        Node::sum(self, rhs)
    }
}

impl Sub for Node {
    type Output = Node;
    fn sub(self, rhs: Node) -> Node {
        Node::difference(self, rhs)
    }
}

impl Mul for Node {
    type Output = Node;
    fn mul(self, rhs: Node) -> Node {
        Node::product(self, rhs)
    }
}

impl Div for Node {
    type Output = Node;
    fn div(self, rhs: Node) -> Node {
        Node::quotient(self, rhs)
    }
}

impl Neg for Node {
    type Output = Node;
    fn neg(self) -> Node {
        Node::negation(self)
    }
}
