use thiserror::Error;

/// Errors raised while building an expression tree.
///
/// Evaluation, rendering and differentiation of a well-formed tree cannot fail,
/// so this is the only error type the tree itself produces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("{combinator} requires at least one operand")]
    EmptyOperands { combinator: &'static str },
}
