//! # Numeric Evaluation
//!
//! Reduces an [`ExprNode`] to an `f64` under a set of [`Bindings`]. Variables are resolved by
//! evaluating whatever expression they are bound to, so a binding may itself be symbolic.
//! All arithmetic follows IEEE-754: `1/0` is `inf`, `0/0` and `(-8)^(1/3)` are `NaN`, and
//! none of these are errors.
//!
//! Operands are always evaluated left to right. Recursion depth is bounded by `max_depth`;
//! exceeding it yields [`EvaluationError::RecursionLimitExceeded`] instead of overflowing the
//! stack (this also catches `x := x + 1`). Each level runs under `stacker::maybe_grow`, so the
//! limit holds on small thread stacks and in debug builds.
use crate::symbolic::bindings::Bindings;
use crate::symbolic::evaluation_errors::EvaluationError;
use crate::symbolic::expr_node::{ExprNode, Operator};
use std::str::FromStr;

/// default nesting limit for evaluation and simplification
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// free stack below which a recursive walker switches to a fresh segment
pub(crate) const STACK_RED_ZONE: usize = 64 * 1024;
/// size of each extra stack segment
pub(crate) const STACK_GROW_SIZE: usize = 2 * 1024 * 1024;

pub struct Evaluator<'a> {
    bindings: &'a Bindings,
    max_depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(bindings: &'a Bindings) -> Self {
        Evaluator {
            bindings,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn evaluate(&self, node: &ExprNode) -> Result<f64, EvaluationError> {
        self.evaluate_at(node, 0)
    }

    fn evaluate_at(&self, node: &ExprNode, depth: usize) -> Result<f64, EvaluationError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.evaluate_level(node, depth)
        })
    }

    fn evaluate_level(&self, node: &ExprNode, depth: usize) -> Result<f64, EvaluationError> {
        if depth > self.max_depth {
            return Err(EvaluationError::RecursionLimitExceeded {
                limit: self.max_depth,
            });
        }
        match node {
            ExprNode::Number(value) => Ok(*value),
            ExprNode::Variable(name) => {
                let bound = self
                    .bindings
                    .get(name)
                    .map_err(|_| EvaluationError::UndefinedVariable(name.clone()))?;
                self.evaluate_at(bound, depth + 1)
            }
            ExprNode::Operation(name, children) => {
                let operator = Operator::from_str(name)
                    .map_err(|_| EvaluationError::UnknownOperator(name.clone()))?;
                let malformed = || EvaluationError::MalformedNode {
                    expected: name.clone(),
                    arity: operator.arity(),
                };
                if children.size() != operator.arity() {
                    return Err(malformed());
                }
                let mut operands = Vec::with_capacity(operator.arity());
                for child in children.iter() {
                    operands.push(self.evaluate_at(child, depth + 1)?);
                }
                operator.apply(&operands).ok_or_else(malformed)
            }
        }
    }
}

/// evaluates `node` with the default depth limit
pub fn evaluate(bindings: &Bindings, node: &ExprNode) -> Result<f64, EvaluationError> {
    Evaluator::new(bindings).evaluate(node)
}

/// `toDouble(inner)`: evaluates `inner` and wraps the result in a `Number` node
pub fn handle_to_double(bindings: &Bindings, node: &ExprNode) -> Result<ExprNode, EvaluationError> {
    let malformed = || EvaluationError::MalformedNode {
        expected: "toDouble".to_string(),
        arity: 1,
    };
    let inner = node
        .operation_matching("toDouble", 1)
        .and_then(|children| children.front())
        .ok_or_else(malformed)?;
    Ok(ExprNode::Number(evaluate(bindings, inner)?))
}
