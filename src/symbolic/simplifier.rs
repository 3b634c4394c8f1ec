//! # Constant Folding
//!
//! Only four folds exist: `negate(NUM)`, `NUM + NUM`, `NUM - NUM` and `NUM * NUM`. Division,
//! exponentiation and the trigonometric functions are rebuilt with simplified operands but
//! never folded, so `simplify(1 / 3)` stays `(1 / 3)`.
//!
//! A bound variable is replaced by its binding only when the binding simplifies all the way to
//! a number. Otherwise the binding is returned as it is stored, not in its partially simplified
//! form.
//!
//! The caller's tree is never touched: operands are simplified into a fresh sequence.
use crate::datastructures::ordered_sequence::OrderedSequence;
use crate::symbolic::bindings::Bindings;
use crate::symbolic::evaluation_errors::EvaluationError;
use crate::symbolic::evaluator::{DEFAULT_MAX_DEPTH, STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::symbolic::expr_node::{ExprNode, Operator};
use log::debug;

pub struct Simplifier<'a> {
    bindings: &'a Bindings,
    max_depth: usize,
}

fn is_foldable(operator: Operator) -> bool {
    matches!(
        operator,
        Operator::Negate | Operator::Add | Operator::Sub | Operator::Mul
    )
}

impl<'a> Simplifier<'a> {
    pub fn new(bindings: &'a Bindings) -> Self {
        Simplifier {
            bindings,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// fails only when the tree or a chain of bindings nests deeper than `max_depth`
    pub fn simplify(&self, node: &ExprNode) -> Result<ExprNode, EvaluationError> {
        let simplified = self.simplify_at(node, 0)?;
        debug!("simplified {} -> {}", node, simplified);
        Ok(simplified)
    }

    fn simplify_at(&self, node: &ExprNode, depth: usize) -> Result<ExprNode, EvaluationError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.simplify_level(node, depth)
        })
    }

    fn simplify_level(&self, node: &ExprNode, depth: usize) -> Result<ExprNode, EvaluationError> {
        if depth > self.max_depth {
            return Err(EvaluationError::RecursionLimitExceeded {
                limit: self.max_depth,
            });
        }
        match node {
            ExprNode::Number(_) => Ok(node.clone()),
            ExprNode::Variable(name) => match self.bindings.get(name) {
                Ok(bound) => {
                    let simplified = self.simplify_at(bound, depth + 1)?;
                    if simplified.is_number() {
                        Ok(simplified)
                    } else {
                        Ok(bound.clone())
                    }
                }
                Err(_) => Ok(node.clone()),
            },
            ExprNode::Operation(name, operands) => {
                let mut children = OrderedSequence::new();
                for child in operands.iter() {
                    if child.is_number() {
                        children.add(child.clone());
                    } else {
                        children.add(self.simplify_at(child, depth + 1)?);
                    }
                }
                Ok(Self::fold(name, children))
            }
        }
    }

    fn fold(name: &str, children: OrderedSequence<ExprNode>) -> ExprNode {
        let values: Option<Vec<f64>> = children.iter().map(ExprNode::numeric_value).collect();
        if let (Ok(operator), Some(values)) = (name.parse::<Operator>(), values) {
            if is_foldable(operator) {
                if let Some(value) = operator.apply(&values) {
                    return ExprNode::Number(value);
                }
            }
        }
        ExprNode::Operation(name.to_string(), children)
    }
}

/// simplifies `node` with the default depth limit
pub fn simplify(bindings: &Bindings, node: &ExprNode) -> Result<ExprNode, EvaluationError> {
    Simplifier::new(bindings).simplify(node)
}

/// `simplify(inner)`: returns the simplified `inner`
pub fn handle_simplify(bindings: &Bindings, node: &ExprNode) -> Result<ExprNode, EvaluationError> {
    let inner = node
        .operation_matching("simplify", 1)
        .and_then(|children| children.front())
        .ok_or_else(|| EvaluationError::MalformedNode {
            expected: "simplify".to_string(),
            arity: 1,
        })?;
    simplify(bindings, inner)
}
