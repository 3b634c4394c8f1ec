//! # Expression Tree
//!
//! `ExprNode` is the tree handed over by the (external) parser: a literal number, a variable
//! reference, or a named operation whose ordered children live in an [`OrderedSequence`].
//! Operations carry their operator as a plain name, so a tree may mention operators the
//! evaluator does not know (`plot`, `toDouble`, `simplify`, user functions); those are only
//! rejected when evaluation reaches them.
//!
//! [`Operator`] names the operators the evaluator understands, together with their arity.

use crate::datastructures::ordered_sequence::OrderedSequence;
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Core expression tree
///
/// # Examples
/// ```rust, ignore
/// let three_x = ExprNode::binary("*", ExprNode::number(3.0), ExprNode::variable("x"));
/// assert_eq!(three_x.to_string(), "(3 * x)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ExprNode {
    /// numeric literal
    Number(f64),
    /// reference to a bound (or unbound) variable
    Variable(String),
    /// operator name applied to an ordered list of operands
    Operation(String, OrderedSequence<ExprNode>),
}

/// Operators understood by the evaluator. The string forms are the operator names used in
/// `ExprNode::Operation`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum Operator {
    #[strum(serialize = "negate")]
    Negate,
    #[strum(serialize = "sin")]
    Sin,
    #[strum(serialize = "cos")]
    Cos,
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "^")]
    Pow,
}

impl Operator {
    /// required number of operands
    pub fn arity(&self) -> usize {
        match self {
            Operator::Negate | Operator::Sin | Operator::Cos => 1,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Pow => 2,
        }
    }

    /// applies the operator to already evaluated operands (IEEE-754 semantics, no error on
    /// division by zero or invalid domains). `None` when `args.len()` differs from
    /// [`Operator::arity`].
    pub fn apply(&self, args: &[f64]) -> Option<f64> {
        let value = match (self, args) {
            (Operator::Negate, [a]) => -a,
            (Operator::Sin, [a]) => a.sin(),
            (Operator::Cos, [a]) => a.cos(),
            (Operator::Add, [a, b]) => a + b,
            (Operator::Sub, [a, b]) => a - b,
            (Operator::Mul, [a, b]) => a * b,
            (Operator::Div, [a, b]) => a / b,
            (Operator::Pow, [a, b]) => a.powf(*b),
            _ => return None,
        };
        Some(value)
    }

    fn is_infix(&self) -> bool {
        self.arity() == 2
    }
}

impl ExprNode {
    pub fn number(value: f64) -> ExprNode {
        ExprNode::Number(value)
    }

    pub fn variable(name: &str) -> ExprNode {
        ExprNode::Variable(name.to_string())
    }

    pub fn operation<I>(name: &str, children: I) -> ExprNode
    where
        I: IntoIterator<Item = ExprNode>,
    {
        ExprNode::Operation(name.to_string(), children.into_iter().collect())
    }

    pub fn unary(name: &str, child: ExprNode) -> ExprNode {
        Self::operation(name, [child])
    }

    pub fn binary(name: &str, lhs: ExprNode, rhs: ExprNode) -> ExprNode {
        Self::operation(name, [lhs, rhs])
    }

    pub fn is_number(&self) -> bool {
        matches!(self, ExprNode::Number(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, ExprNode::Variable(_))
    }

    pub fn is_operation(&self) -> bool {
        matches!(self, ExprNode::Operation(_, _))
    }

    /// value of a `Number` node
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            ExprNode::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// name of a `Variable` or `Operation` node
    pub fn name(&self) -> Option<&str> {
        match self {
            ExprNode::Variable(name) | ExprNode::Operation(name, _) => Some(name),
            ExprNode::Number(_) => None,
        }
    }

    /// operands of an `Operation` node
    pub fn children(&self) -> Option<&OrderedSequence<ExprNode>> {
        match self {
            ExprNode::Operation(_, children) => Some(children),
            _ => None,
        }
    }

    /// `Some(children)` when this is an operation called `expected_name` with exactly
    /// `expected_arity` operands
    pub fn operation_matching(
        &self,
        expected_name: &str,
        expected_arity: usize,
    ) -> Option<&OrderedSequence<ExprNode>> {
        match self {
            ExprNode::Operation(name, children)
                if name == expected_name && children.size() == expected_arity =>
            {
                Some(children)
            }
            _ => None,
        }
    }
}

impl From<f64> for ExprNode {
    fn from(value: f64) -> Self {
        ExprNode::Number(value)
    }
}

/// Infix rendering for the binary operators, call syntax for everything else.
impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExprNode::Number(value) => write!(f, "{}", value),
            ExprNode::Variable(name) => write!(f, "{}", name),
            ExprNode::Operation(name, children) => {
                let infix = name.parse::<Operator>().is_ok_and(|op| op.is_infix());
                if infix && children.size() == 2 {
                    let mut operands = children.iter();
                    if let (Some(lhs), Some(rhs)) = (operands.next(), operands.next()) {
                        return write!(f, "({} {} {})", lhs, name, rhs);
                    }
                }
                write!(f, "{}(", name)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_classification_is_exclusive() {
        let nodes = [
            ExprNode::number(1.0),
            ExprNode::variable("x"),
            ExprNode::unary("sin", ExprNode::variable("x")),
        ];
        for node in nodes.iter() {
            let flags = [node.is_number(), node.is_variable(), node.is_operation()];
            assert_eq!(flags.iter().filter(|flag| **flag).count(), 1);
        }
    }

    #[test]
    fn test_accessors() {
        let node = ExprNode::binary("+", ExprNode::number(3.0), ExprNode::variable("y"));
        assert_eq!(node.name(), Some("+"));
        assert_eq!(node.numeric_value(), None);
        let children = node.children().unwrap();
        assert_eq!(children.size(), 2);
        assert_eq!(children.get(1).unwrap().name(), Some("y"));
        assert_eq!(ExprNode::number(2.5).numeric_value(), Some(2.5));
        assert!(ExprNode::number(2.5).name().is_none());
        assert!(ExprNode::variable("x").children().is_none());
    }

    #[test]
    fn test_operator_names_round_trip() {
        for op in Operator::iter() {
            assert_eq!(Operator::from_str(&op.to_string()), Ok(op));
        }
        assert!(Operator::from_str("plot").is_err());
        assert_eq!(Operator::from_str("^").unwrap().arity(), 2);
        assert_eq!(Operator::from_str("negate").unwrap().arity(), 1);
    }

    #[test]
    fn test_apply_checks_operand_count() {
        assert_eq!(Operator::Add.apply(&[1.5, 2.0]), Some(3.5));
        assert_eq!(Operator::Negate.apply(&[4.0]), Some(-4.0));
        assert_eq!(Operator::Add.apply(&[1.0]), None);
        assert_eq!(Operator::Sin.apply(&[1.0, 2.0]), None);
        assert_eq!(Operator::Pow.apply(&[]), None);
    }

    #[test]
    fn test_display() {
        let node = ExprNode::binary(
            "*",
            ExprNode::number(3.0),
            ExprNode::unary("sin", ExprNode::variable("x")),
        );
        assert_eq!(node.to_string(), "(3 * sin(x))");
        let plot = ExprNode::operation(
            "plot",
            [
                ExprNode::variable("x"),
                ExprNode::variable("x"),
                ExprNode::number(0.0),
                ExprNode::number(1.0),
                ExprNode::number(0.5),
            ],
        );
        assert_eq!(plot.to_string(), "plot(x, x, 0, 1, 0.5)");
    }

    #[test]
    fn test_operation_matching() {
        let node = ExprNode::unary("toDouble", ExprNode::number(1.0));
        assert!(node.operation_matching("toDouble", 1).is_some());
        assert!(node.operation_matching("toDouble", 2).is_none());
        assert!(node.operation_matching("simplify", 1).is_none());
        assert!(ExprNode::variable("toDouble").operation_matching("toDouble", 0).is_none());
    }
}
