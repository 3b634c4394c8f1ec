use std::fmt;

/// Everything that can go wrong while evaluating, simplifying or plotting an expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// node is not an operation with the expected name and number of operands
    MalformedNode { expected: String, arity: usize },
    UndefinedVariable(String),
    UnknownOperator(String),
    /// plot sweep variable already has a binding
    VariableAlreadyDefined(String),
    MinimumLargerThanMaximum { min: f64, max: f64 },
    NonPositiveStep(f64),
    /// tree (or chain of bindings) nested deeper than the configured limit
    RecursionLimitExceeded { limit: usize },
    /// the sweep would take more samples than the configured cap
    TooManySamples { limit: usize },
    /// the rendering collaborator reported a failure
    RenderFailed(String),
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvaluationError::MalformedNode { expected, arity } => write!(
                f,
                "Node is not valid {} node (expected {} operand(s))",
                expected, arity
            ),
            EvaluationError::UndefinedVariable(name) => {
                write!(f, "Variable not found: {}", name)
            }
            EvaluationError::UnknownOperator(name) => write!(f, "Operator not found: {}", name),
            EvaluationError::VariableAlreadyDefined(name) => {
                write!(f, "Variable already defined: {}", name)
            }
            EvaluationError::MinimumLargerThanMaximum { min, max } => {
                write!(f, "Minimum larger than maximum: {} > {}", min, max)
            }
            EvaluationError::NonPositiveStep(step) => {
                write!(f, "Incrementation less than or equal to zero: {}", step)
            }
            EvaluationError::RecursionLimitExceeded { limit } => write!(
                f,
                "Expression nested deeper than {} levels (self-referencing variable?)",
                limit
            ),
            EvaluationError::TooManySamples { limit } => {
                write!(f, "Plot needs more than {} samples", limit)
            }
            EvaluationError::RenderFailed(msg) => write!(f, "Plot rendering failed: {}", msg),
        }
    }
}

impl std::error::Error for EvaluationError {}
