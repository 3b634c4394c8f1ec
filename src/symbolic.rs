/// # Expression tree
/// numbers, variables and named operations over an ordered list of operands
///# Example
/// ```
/// use RustedCalc::symbolic::expr_node::ExprNode;
/// let three_x = ExprNode::binary("*", ExprNode::number(3.0), ExprNode::variable("x"));
/// println!("three_x = {}", three_x);
/// assert_eq!(three_x.to_string(), "(3 * x)");
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod expr_node;
/// variable name -> bound expression
pub mod bindings;
pub mod evaluation_errors;
///____________________________________________________________________________________________________________________________
/// # Evaluation
/// turns an expression into a number, resolving variables through the bindings
///# Example
/// ```
/// use RustedCalc::symbolic::bindings::Bindings;
/// use RustedCalc::symbolic::evaluator::evaluate;
/// use RustedCalc::symbolic::expr_node::ExprNode;
/// let mut bindings = Bindings::new();
/// bindings.put("x", ExprNode::number(4.0));
/// let expr = ExprNode::binary("^", ExprNode::variable("x"), ExprNode::number(0.5));
/// assert_eq!(evaluate(&bindings, &expr), Ok(2.0));
/// ```
pub mod evaluator;
///____________________________________________________________________________________________________________________________
/// # Simplification
/// folds negate, +, - and * over numeric operands, leaving everything else in place
///# Example
/// ```
/// use RustedCalc::symbolic::bindings::Bindings;
/// use RustedCalc::symbolic::expr_node::ExprNode;
/// use RustedCalc::symbolic::simplifier::simplify;
/// let bindings = Bindings::new();
/// let expr = ExprNode::binary(
///     "+",
///     ExprNode::binary("*", ExprNode::number(2.0), ExprNode::number(3.0)),
///     ExprNode::variable("y"),
/// );
/// let simplified = simplify(&bindings, &expr).unwrap();
/// assert_eq!(simplified.to_string(), "(6 + y)");
/// ```
pub mod simplifier;
///____________________________________________________________________________________________________________________________
/// # Plotting
/// sweeps a variable over a range and hands the samples to a scatter plot renderer
///# Example
/// ```
/// use RustedCalc::Utils::plots::RecordingRenderer;
/// use RustedCalc::symbolic::bindings::Bindings;
/// use RustedCalc::symbolic::expr_node::ExprNode;
/// use RustedCalc::symbolic::plot_driver::plot;
/// let mut bindings = Bindings::new();
/// let node = ExprNode::operation(
///     "plot",
///     [
///         ExprNode::binary("*", ExprNode::number(3.0), ExprNode::variable("x")),
///         ExprNode::variable("x"),
///         ExprNode::number(2.0),
///         ExprNode::number(5.0),
///         ExprNode::number(0.5),
///     ],
/// );
/// let mut renderer = RecordingRenderer::new();
/// let result = plot(&mut bindings, &node, &mut renderer).unwrap();
/// assert_eq!(result.to_string(), "(3 * x)");
/// let recorded = renderer.last.unwrap();
/// assert_eq!(recorded.xs.len(), 7);
/// assert_eq!(recorded.ys[6], 15.0);
/// ```
pub mod plot_driver;
