//! # Parametric Scatter Plot
//!
//! `plot(exprToPlot, var, varMin, varMax, step)` sweeps `var` from `varMin` to `varMax`
//! (inclusive) binding it to each sample, evaluates `exprToPlot` at every sample and hands the
//! two index-aligned sample columns to a [`ScatterPlotRenderer`] under the title `"Plot"`, the
//! x label `var` and the y label `"output"`. The node's result is `exprToPlot` simplified
//! against the bindings as they were before the sweep.
//!
//! ## Legacy behaviour kept by [`PlotDriver::default`]
//! - the sweep accumulates `i += step`, so rounding drift decides whether a sample landing
//!   on `varMax` is included ([`SweepStepping::Indexed`] computes `min + k * step` instead)
//! - when a sample fails to evaluate, the sweep variable stays bound
//!   (`unbind_on_failure = true` removes it before the error is returned)
//! - the number of samples is unbounded: a step too small to move `min` (or an infinite `max`
//!   with indexed stepping) never terminates unless `max_samples` is set
use crate::Utils::plots::ScatterPlotRenderer;
use crate::datastructures::ordered_sequence::OrderedSequence;
use crate::symbolic::bindings::Bindings;
use crate::symbolic::evaluation_errors::EvaluationError;
use crate::symbolic::evaluator::{DEFAULT_MAX_DEPTH, Evaluator};
use crate::symbolic::expr_node::ExprNode;
use crate::symbolic::simplifier::Simplifier;
use log::{debug, info, warn};
use strum_macros::{Display, EnumString};

pub const PLOT_TITLE: &str = "Plot";
pub const Y_LABEL: &str = "output";

/// how successive sample positions are produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SweepStepping {
    /// `i = min; i += step` (bit-for-bit legacy behaviour)
    Accumulate,
    /// `i = min + k * step`, no accumulated drift
    Indexed,
}

/// result of a successful sweep
#[derive(Clone, Debug, PartialEq)]
pub struct PlotOutcome {
    /// `exprToPlot` simplified against the pre-sweep bindings
    pub simplified: ExprNode,
    /// name of the swept variable
    pub variable: String,
    pub xs: OrderedSequence<f64>,
    pub ys: OrderedSequence<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlotDriver {
    pub stepping: SweepStepping,
    pub unbind_on_failure: bool,
    pub max_depth: usize,
    /// sweeps needing more samples fail with `TooManySamples`
    pub max_samples: Option<usize>,
}

impl Default for PlotDriver {
    fn default() -> Self {
        PlotDriver {
            stepping: SweepStepping::Accumulate,
            unbind_on_failure: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_samples: None,
        }
    }
}

fn malformed_plot() -> EvaluationError {
    EvaluationError::MalformedNode {
        expected: "plot".to_string(),
        arity: 5,
    }
}

impl PlotDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stepping(mut self, stepping: SweepStepping) -> Self {
        self.stepping = stepping;
        self
    }

    pub fn with_unbind_on_failure(mut self, unbind_on_failure: bool) -> Self {
        self.unbind_on_failure = unbind_on_failure;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_samples(mut self, max_samples: Option<usize>) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// runs the sweep, renders it and returns the simplified expression
    pub fn plot(
        &self,
        bindings: &mut Bindings,
        node: &ExprNode,
        renderer: &mut dyn ScatterPlotRenderer,
    ) -> Result<ExprNode, EvaluationError> {
        Ok(self.run(bindings, node, renderer)?.simplified)
    }

    /// like [`PlotDriver::plot`] but also hands back the sampled columns
    pub fn run(
        &self,
        bindings: &mut Bindings,
        node: &ExprNode,
        renderer: &mut dyn ScatterPlotRenderer,
    ) -> Result<PlotOutcome, EvaluationError> {
        let children = node
            .operation_matching("plot", 5)
            .ok_or_else(malformed_plot)?;
        let mut operands = children.iter();
        let (Some(expr), Some(var_node), Some(min_node), Some(max_node), Some(step_node)) = (
            operands.next(),
            operands.next(),
            operands.next(),
            operands.next(),
            operands.next(),
        ) else {
            return Err(malformed_plot());
        };
        let variable = match var_node {
            ExprNode::Variable(name) => name.clone(),
            _ => return Err(malformed_plot()),
        };
        if bindings.contains_key(&variable) {
            return Err(EvaluationError::VariableAlreadyDefined(variable));
        }

        let (min, max, step) = {
            let evaluator = Evaluator::new(bindings).with_max_depth(self.max_depth);
            (
                evaluator.evaluate(min_node)?,
                evaluator.evaluate(max_node)?,
                evaluator.evaluate(step_node)?,
            )
        };
        if min > max {
            return Err(EvaluationError::MinimumLargerThanMaximum { min, max });
        }
        if step <= 0.0 {
            return Err(EvaluationError::NonPositiveStep(step));
        }

        if min + step == min {
            warn!(
                "step {} does not move {} away from {}, the sweep cannot advance",
                step, variable, min
            );
        }
        info!(
            "plotting {} for {} from {} to {} with step {} ({} stepping)",
            expr, variable, min, max, step, self.stepping
        );
        let mut xs = OrderedSequence::new();
        let mut ys = OrderedSequence::new();
        if let Err(err) = self.sweep(bindings, expr, &variable, (min, max, step), &mut xs, &mut ys)
        {
            if self.unbind_on_failure {
                if let Ok(last) = bindings.remove(&variable) {
                    debug!("unbound {} after failed sample (last value {})", variable, last);
                }
            } else {
                warn!(
                    "sample {} failed, {} is left bound to its last value",
                    xs.size(),
                    variable
                );
            }
            return Err(err);
        }
        if let Ok(last) = bindings.remove(&variable) {
            debug!("unbound {} (last sample {})", variable, last);
        }
        info!("{} samples taken", xs.size());

        renderer
            .draw_scatter_plot(PLOT_TITLE, &variable, Y_LABEL, &xs, &ys)
            .map_err(|err| EvaluationError::RenderFailed(err.to_string()))?;

        let simplified = Simplifier::new(bindings)
            .with_max_depth(self.max_depth)
            .simplify(expr)?;
        Ok(PlotOutcome {
            simplified,
            variable,
            xs,
            ys,
        })
    }

    fn sweep(
        &self,
        bindings: &mut Bindings,
        expr: &ExprNode,
        variable: &str,
        (min, max, step): (f64, f64, f64),
        xs: &mut OrderedSequence<f64>,
        ys: &mut OrderedSequence<f64>,
    ) -> Result<(), EvaluationError> {
        match self.stepping {
            SweepStepping::Accumulate => {
                let mut i = min;
                while i <= max {
                    self.sample(bindings, expr, variable, i, xs, ys)?;
                    i += step;
                }
            }
            SweepStepping::Indexed => {
                let mut k: u64 = 0;
                loop {
                    let i = min + k as f64 * step;
                    if !(i <= max) {
                        break;
                    }
                    self.sample(bindings, expr, variable, i, xs, ys)?;
                    k += 1;
                }
            }
        }
        Ok(())
    }

    fn sample(
        &self,
        bindings: &mut Bindings,
        expr: &ExprNode,
        variable: &str,
        i: f64,
        xs: &mut OrderedSequence<f64>,
        ys: &mut OrderedSequence<f64>,
    ) -> Result<(), EvaluationError> {
        if let Some(limit) = self.max_samples {
            if xs.size() >= limit {
                return Err(EvaluationError::TooManySamples { limit });
            }
        }
        bindings.put(variable, ExprNode::Number(i));
        xs.add(i);
        let y = Evaluator::new(bindings)
            .with_max_depth(self.max_depth)
            .evaluate(expr)?;
        debug!("{} = {} -> {}", variable, i, y);
        ys.add(y);
        Ok(())
    }
}

/// `plot(...)` with the legacy options
pub fn plot(
    bindings: &mut Bindings,
    node: &ExprNode,
    renderer: &mut dyn ScatterPlotRenderer,
) -> Result<ExprNode, EvaluationError> {
    PlotDriver::default().plot(bindings, node, renderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utils::plots::RecordingRenderer;
    use std::str::FromStr;

    fn num(value: f64) -> ExprNode {
        ExprNode::number(value)
    }

    fn var(name: &str) -> ExprNode {
        ExprNode::variable(name)
    }

    fn plot_node(expr: ExprNode, variable: &str, min: ExprNode, max: ExprNode, step: ExprNode) -> ExprNode {
        ExprNode::operation("plot", [expr, var(variable), min, max, step])
    }

    fn three_x() -> ExprNode {
        ExprNode::binary("*", num(3.0), var("x"))
    }

    #[test]
    fn test_plot_three_x() {
        let mut bindings = Bindings::new();
        let mut renderer = RecordingRenderer::new();
        let node = plot_node(three_x(), "x", num(2.0), num(5.0), num(0.5));
        let result = plot(&mut bindings, &node, &mut renderer).unwrap();
        assert_eq!(result, three_x());
        assert!(!bindings.contains_key("x"));
        assert_eq!(renderer.calls, 1);
        let recorded = renderer.last.unwrap();
        assert_eq!(recorded.title, "Plot");
        assert_eq!(recorded.x_label, "x");
        assert_eq!(recorded.y_label, "output");
        assert_eq!(recorded.xs, vec![2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0]);
        assert_eq!(recorded.ys, vec![6.0, 7.5, 9.0, 10.5, 12.0, 13.5, 15.0]);
    }

    #[test]
    fn test_plot_uses_bindings_for_bounds_and_result() {
        let mut bindings = Bindings::new();
        bindings.put("c", num(4.0));
        bindings.put("step", num(1.0));
        // a^2 + c*a over [-2, 2]
        let expr = ExprNode::binary(
            "+",
            ExprNode::binary("^", var("a"), num(2.0)),
            ExprNode::binary("*", var("c"), var("a")),
        );
        let node = plot_node(
            expr.clone(),
            "a",
            ExprNode::unary("negate", num(2.0)),
            num(2.0),
            var("step"),
        );
        let mut renderer = RecordingRenderer::new();
        let outcome = PlotDriver::new().run(&mut bindings, &node, &mut renderer).unwrap();
        let ys: Vec<f64> = outcome.ys.iter().copied().collect();
        assert_eq!(ys, vec![-4.0, -3.0, 0.0, 5.0, 12.0]);
        // `a` is unbound again, so only c folds
        let expected = ExprNode::binary(
            "+",
            ExprNode::binary("^", var("a"), num(2.0)),
            ExprNode::binary("*", num(4.0), var("a")),
        );
        assert_eq!(outcome.simplified, expected);
        assert_eq!(outcome.variable, "a");
        assert_eq!(bindings.size(), 2);
    }

    #[test]
    fn test_plot_variable_already_defined() {
        let mut bindings = Bindings::new();
        bindings.put("x", num(1.0));
        let node = plot_node(three_x(), "x", num(0.0), num(1.0), num(0.5));
        let mut renderer = RecordingRenderer::new();
        assert_eq!(
            plot(&mut bindings, &node, &mut renderer),
            Err(EvaluationError::VariableAlreadyDefined("x".to_string()))
        );
        assert_eq!(renderer.calls, 0);
    }

    #[test]
    fn test_plot_range_and_step_errors() {
        let mut bindings = Bindings::new();
        let mut renderer = RecordingRenderer::new();
        let reversed = plot_node(three_x(), "x", num(5.0), num(2.0), num(0.5));
        assert_eq!(
            plot(&mut bindings, &reversed, &mut renderer),
            Err(EvaluationError::MinimumLargerThanMaximum { min: 5.0, max: 2.0 })
        );
        let zero_step = plot_node(three_x(), "x", num(2.0), num(5.0), num(0.0));
        assert_eq!(
            plot(&mut bindings, &zero_step, &mut renderer),
            Err(EvaluationError::NonPositiveStep(0.0))
        );
        let negative_step = plot_node(three_x(), "x", num(2.0), num(5.0), num(-1.0));
        assert_eq!(
            plot(&mut bindings, &negative_step, &mut renderer),
            Err(EvaluationError::NonPositiveStep(-1.0))
        );
        assert!(bindings.is_empty());
        assert_eq!(renderer.calls, 0);
    }

    #[test]
    fn test_plot_malformed_nodes() {
        let mut bindings = Bindings::new();
        let mut renderer = RecordingRenderer::new();
        let four = ExprNode::operation("plot", [three_x(), var("x"), num(0.0), num(1.0)]);
        assert!(matches!(
            plot(&mut bindings, &four, &mut renderer),
            Err(EvaluationError::MalformedNode { .. })
        ));
        let numeric_var = ExprNode::operation(
            "plot",
            [three_x(), num(1.0), num(0.0), num(1.0), num(0.5)],
        );
        assert!(matches!(
            plot(&mut bindings, &numeric_var, &mut renderer),
            Err(EvaluationError::MalformedNode { .. })
        ));
        assert!(plot(&mut bindings, &three_x(), &mut renderer).is_err());
    }

    #[test]
    fn test_undefined_bound_propagates() {
        let mut bindings = Bindings::new();
        let mut renderer = RecordingRenderer::new();
        let node = plot_node(three_x(), "x", var("lo"), num(1.0), num(0.5));
        assert_eq!(
            plot(&mut bindings, &node, &mut renderer),
            Err(EvaluationError::UndefinedVariable("lo".to_string()))
        );
    }

    #[test]
    fn test_failed_sample_leaves_binding_by_default() {
        let expr = ExprNode::binary("+", var("x"), var("missing"));
        let node = plot_node(expr, "x", num(0.0), num(1.0), num(0.5));
        let mut renderer = RecordingRenderer::new();

        let mut bindings = Bindings::new();
        let result = plot(&mut bindings, &node, &mut renderer);
        assert_eq!(
            result,
            Err(EvaluationError::UndefinedVariable("missing".to_string()))
        );
        assert_eq!(bindings.get("x"), Ok(&num(0.0)));

        let mut bindings = Bindings::new();
        let driver = PlotDriver::new().with_unbind_on_failure(true);
        assert!(driver.plot(&mut bindings, &node, &mut renderer).is_err());
        assert!(!bindings.contains_key("x"));
        assert_eq!(renderer.calls, 0);
    }

    #[test]
    fn test_accumulated_drift_versus_indexed_stepping() {
        let node = plot_node(var("t"), "t", num(0.0), num(1.0), num(0.1));
        let mut renderer = RecordingRenderer::new();

        let accumulated = PlotDriver::new()
            .run(&mut Bindings::new(), &node, &mut renderer)
            .unwrap();
        assert_eq!(accumulated.xs.size(), 11);
        // ten additions of 0.1 fall just short of 1.0
        assert!(*accumulated.xs.back().unwrap() < 1.0);

        let indexed = PlotDriver::new()
            .with_stepping(SweepStepping::Indexed)
            .run(&mut Bindings::new(), &node, &mut renderer)
            .unwrap();
        assert_eq!(indexed.xs.size(), 11);
        assert_eq!(indexed.xs.back(), Some(&1.0));
        assert_eq!(indexed.xs, indexed.ys);
    }

    #[test]
    fn test_sample_cap_stops_stalled_sweeps() {
        // 1e17 + 1 == 1e17, so the accumulated sweep never moves
        let stalled = plot_node(var("x"), "x", num(1e17), num(2e17), num(1.0));
        let driver = PlotDriver::new().with_max_samples(Some(100));
        let mut bindings = Bindings::new();
        let mut renderer = RecordingRenderer::new();
        assert_eq!(
            driver.plot(&mut bindings, &stalled, &mut renderer),
            Err(EvaluationError::TooManySamples { limit: 100 })
        );
        assert!(bindings.contains_key("x"));

        let mut bindings = Bindings::new();
        let unbounded = plot_node(var("x"), "x", num(0.0), num(f64::INFINITY), num(1.0));
        let driver = driver
            .with_stepping(SweepStepping::Indexed)
            .with_unbind_on_failure(true);
        assert_eq!(
            driver.plot(&mut bindings, &unbounded, &mut renderer),
            Err(EvaluationError::TooManySamples { limit: 100 })
        );
        assert!(bindings.is_empty());
        assert_eq!(renderer.calls, 0);
    }

    #[test]
    fn test_sample_cap_allows_exact_count() {
        let node = plot_node(three_x(), "x", num(2.0), num(5.0), num(0.5));
        let mut renderer = RecordingRenderer::new();
        let outcome = PlotDriver::new()
            .with_max_samples(Some(7))
            .run(&mut Bindings::new(), &node, &mut renderer)
            .unwrap();
        assert_eq!(outcome.xs.size(), 7);
        assert_eq!(
            PlotDriver::new()
                .with_max_samples(Some(6))
                .run(&mut Bindings::new(), &node, &mut renderer),
            Err(EvaluationError::TooManySamples { limit: 6 })
        );
    }

    #[test]
    fn test_render_failure_is_reported() {
        let mut bindings = Bindings::new();
        let mut renderer = RecordingRenderer::failing("disk full");
        let node = plot_node(three_x(), "x", num(0.0), num(1.0), num(0.5));
        assert_eq!(
            plot(&mut bindings, &node, &mut renderer),
            Err(EvaluationError::RenderFailed("disk full".to_string()))
        );
        assert!(!bindings.contains_key("x"));
    }

    #[test]
    fn test_stepping_names() {
        assert_eq!(SweepStepping::from_str("indexed"), Ok(SweepStepping::Indexed));
        assert_eq!(SweepStepping::Accumulate.to_string(), "accumulate");
        assert!(SweepStepping::from_str("linear").is_err());
    }
}
