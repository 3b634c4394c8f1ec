// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::Utils::logger::{save_samples_to_csv, samples_table};
use crate::Utils::plots::{PlotBackend, RecordingRenderer, make_renderer};
use crate::Utils::settings_parser::CalcSettings;
use crate::symbolic::bindings::Bindings;
use crate::symbolic::evaluator::{evaluate, handle_to_double};
use crate::symbolic::expr_node::ExprNode;
use crate::symbolic::plot_driver::{PlotDriver, SweepStepping};
use crate::symbolic::simplifier::{handle_simplify, simplify};
use log::{error, info};
use std::path::PathBuf;

fn num(value: f64) -> ExprNode {
    ExprNode::number(value)
}

fn var(name: &str) -> ExprNode {
    ExprNode::variable(name)
}

fn plot_node(expr: ExprNode, variable: &str, min: f64, max: f64, step: f64) -> ExprNode {
    ExprNode::operation("plot", [expr, var(variable), num(min), num(max), num(step)])
}

#[allow(dead_code)]
pub fn calc_examples(example: usize) {
    match example {
        0 => {
            // EVALUATION
            let mut bindings = Bindings::new();
            bindings.put("x", num(3.0));
            // (x ^ 2 - 1) / 2
            let expr = ExprNode::binary(
                "/",
                ExprNode::binary("-", ExprNode::binary("^", var("x"), num(2.0)), num(1.0)),
                num(2.0),
            );
            match evaluate(&bindings, &expr) {
                Ok(value) => println!("{} = {}", expr, value),
                Err(e) => println!("{} failed: {}", expr, e),
            }
            // IEEE-754 results are values, not errors
            let inf = ExprNode::binary("/", num(1.0), num(0.0));
            println!("{} = {:?}", inf, evaluate(&bindings, &inf));
            let nan = ExprNode::binary("^", num(-8.0), ExprNode::binary("/", num(1.0), num(3.0)));
            println!("{} = {:?}", nan, evaluate(&bindings, &nan));
            // unbound variable
            println!("{} = {:?}", var("y"), evaluate(&bindings, &var("y")));
            // toDouble(cos(0))
            let to_double = ExprNode::unary("toDouble", ExprNode::unary("cos", num(0.0)));
            println!("{} -> {:?}", to_double, handle_to_double(&bindings, &to_double));
        }
        1 => {
            // SIMPLIFICATION
            let mut bindings = Bindings::new();
            // z := 2 + x while x is unknown; simplify gives the binding back untouched
            bindings.put("z", ExprNode::binary("+", num(2.0), var("x")));
            println!("z -> {:?}", simplify(&bindings, &var("z")));
            // once x := 3 the whole binding folds
            bindings.put("x", num(3.0));
            println!("z -> {:?}", simplify(&bindings, &var("z")));
            // only negate, +, - and * fold
            let expr = ExprNode::binary(
                "/",
                ExprNode::binary("*", var("z"), ExprNode::unary("negate", num(2.0))),
                num(3.0),
            );
            let simplify_node = ExprNode::unary("simplify", expr);
            match handle_simplify(&bindings, &simplify_node) {
                Ok(simplified) => println!("{} -> {}", simplify_node, simplified),
                Err(e) => println!("{} failed: {}", simplify_node, e),
            }
        }
        2 => {
            // PLOT 3 * x FOR x FROM 2 TO 5 WITH STEP 0.5 AND SAVE THE SAMPLES
            let mut bindings = Bindings::new();
            let node = plot_node(ExprNode::binary("*", num(3.0), var("x")), "x", 2.0, 5.0, 0.5);
            let mut renderer = make_renderer(PlotBackend::Plotters, PathBuf::from("plot_3x.png"), 800, 600);
            match PlotDriver::new().run(&mut bindings, &node, renderer.as_mut()) {
                Ok(outcome) => {
                    println!("result: {}", outcome.simplified);
                    println!("{}", samples_table(&outcome.xs, &outcome.ys));
                    if let Err(e) =
                        save_samples_to_csv(&outcome.xs, &outcome.ys, &outcome.variable, "output", &PathBuf::from("plot_3x.csv"))
                    {
                        error!("cannot save samples: {}", e);
                    }
                }
                Err(e) => error!("plot failed: {}", e),
            }
        }
        3 => {
            // ACCUMULATED VERSUS INDEXED STEPPING
            let node = plot_node(var("x"), "x", 0.0, 1.0, 0.1);
            for stepping in [SweepStepping::Accumulate, SweepStepping::Indexed] {
                let mut bindings = Bindings::new();
                let mut renderer = RecordingRenderer::new();
                let driver = PlotDriver::new().with_stepping(stepping);
                if let Ok(outcome) = driver.run(&mut bindings, &node, &mut renderer) {
                    println!(
                        "{} stepping: {} samples, last x = {:?}",
                        stepping,
                        outcome.xs.size(),
                        outcome.xs.back()
                    );
                }
            }
        }
        4 => {
            // A FAILING SAMPLE LEAVES THE VARIABLE BOUND UNLESS ASKED OTHERWISE
            let node = plot_node(ExprNode::binary("+", var("x"), var("w")), "x", 0.0, 1.0, 0.5);
            for unbind_on_failure in [false, true] {
                let mut bindings = Bindings::new();
                let driver = PlotDriver::new().with_unbind_on_failure(unbind_on_failure);
                let result = driver.plot(&mut bindings, &node, &mut RecordingRenderer::new());
                println!(
                    "unbind_on_failure = {}: {:?}, x still bound: {}",
                    unbind_on_failure,
                    result,
                    bindings.contains_key("x")
                );
            }
        }
        5 => {
            // EVERYTHING DRIVEN BY A SETTINGS DOCUMENT
            let document = "
                // session settings
                logging loglevel: info
                plot backend: plotters output: sin_plot.png width: 640 height: 480
                stepping: indexed csv: sin_plot.csv max_samples: 10000
                evaluation max_depth: 500
                ";
            let settings = match CalcSettings::from_document(document) {
                Ok(settings) => settings,
                Err(e) => {
                    error!("bad settings: {}", e);
                    return;
                }
            };
            info!("settings: {:?}", settings);
            let mut bindings = settings.bindings();
            let mut renderer = settings.renderer();
            let node = plot_node(ExprNode::unary("sin", var("t")), "t", 0.0, 6.0, 0.1);
            match settings.plot_driver().run(&mut bindings, &node, renderer.as_mut()) {
                Ok(outcome) => {
                    println!("{} samples of {}", outcome.xs.size(), outcome.simplified);
                    if let Some(csv) = &settings.csv {
                        if let Err(e) = save_samples_to_csv(&outcome.xs, &outcome.ys, &outcome.variable, "output", csv) {
                            error!("cannot save samples: {}", e);
                        }
                    }
                }
                Err(e) => error!("plot failed: {}", e),
            }
        }
        _ => {
            println!("example not found");
        }
    }
}
