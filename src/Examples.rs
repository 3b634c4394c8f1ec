//! examples of usage of RustedCalc
/// evaluation, simplification and plotting walkthroughs
pub mod calc_examples;
