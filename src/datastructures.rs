//! hand-made containers backing every other structure of the calculator
/// doubly linked, index-addressable sequence; holds the children of operation nodes and the
/// sample columns of a plot
pub mod ordered_sequence;
/// array dictionary with linear lookup, doubling growth and swap-delete removal; backs the
/// variable bindings
pub mod assoc_store;
/// error kinds shared by both containers
pub mod container_errors;
mod datastructures_tests;
