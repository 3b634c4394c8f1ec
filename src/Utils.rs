//! different utility modules used throughout the project
/// logging setup, CSV export and pretty tables of sampled points
pub mod logger;
/// scatter plot renderers (plotters, gnuplot, none) behind one trait
pub mod plots;
/// parse settings document with structure like " title1 key1: value1 key2: value2 title2 key3: value3" into CalcSettings
pub mod settings_parser;
