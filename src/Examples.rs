//! examples of usage of RustedNumMethods
/// root finding, linear systems, interpolation, integration and task files
pub mod methods_examples;
