//! some linear algebra functions used throughout the code
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// Jacobi and Gauss-Seidel iterations for dense systems
pub mod iterative_solvers_cpu;
/// direct solution by Gauss-Jordan elimination with a record of every row operation
pub mod gauss_jordan;
/// diagnostics for linear systems and matrices: diagonal dominance, residual, if it is singular
/// or poorly conditioned
pub mod linear_sys_diagnostics;
