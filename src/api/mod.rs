//! The main interaction point of the crate.
//!
//! [`Solver`] drives one encode-solve-probe cycle over a chosen backend; the [`outputs`]
//! module holds the types the outcome is reported in.

pub mod outputs;
mod solver;

pub use solver::Solver;
