//! GoLite Check - static checks over typed GoLite programs.
//!
//! The front end's type checker lives outside this workspace; this crate
//! holds the checks the evaluator relies on but cannot perform itself.
//!
//! - `termination`: every function with results ends in a terminating
//!   statement

mod termination;

pub use termination::{check_termination, diverging_functions, TerminationError};
