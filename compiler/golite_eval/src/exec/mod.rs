//! Execution helpers for the GoLite interpreter.
//!
//! - `control`: statement signals and how loops and switches consume them
//! - `place`: projection paths into values, and the places assignments
//!   write to
//!
//! These are free functions over `Value`; the `Interpreter` delegates to
//! them.

pub mod control;
pub mod place;
