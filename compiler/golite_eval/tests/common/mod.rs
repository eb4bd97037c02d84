//! Shared helpers for the evaluator integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use golite_eval::{execute, Execution};
use golite_ir::{ExprId, Program, ProgramBuilder, SharedInterner};

/// Build a program with a fresh interner.
pub fn build(f: impl FnOnce(&mut ProgramBuilder)) -> (SharedInterner, Program) {
    let interner = SharedInterner::default();
    let mut builder = ProgramBuilder::new(&interner);
    f(&mut builder);
    (interner, builder.finish())
}

/// Build and run a program with captured output.
pub fn run(f: impl FnOnce(&mut ProgramBuilder)) -> Execution {
    let (interner, program) = build(f);
    match execute(&program, &interner) {
        Ok(execution) => execution,
        Err(err) => panic!("ill-formed program: {err}"),
    }
}

/// Build and run a program that must complete; returns its output.
pub fn output_of(f: impl FnOnce(&mut ProgramBuilder)) -> String {
    let execution = run(f);
    if let Some(fault) = execution.fault() {
        panic!("unexpected fault: {fault}");
    }
    execution.output
}

/// `receiver.field.field...` for each name in `fields`.
pub fn fields(b: &mut ProgramBuilder, receiver: ExprId, names: &[&str]) -> ExprId {
    names
        .iter()
        .fold(receiver, |expr, name| b.field(expr, name))
}

/// `target[index]` with a literal index.
pub fn at(b: &mut ProgramBuilder, target: ExprId, index: i64) -> ExprId {
    let index = b.int(index);
    b.index(target, index)
}
