use super::*;
use crate::errors::{division_by_zero, EvalErrorKind};
use pretty_assertions::assert_eq;

fn frame(interner: &StringInterner, name: &str, start: u32) -> CallFrame {
    CallFrame {
        name: interner.intern(name),
        call_span: Some(Span::new(start, start + 1)),
    }
}

// CallStack basic operations

#[test]
fn empty_stack() {
    let stack = CallStack::new(Some(100));
    assert!(stack.is_empty());
    assert_eq!(stack.depth(), 0);
    assert!(stack.current_frame().is_none());
}

#[test]
fn push_and_pop() {
    let interner = StringInterner::new();
    let mut stack = CallStack::new(Some(100));
    stack
        .push(frame(&interner, "foo", 0))
        .expect("push should succeed");
    assert_eq!(stack.depth(), 1);
    assert_eq!(
        stack.current_frame().map(|f| f.name),
        Some(interner.intern("foo"))
    );
    stack.pop();
    assert!(stack.is_empty());
}

#[test]
fn depth_limit_enforced() {
    let interner = StringInterner::new();
    let mut stack = CallStack::new(Some(3));
    for i in 0..3 {
        stack
            .push(frame(&interner, "recurse", i))
            .expect("push within limit");
    }
    let err = stack
        .push(frame(&interner, "recurse", 3))
        .expect_err("push should fail at max depth");
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 3 });
    assert_eq!(stack.depth(), 3);
}

#[test]
fn unlimited_depth() {
    let interner = StringInterner::new();
    let mut stack = CallStack::new(None);
    for i in 0..1000 {
        stack
            .push(frame(&interner, "deep", i))
            .expect("unlimited should never fail");
    }
    assert_eq!(stack.depth(), 1000);
}

// Backtrace capture

#[test]
fn capture_lists_most_recent_first() {
    let interner = StringInterner::new();
    let mut stack = CallStack::new(None);
    stack.push(frame(&interner, "main", 0)).expect("push main");
    stack.push(frame(&interner, "helper", 10)).expect("push helper");

    let bt = stack.capture(&interner);
    let names: Vec<&str> = bt.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["helper", "main"]);
    assert_eq!(bt.frames()[0].span, Some(Span::new(10, 11)));
}

#[test]
fn attach_backtrace_keeps_innermost_snapshot() {
    let interner = StringInterner::new();
    let mut stack = CallStack::new(None);
    stack.push(frame(&interner, "main", 0)).expect("push main");
    stack.push(frame(&interner, "inner", 5)).expect("push inner");

    let err = stack.attach_backtrace(division_by_zero(), &interner);
    stack.pop();
    let err = stack.attach_backtrace(err, &interner);

    let bt = err.backtrace.expect("backtrace attached");
    assert_eq!(bt.len(), 2);
}

#[test]
fn attach_backtrace_on_empty_stack_is_noop() {
    let interner = StringInterner::new();
    let stack = CallStack::new(None);
    let err = stack.attach_backtrace(division_by_zero(), &interner);
    assert!(err.backtrace.is_none());
}

// Counters

#[test]
fn counters_accumulate_and_report() {
    let mut counters = EvalCounters::default();
    counters.count_statement();
    counters.count_expression();
    counters.count_expression();
    counters.count_function_call();
    counters.count_slice_reallocation();

    assert_eq!(counters.expressions_evaluated, 2);
    let report = counters.report();
    assert!(report.contains("Statements executed:   1"));
    assert!(report.contains("Slice reallocations:   1"));
}
