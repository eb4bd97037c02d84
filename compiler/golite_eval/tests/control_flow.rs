//! Loops and switches at run time: which signals each construct consumes,
//! clause selection, and block scopes.

mod common;

use common::output_of;
use golite_ir::{BinaryOp, ExprId, ProgramBuilder, StmtId, TypeId};
use pretty_assertions::assert_eq;

/// `for i := 0; i < n; i++ { body }`
fn count_to(
    b: &mut ProgramBuilder,
    n: i64,
    body: impl FnOnce(&mut ProgramBuilder) -> Vec<StmtId>,
) -> StmtId {
    let zero = b.int(0);
    let init = b.define(&["i"], vec![zero]);
    let i = b.var("i");
    let limit = b.int(n);
    let cond = b.binary(BinaryOp::Lt, i, limit);
    let i = b.var("i");
    let post = b.inc(i);
    let body = body(b);
    b.for_(Some(init), Some(cond), Some(post), body)
}

/// `i == n`
fn i_is(b: &mut ProgramBuilder, n: i64) -> ExprId {
    let i = b.var("i");
    let n = b.int(n);
    b.binary(BinaryOp::Eq, i, n)
}

fn say(b: &mut ProgramBuilder, text: &str) -> StmtId {
    let s = b.str(text);
    b.println(vec![s])
}

#[test]
fn loop_consumes_break_and_continue() {
    let output = output_of(|b| {
        b.func("main", &[], &[], |b| {
            let lp = count_to(b, 5, |b| {
                let one = i_is(b, 1);
                let cont = b.cont();
                let skip = b.if_(None, one, vec![cont], None);
                let three = i_is(b, 3);
                let brk = b.brk();
                let stop = b.if_(None, three, vec![brk], None);
                let i = b.var("i");
                vec![skip, stop, b.print(vec![i])]
            });
            vec![lp, say(b, "done")]
        });
    });
    assert_eq!(output, "02done\n");
}

#[test]
fn while_style_loop() {
    let output = output_of(|b| {
        b.func("main", &[], &[], |b| {
            let zero = b.int(0);
            let decl = b.define(&["n"], vec![zero]);
            let n = b.var("n");
            let three = b.int(3);
            let cond = b.binary(BinaryOp::Lt, n, three);
            let n = b.var("n");
            let step = b.inc(n);
            let lp = b.for_(None, Some(cond), None, vec![step]);
            let n = b.var("n");
            vec![decl, lp, b.println(vec![n])]
        });
    });
    assert_eq!(output, "3\n");
}

#[test]
fn return_leaves_an_infinite_loop() {
    // for i := 0; ; i++ { if i*i > 10 { return i } }
    let output = output_of(|b| {
        b.func("first_square_above_ten", &[], &[TypeId::INT], |b| {
            let zero = b.int(0);
            let init = b.define(&["i"], vec![zero]);
            let i = b.var("i");
            let post = b.inc(i);
            let i = b.var("i");
            let i_again = b.var("i");
            let square = b.binary(BinaryOp::Mul, i, i_again);
            let ten = b.int(10);
            let above = b.binary(BinaryOp::Gt, square, ten);
            let i = b.var("i");
            let ret = b.ret(vec![i]);
            let check = b.if_(None, above, vec![ret], None);
            vec![b.for_(Some(init), None, Some(post), vec![check])]
        });
        b.func("main", &[], &[], |b| {
            let call = b.call("first_square_above_ten", vec![]);
            vec![b.println(vec![call])]
        });
    });
    assert_eq!(output, "4\n");
}

#[test]
fn switch_consumes_break_but_not_continue() {
    // switch i { case 1: continue; case 3: break; default: println(i); case 4: println("four") }
    let output = output_of(|b| {
        b.func("main", &[], &[], |b| {
            let lp = count_to(b, 5, |b| {
                let tag = b.var("i");
                let one = b.int(1);
                let cont = b.cont();
                let case1 = b.case(vec![one], vec![cont]);
                let three = b.int(3);
                let brk = b.brk();
                let after_break = say(b, "unreachable");
                let case3 = b.case(vec![three], vec![brk, after_break]);
                let i = b.var("i");
                let print_i = b.println(vec![i]);
                let default = b.default_case(vec![print_i]);
                let four = b.int(4);
                let print_four = say(b, "four");
                let case4 = b.case(vec![four], vec![print_four]);
                let switch = b.switch(None, Some(tag), vec![case1, case3, default, case4]);
                vec![switch, say(b, "after")]
            });
            vec![lp, say(b, "done")]
        });
    });
    assert_eq!(output, "0\nafter\n2\nafter\nafter\nfour\nafter\ndone\n");
}

#[test]
fn break_in_a_loop_inside_a_switch_leaves_only_the_loop() {
    let output = output_of(|b| {
        b.func("main", &[], &[], |b| {
            let brk = b.brk();
            let lp = b.for_(None, None, None, vec![brk]);
            let after = say(b, "after loop");
            let default = b.default_case(vec![lp, after]);
            let switch = b.switch(None, None, vec![default]);
            vec![switch, say(b, "after switch")]
        });
    });
    assert_eq!(output, "after loop\nafter switch\n");
}

#[test]
fn case_expressions_stop_at_the_first_match() {
    // switch 2 { case hit(1), hit(2), hit(3): ...; case hit(4): ... }
    let output = output_of(|b| {
        let zero = b.int(0);
        b.global(&["hits"], None, vec![zero]);
        b.func("hit", &[("n", TypeId::INT)], &[TypeId::INT], |b| {
            let hits = b.var("hits");
            let count = b.inc(hits);
            let n = b.var("n");
            vec![count, b.ret(vec![n])]
        });
        b.func("main", &[], &[], |b| {
            let tag = b.int(2);
            let exprs = [1, 2, 3]
                .into_iter()
                .map(|n| {
                    let n = b.int(n);
                    b.call("hit", vec![n])
                })
                .collect();
            let two = say(b, "two");
            let first = b.case(exprs, vec![two]);
            let four = b.int(4);
            let four = b.call("hit", vec![four]);
            let other = say(b, "four");
            let second = b.case(vec![four], vec![other]);
            let switch = b.switch(None, Some(tag), vec![first, second]);
            let hits = b.var("hits");
            vec![switch, b.println(vec![hits])]
        });
    });
    assert_eq!(output, "two\n2\n");
}

#[test]
fn default_runs_only_without_a_match() {
    let output = output_of(|b| {
        b.func("main", &[], &[], |b| {
            // Tagless: the first true case wins even after `default`.
            let default_body = say(b, "default");
            let default = b.default_case(vec![default_body]);
            let no = b.bool(false);
            let skipped = say(b, "false");
            let never = b.case(vec![no], vec![skipped]);
            let one = b.int(1);
            let two = b.int(2);
            let less = b.binary(BinaryOp::Lt, one, two);
            let taken = say(b, "less");
            let yes = b.case(vec![less], vec![taken]);
            let tagless = b.switch(None, None, vec![default, never, yes]);

            // No case matches: `default` runs, wherever it sits.
            let tag = b.int(9);
            let one = b.int(1);
            let miss_body = say(b, "one");
            let miss = b.case(vec![one], vec![miss_body]);
            let fallback_body = say(b, "fallback");
            let fallback = b.default_case(vec![fallback_body]);
            let tagged = b.switch(None, Some(tag), vec![fallback, miss]);

            // No match and no default: nothing runs.
            let tag = b.int(9);
            let one = b.int(1);
            let silent_body = say(b, "silent");
            let silent = b.case(vec![one], vec![silent_body]);
            let nothing = b.switch(None, Some(tag), vec![silent]);

            vec![tagless, tagged, nothing, say(b, "end")]
        });
    });
    assert_eq!(output, "less\nfallback\nend\n");
}

#[test]
fn switch_init_is_scoped_to_the_switch() {
    // x := "outer"; switch x := 1; x { case 1: println(x) }; println(x)
    let output = output_of(|b| {
        b.func("main", &[], &[], |b| {
            let outer = b.str("outer");
            let decl = b.define(&["x"], vec![outer]);
            let one = b.int(1);
            let init = b.define(&["x"], vec![one]);
            let tag = b.var("x");
            let x = b.var("x");
            let print_inner = b.println(vec![x]);
            let one = b.int(1);
            let case = b.case(vec![one], vec![print_inner]);
            let switch = b.switch(Some(init), Some(tag), vec![case]);
            let x = b.var("x");
            vec![decl, switch, b.println(vec![x])]
        });
    });
    assert_eq!(output, "1\nouter\n");
}

#[test]
fn each_iteration_gets_a_fresh_body_scope() {
    // x := 100; for i := 0; i < 2; i++ { var x int; x++; print(x) }; println(x)
    let output = output_of(|b| {
        b.func("main", &[], &[], |b| {
            let hundred = b.int(100);
            let decl = b.define(&["x"], vec![hundred]);
            let lp = count_to(b, 2, |b| {
                let local = b.var_decl(&["x"], Some(TypeId::INT), vec![]);
                let x = b.var("x");
                let bump = b.inc(x);
                let x = b.var("x");
                vec![local, bump, b.print(vec![x])]
            });
            let x = b.var("x");
            vec![decl, lp, b.println(vec![x])]
        });
    });
    assert_eq!(output, "11100\n");
}
