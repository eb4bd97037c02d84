//! Assignment semantics: two-phase commits, value copies and slice aliasing.

mod common;

use common::{at, fields, output_of, run};
use golite_eval::FaultKind;
use golite_ir::{BinaryOp, ProgramBuilder, StmtId, TypeId};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// `main` running `body`, then printing `vars` when there are any.
fn main_then_print(
    b: &mut ProgramBuilder,
    body: impl FnOnce(&mut ProgramBuilder) -> Vec<StmtId>,
    vars: &[&str],
) {
    let vars: Vec<String> = vars.iter().map(ToString::to_string).collect();
    b.func("main", &[], &[], move |b| {
        let mut stmts = body(b);
        if !vars.is_empty() {
            let args = vars.iter().map(|v| b.var(v)).collect();
            stmts.push(b.println(args));
        }
        stmts
    });
}

#[test]
fn swap_reads_every_value_before_writing() {
    let output = output_of(|b| {
        main_then_print(
            b,
            |b| {
                let one = b.int(1);
                let two = b.int(2);
                let decl = b.define(&["a", "b"], vec![one, two]);
                let targets = vec![b.var("a"), b.var("b")];
                let values = vec![b.var("b"), b.var("a")];
                vec![decl, b.assign(targets, values)]
            },
            &["a", "b"],
        );
    });
    assert_eq!(output, "2 1\n");
}

#[test]
fn index_uses_value_from_before_the_statement() {
    // i, x[i] = 1, 2
    let output = output_of(|b| {
        let arr = b.array_type(TypeId::INT, 3);
        main_then_print(
            b,
            |b| {
                let zero = b.int(0);
                let mut stmts = vec![
                    b.define(&["i"], vec![zero]),
                    b.var_decl(&["x"], Some(arr), vec![]),
                ];
                let i = b.var("i");
                let x = b.var("x");
                let i_index = b.var("i");
                let element = b.index(x, i_index);
                let one = b.int(1);
                let two = b.int(2);
                stmts.push(b.assign(vec![i, element], vec![one, two]));
                let x = b.var("x");
                let args = vec![at(b, x, 0), { let x = b.var("x"); at(b, x, 1) }];
                stmts.push(b.println(args));
                stmts
            },
            &["i"],
        );
    });
    assert_eq!(output, "2 0\n1\n");
}

#[test]
fn multi_result_call_spreads_over_targets() {
    let output = output_of(|b| {
        b.func("pair", &[], &[TypeId::INT, TypeId::STRING], |b| {
            let n = b.int(7);
            let s = b.str("seven");
            vec![b.ret(vec![n, s])]
        });
        main_then_print(
            b,
            |b| {
                let call = b.call("pair", vec![]);
                let decl = b.define(&["n", "s"], vec![call]);
                let blank = b.blank();
                let s = b.var("s");
                let call = b.call("pair", vec![]);
                vec![decl, b.assign(vec![blank, s], vec![call])]
            },
            &["n", "s"],
        );
    });
    assert_eq!(output, "7 seven\n");
}

#[test]
fn arrays_copy_and_slices_alias() {
    let output = output_of(|b| {
        let arr = b.array_type(TypeId::INT, 2);
        let ints = b.slice_type(TypeId::INT);
        main_then_print(
            b,
            |b| {
                let mut stmts = vec![b.var_decl(&["a"], Some(arr), vec![])];
                let a = b.var("a");
                stmts.push(b.define(&["copy"], vec![a]));
                let copy = b.var("copy");
                let target = at(b, copy, 0);
                let five = b.int(5);
                stmts.push(b.assign(vec![target], vec![five]));

                stmts.push(b.var_decl(&["s"], Some(ints), vec![]));
                let target = b.var("s");
                let s = b.var("s");
                let zero = b.int(0);
                let grown = b.append(s, zero);
                stmts.push(b.assign(vec![target], vec![grown]));
                let s = b.var("s");
                stmts.push(b.define(&["alias"], vec![s]));
                let alias = b.var("alias");
                let target = at(b, alias, 0);
                let nine = b.int(9);
                stmts.push(b.assign(vec![target], vec![nine]));

                let args = vec![
                    { let a = b.var("a"); at(b, a, 0) },
                    { let c = b.var("copy"); at(b, c, 0) },
                    { let s = b.var("s"); at(b, s, 0) },
                ];
                stmts.push(b.println(args));
                stmts
            },
            &[],
        );
    });
    assert_eq!(output, "0 5 9\n");
}

#[test]
fn composite_conversions_copy_values_and_share_slices() {
    // y := point(x); y.a = 5; s := ints(t); s[0] = 9
    let output = output_of(|b| {
        let point = b.struct_type(&[("a", TypeId::INT)]);
        let ints = b.slice_type(TypeId::INT);
        main_then_print(
            b,
            |b| {
                let mut stmts = vec![b.var_decl(&["x"], Some(point), vec![])];
                let x = b.var("x");
                let copy = b.convert(point, x);
                stmts.push(b.define(&["y"], vec![copy]));
                let y = b.var("y");
                let target = fields(b, y, &["a"]);
                let five = b.int(5);
                stmts.push(b.assign(vec![target], vec![five]));

                stmts.push(b.var_decl(&["t"], Some(ints), vec![]));
                let target = b.var("t");
                let t = b.var("t");
                let one = b.int(1);
                let grown = b.append(t, one);
                stmts.push(b.assign(vec![target], vec![grown]));
                let t = b.var("t");
                let alias = b.convert(ints, t);
                stmts.push(b.define(&["s"], vec![alias]));
                let s = b.var("s");
                let target = at(b, s, 0);
                let nine = b.int(9);
                stmts.push(b.assign(vec![target], vec![nine]));

                let args = vec![
                    { let x = b.var("x"); fields(b, x, &["a"]) },
                    { let y = b.var("y"); fields(b, y, &["a"]) },
                    { let t = b.var("t"); at(b, t, 0) },
                ];
                stmts.push(b.println(args));
                stmts
            },
            &[],
        );
    });
    assert_eq!(output, "0 5 9\n");
}

#[test]
fn element_target_keeps_the_slice_it_resolved() {
    // old := s; s, s[0] = t, 5
    let output = output_of(|b| {
        let ints = b.slice_type(TypeId::INT);
        main_then_print(
            b,
            |b| {
                let mut stmts = Vec::new();
                for name in ["s", "t"] {
                    stmts.push(b.var_decl(&[name], Some(ints), vec![]));
                    let target = b.var(name);
                    let current = b.var(name);
                    let zero = b.int(0);
                    let grown = b.append(current, zero);
                    stmts.push(b.assign(vec![target], vec![grown]));
                }
                let s = b.var("s");
                stmts.push(b.define(&["old"], vec![s]));
                let s = b.var("s");
                let s_again = b.var("s");
                let element = at(b, s_again, 0);
                let t = b.var("t");
                let five = b.int(5);
                stmts.push(b.assign(vec![s, element], vec![t, five]));
                let args = vec![
                    { let old = b.var("old"); at(b, old, 0) },
                    { let s = b.var("s"); at(b, s, 0) },
                ];
                stmts.push(b.println(args));
                stmts
            },
            &[],
        );
    });
    assert_eq!(output, "5 0\n");
}

#[test]
fn append_within_capacity_is_visible_through_other_headers() {
    let output = output_of(|b| {
        let ints = b.slice_type(TypeId::INT);
        main_then_print(
            b,
            |b| {
                let mut stmts = vec![b.var_decl(&["a"], Some(ints), vec![])];
                for n in [1, 2] {
                    let target = b.var("a");
                    let a = b.var("a");
                    let value = b.int(n);
                    let grown = b.append(a, value);
                    stmts.push(b.assign(vec![target], vec![grown]));
                }
                // len 2, cap 2: this append reallocates to cap 4.
                let a = b.var("a");
                let three = b.int(3);
                let grown = b.append(a, three);
                stmts.push(b.define(&["b"], vec![grown]));
                // len 3, cap 4: both appends write slot 3 of one buffer.
                for (name, value) in [("c", 40), ("d", 41)] {
                    let bv = b.var("b");
                    let value = b.int(value);
                    let grown = b.append(bv, value);
                    stmts.push(b.define(&[name], vec![grown]));
                }
                let args = vec![
                    { let c = b.var("c"); at(b, c, 3) },
                    { let d = b.var("d"); at(b, d, 3) },
                    { let bv = b.var("b"); b.len(bv) },
                    { let bv = b.var("b"); b.cap(bv) },
                    { let a = b.var("a"); b.cap(a) },
                ];
                stmts.push(b.println(args));
                stmts
            },
            &[],
        );
    });
    assert_eq!(output, "41 41 3 4 2\n");
}

#[test]
fn op_assign_and_increment_wrap() {
    let output = output_of(|b| {
        main_then_print(
            b,
            |b| {
                let max = b.int(i64::MAX);
                let mut stmts = vec![b.define(&["n"], vec![max])];
                let n = b.var("n");
                stmts.push(b.inc(n));
                let r = b.rune('a');
                stmts.push(b.define(&["r"], vec![r]));
                let target = b.var("r");
                let two = b.int(2);
                stmts.push(b.op_assign(target, BinaryOp::Add, two));
                let f = b.float(1.5);
                stmts.push(b.define(&["f"], vec![f]));
                let f = b.var("f");
                stmts.push(b.dec(f));
                stmts
            },
            &["n", "r", "f"],
        );
    });
    assert_eq!(output, "-9223372036854775808 99 +5.000000e-001\n");
}

#[test]
fn out_of_range_target_faults_at_commit() {
    // x[1], x[3] = 4, 5 on a three element slice
    let execution = run(|b| {
        let ints = b.slice_type(TypeId::INT);
        b.global(&["x"], Some(ints), vec![]);
        b.func("main", &[], &[], |b| {
            let mut stmts = Vec::new();
            for n in 0..3 {
                let target = b.var("x");
                let x = b.var("x");
                let value = b.int(n);
                let grown = b.append(x, value);
                stmts.push(b.assign(vec![target], vec![grown]));
            }
            let x = b.var("x");
            let first = at(b, x, 1);
            let x = b.var("x");
            let second = at(b, x, 3);
            let four = b.int(4);
            let five = b.int(5);
            stmts.push(b.assign(vec![first, second], vec![four, five]));
            stmts
        });
    });
    let fault = execution.fault().cloned();
    assert_eq!(
        fault.map(|f| f.kind),
        Some(FaultKind::IndexOutOfBounds {
            index: 3,
            length: 3
        })
    );
}

proptest! {
    #[test]
    fn parallel_assignment_swaps(a in any::<i64>(), c in any::<i64>()) {
        let output = output_of(|b| {
            main_then_print(
                b,
                |b| {
                    let x = b.int(a);
                    let y = b.int(c);
                    let decl = b.define(&["x", "y"], vec![x, y]);
                    let targets = vec![b.var("x"), b.var("y")];
                    let values = vec![b.var("y"), b.var("x")];
                    vec![decl, b.assign(targets, values)]
                },
                &["x", "y"],
            );
        });
        prop_assert_eq!(output, format!("{c} {a}\n"));
    }

    #[test]
    fn int_addition_wraps_like_go(a in any::<i64>(), c in any::<i64>()) {
        let output = output_of(|b| {
            main_then_print(
                b,
                |b| {
                    let x = b.int(a);
                    let y = b.int(c);
                    let sum = b.binary(BinaryOp::Add, x, y);
                    vec![b.define(&["sum"], vec![sum])]
                },
                &["sum"],
            );
        });
        prop_assert_eq!(output, format!("{}\n", a.wrapping_add(c)));
    }
}
