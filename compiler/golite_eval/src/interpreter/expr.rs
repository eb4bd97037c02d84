//! Expression evaluation.
//!
//! `eval_expr` is the read phase: calls under the expression were already
//! run by the enclosing call phase and are looked up, never re-run.

use std::rc::Rc;

use golite_ir::{BinaryOp, ExprId, ExprKind, Span, TypeId};

use super::Interpreter;
use crate::conversions::convert;
use crate::errors::{type_mismatch, undefined_variable, EvalResult};
use crate::exec::place::{read_projected, PathRoot, Projection, Projections};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::Value;

impl Interpreter<'_> {
    /// Evaluate an expression whose calls are already hoisted.
    pub(crate) fn eval_expr(&mut self, id: ExprId) -> EvalResult {
        self.mode_state.count_expression();
        let program = self.program;
        let expr = program.arena.get_expr(id);
        match &expr.kind {
            ExprKind::Int(n) => Ok(match expr.ty {
                TypeId::RUNE => Value::Rune(truncate_rune(*n)),
                #[expect(clippy::cast_precision_loss, reason = "untyped constant in float context")]
                TypeId::FLOAT => Value::Float(*n as f64),
                _ => Value::Int(*n),
            }),
            ExprKind::Rune(r) => Ok(match expr.ty {
                TypeId::INT => Value::Int(i64::from(*r)),
                TypeId::FLOAT => Value::Float(f64::from(*r)),
                _ => Value::Rune(*r),
            }),
            ExprKind::Float(bits) => Ok(Value::Float(f64::from_bits(*bits))),
            ExprKind::Str(name) => Ok(Value::Str(Rc::from(self.interner.lookup(*name)))),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),

            ExprKind::Ident(_) | ExprKind::Index { .. } | ExprKind::Field { .. } => {
                self.eval_path(id)
            }

            ExprKind::Binary { op, left, right } if op.is_short_circuit() => {
                if let Some(value) = self.hoisted_value(id) {
                    return Ok(value);
                }
                self.eval_logical(*op, *left, *right, expr.span)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(*left)?;
                let right = self.eval_expr(*right)?;
                evaluate_binary(left, right, *op).map_err(|e| e.with_span(expr.span))
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(*operand)?;
                evaluate_unary(value, *op).map_err(|e| e.with_span(expr.span))
            }

            ExprKind::Call { func, args } => match self.hoisted_value(id) {
                Some(value) => Ok(value),
                None => self.eval_call(*func, args, expr.span),
            },
            ExprKind::Append { slice, value } => match self.hoisted_value(id) {
                Some(result) => Ok(result),
                None => self.eval_append(*slice, *value, expr.span),
            },

            ExprKind::Len(operand) => {
                let value = self.eval_expr(*operand)?;
                let len = match &value {
                    Value::Str(s) => s.len(),
                    Value::Array(items) => items.len(),
                    Value::Slice(slice) => slice.len(),
                    other => {
                        return Err(type_mismatch("string, array or slice", other.type_name())
                            .with_span(expr.span))
                    }
                };
                Ok(Value::Int(length_to_int(len)))
            }
            ExprKind::Cap(operand) => {
                let value = self.eval_expr(*operand)?;
                let cap = match &value {
                    Value::Array(items) => items.len(),
                    Value::Slice(slice) => slice.cap(),
                    other => {
                        return Err(
                            type_mismatch("array or slice", other.type_name()).with_span(expr.span)
                        )
                    }
                };
                Ok(Value::Int(length_to_int(cap)))
            }
            ExprKind::Convert(operand) => {
                let value = self.eval_expr(*operand)?;
                convert(value, expr.ty, &program.types, self.interner)
                    .map_err(|e| e.with_span(expr.span))
            }
        }
    }

    /// `&&` / `||` without calls: both operands are plain reads.
    fn eval_logical(
        &mut self,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        span: Span,
    ) -> EvalResult {
        let left = self.eval_expr(left)?.as_bool().map_err(|e| e.with_span(span))?;
        if short_circuits(op, left) {
            return Ok(Value::Bool(left));
        }
        let right = self.eval_expr(right)?.as_bool().map_err(|e| e.with_span(span))?;
        Ok(Value::Bool(right))
    }

    /// `&&` / `||` containing calls, run as a unit in the call phase.
    ///
    /// Each operand gets its own call phase so the right operand's calls
    /// never run when the left operand decides the result.
    pub(crate) fn eval_short_circuit(
        &mut self,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        span: Span,
    ) -> EvalResult {
        let left = self.eval_single(left)?.as_bool().map_err(|e| e.with_span(span))?;
        if short_circuits(op, left) {
            return Ok(Value::Bool(left));
        }
        let right = self.eval_single(right)?.as_bool().map_err(|e| e.with_span(span))?;
        Ok(Value::Bool(right))
    }

    /// Read an identifier, index or field chain without copying what it
    /// passes through.
    fn eval_path(&mut self, id: ExprId) -> EvalResult {
        let (root, projections) = self.resolve_path(id)?;
        match root {
            PathRoot::Var(name, span) => {
                let value = self
                    .env
                    .lookup(name)
                    .ok_or_else(|| undefined_variable(self.interner.lookup(name)).with_span(span))?;
                read_projected(value, &projections, self.interner)
            }
            PathRoot::Value(value) => read_projected(&value, &projections, self.interner),
        }
    }

    /// Resolve an addressable chain into its root and evaluated projections.
    ///
    /// Index operands are evaluated left to right as they appear; nothing is
    /// bounds-checked yet.
    pub(crate) fn resolve_path(&mut self, id: ExprId) -> EvalResult<(PathRoot, Projections)> {
        let program = self.program;
        let expr = program.arena.get_expr(id);
        match &expr.kind {
            ExprKind::Ident(name) => Ok((PathRoot::Var(*name, expr.span), Projections::new())),
            ExprKind::Index { target, index } => {
                let (root, mut projections) = self.resolve_path(*target)?;
                let index = self
                    .eval_expr(*index)?
                    .as_index()
                    .map_err(|e| e.with_span(expr.span))?;
                projections.push(Projection::Index {
                    index,
                    span: expr.span,
                });
                Ok((root, projections))
            }
            ExprKind::Field { receiver, field } => {
                let (root, mut projections) = self.resolve_path(*receiver)?;
                projections.push(Projection::Field {
                    name: *field,
                    span: expr.span,
                });
                Ok((root, projections))
            }
            _ => Ok((PathRoot::Value(self.eval_expr(id)?), Projections::new())),
        }
    }

    /// `append(slice, value)`, with both operands in one call phase.
    pub(crate) fn eval_append(&mut self, slice: ExprId, value: ExprId, span: Span) -> EvalResult {
        let (target, value) = self.with_hoisted(&[slice, value], |this| {
            Ok((this.eval_expr(slice)?, this.eval_expr(value)?))
        })?;
        let Value::Slice(target) = target else {
            return Err(type_mismatch("slice", target.type_name()).with_span(span));
        };
        let grown = target.append(value, self.growth_policy);
        if !grown.shares_buffer(&target) {
            self.mode_state.count_slice_reallocation();
        }
        Ok(Value::Slice(grown))
    }
}

#[inline]
fn short_circuits(op: BinaryOp, left: bool) -> bool {
    match op {
        BinaryOp::And => !left,
        _ => left,
    }
}

#[expect(clippy::cast_possible_truncation, reason = "rune constants wrap to 32 bits")]
fn truncate_rune(n: i64) -> i32 {
    n as i32
}

fn length_to_int(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
