//! Assignment, op-assignment, `++`/`--` and variable declarations.
//!
//! Assignment runs in two phases. Phase one runs the calls of both sides,
//! resolves every target to a `Place` and evaluates every value. Phase two
//! commits left to right. A fault during phase two stops the statement but
//! keeps the commits already made.

use golite_ir::{BinaryOp, ExprId, ExprKind, Name, Span, VarSpec};
use smallvec::SmallVec;

use super::Interpreter;
use crate::errors::{
    assignment_mismatch, invalid_binary_op, not_addressable, undefined_variable, EvalError,
    EvalResult,
};
use crate::exec::control::spread_results;
use crate::exec::place::{
    place_for_value, place_for_var, read_projected, write_projected, PathRoot, Place,
};
use crate::operators::evaluate_binary;
use crate::Value;

impl Interpreter<'_> {
    /// `targets = values`
    pub(super) fn exec_assign(
        &mut self,
        targets: &[ExprId],
        values: &[ExprId],
        span: Span,
    ) -> EvalResult<()> {
        let roots: SmallVec<[ExprId; 8]> = targets.iter().chain(values).copied().collect();
        self.with_hoisted(&roots, |this| {
            let places = targets
                .iter()
                .map(|&target| this.resolve_place(target))
                .collect::<EvalResult<SmallVec<[Place; 4]>>>()?;
            let values = values
                .iter()
                .map(|&value| this.eval_expr(value))
                .collect::<EvalResult<Vec<Value>>>()?;
            let values = spread_results(values, places.len());
            if values.len() != places.len() {
                return Err(assignment_mismatch(places.len(), values.len()).with_span(span));
            }
            for (place, value) in places.into_iter().zip(values) {
                this.commit(place, value)?;
            }
            Ok(())
        })
    }

    /// `target op= value`: the target is resolved once.
    pub(super) fn exec_op_assign(
        &mut self,
        target: ExprId,
        op: BinaryOp,
        value: ExprId,
        span: Span,
    ) -> EvalResult<()> {
        self.with_hoisted(&[target, value], |this| {
            let place = this.resolve_place(target)?;
            let rhs = this.eval_expr(value)?;
            let current = this.read_place(&place)?;
            let result = evaluate_binary(current, rhs, op).map_err(|e| e.with_span(span))?;
            this.commit(place, result)
        })
    }

    /// `target++` / `target--`, wrapping like `+= 1`.
    pub(super) fn exec_inc_dec(
        &mut self,
        target: ExprId,
        decrement: bool,
        span: Span,
    ) -> EvalResult<()> {
        let op = if decrement {
            BinaryOp::Sub
        } else {
            BinaryOp::Add
        };
        self.with_hoisted(&[target], |this| {
            let place = this.resolve_place(target)?;
            let current = this.read_place(&place)?;
            let one = match &current {
                Value::Int(_) => Value::Int(1),
                Value::Rune(_) => Value::Rune(1),
                Value::Float(_) => Value::Float(1.0),
                other => return Err(invalid_binary_op(other.type_name(), op).with_span(span)),
            };
            let result = evaluate_binary(current, one, op).map_err(|e| e.with_span(span))?;
            this.commit(place, result)
        })
    }

    /// `names := values`
    ///
    /// A name already declared in the current scope is assigned; binding it
    /// again in the innermost scope has exactly that effect.
    pub(super) fn exec_short_var_decl(
        &mut self,
        names: &[Name],
        values: &[ExprId],
        span: Span,
    ) -> EvalResult<()> {
        let values = spread_results(self.eval_list(values)?, names.len());
        if values.len() != names.len() {
            return Err(assignment_mismatch(names.len(), values.len()).with_span(span));
        }
        for (&name, value) in names.iter().zip(values) {
            self.env.define(name, value);
        }
        Ok(())
    }

    /// Initial values of a `var` spec: zero values without initializers.
    pub(crate) fn var_spec_values(&mut self, spec: &VarSpec) -> EvalResult<Vec<Value>> {
        if spec.values.is_empty() {
            let ty = spec.ty.unwrap_or(golite_ir::TypeId::VOID);
            return Ok(spec.names.iter().map(|_| self.zero_value(ty)).collect());
        }
        let values = spread_results(self.eval_list(&spec.values)?, spec.names.len());
        if values.len() != spec.names.len() {
            return Err(assignment_mismatch(spec.names.len(), values.len()).with_span(spec.span));
        }
        Ok(values)
    }

    /// Phase one for one target.
    pub(super) fn resolve_place(&mut self, target: ExprId) -> EvalResult<Place> {
        let program = self.program;
        let expr = program.arena.get_expr(target);
        if let ExprKind::Ident(name) = expr.kind {
            if name.is_blank() {
                return Ok(Place::Blank);
            }
        }
        let (root, projections) = self.resolve_path(target)?;
        match root {
            PathRoot::Var(name, span) => {
                let current = self
                    .env
                    .lookup(name)
                    .ok_or_else(|| undefined_variable(self.interner.lookup(name)).with_span(span))?;
                Ok(place_for_var(name, span, current, projections))
            }
            PathRoot::Value(value) => place_for_value(&value, projections)
                .ok_or_else(|| not_addressable().with_span(expr.span)),
        }
    }

    /// Current value at a resolved place.
    pub(super) fn read_place(&self, place: &Place) -> EvalResult {
        match place {
            Place::Blank => Err(not_addressable()),
            Place::Var {
                name,
                span,
                projections,
            } => {
                let value = self
                    .env
                    .lookup(*name)
                    .ok_or_else(|| undefined_variable(self.interner.lookup(*name)).with_span(*span))?;
                read_projected(value, projections, self.interner)
            }
            Place::Element {
                slice,
                index,
                span,
                projections,
            } => slice
                .with_element(*index, |item| read_projected(item, projections, self.interner))
                .map_err(|kind| EvalError::from(kind).with_span(*span))?,
        }
    }

    /// Phase two for one target.
    pub(super) fn commit(&mut self, place: Place, value: Value) -> EvalResult<()> {
        let interner = self.interner;
        match place {
            Place::Blank => Ok(()),
            Place::Var {
                name,
                span,
                projections,
            } => {
                let slot = self
                    .env
                    .lookup_mut(name)
                    .ok_or_else(|| undefined_variable(interner.lookup(name)).with_span(span))?;
                write_projected(slot, &projections, value, interner)?;
                tracing::trace!(name = interner.lookup(name), "assignment committed");
                Ok(())
            }
            Place::Element {
                slice,
                index,
                span,
                projections,
            } => {
                slice
                    .with_element_mut(index, |item| {
                        write_projected(item, &projections, value, interner)
                    })
                    .map_err(|kind| EvalError::from(kind).with_span(span))??;
                tracing::trace!(index, "slice element committed");
                Ok(())
            }
        }
    }
}
