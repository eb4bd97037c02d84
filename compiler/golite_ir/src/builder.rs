//! Programmatic construction of typed programs.
//!
//! The lexer, parser and type checker live outside this workspace. Front
//! ends (and tests) hand programs over through `ProgramBuilder`, which
//! allocates nodes into the arena and annotates every expression with a
//! static type:
//!
//! - literals carry their natural type (`int`, `float64`, `rune`, `string`,
//!   `bool`);
//! - untyped integer constants take the type their context demands
//!   (`r + 1` with `r rune`, `var f float64 = 2`, argument and result
//!   positions), as the checker would have assigned;
//! - identifiers take the type of their most recent declaration;
//! - calls take the result type of the callee's signature.
//!
//! Nodes are stamped with the current span, set with [`ProgramBuilder::set_span`].

use rustc_hash::FxHashMap;

use crate::ast::{
    BinaryOp, CaseClause, Decl, Expr, ExprKind, Function, Param, Program, Stmt, StmtKind,
    UnaryOp, VarSpec,
};
use crate::{ExprArena, ExprId, Field, Name, SharedInterner, Span, StmtId, Type, TypeId, TypeTable};

struct Signature {
    params: Vec<TypeId>,
    result: TypeId,
}

/// Builder for a [`Program`].
pub struct ProgramBuilder {
    interner: SharedInterner,
    arena: ExprArena,
    types: TypeTable,
    decls: Vec<Decl>,
    package: Name,
    span: Span,
    var_types: FxHashMap<Name, TypeId>,
    signatures: FxHashMap<Name, Signature>,
    current_results: Vec<TypeId>,
}

impl ProgramBuilder {
    /// Start a `package main` program.
    pub fn new(interner: &SharedInterner) -> Self {
        ProgramBuilder {
            package: interner.intern("main"),
            interner: SharedInterner::clone(interner),
            arena: ExprArena::new(),
            types: TypeTable::new(),
            decls: Vec::new(),
            span: Span::DUMMY,
            var_types: FxHashMap::default(),
            signatures: FxHashMap::default(),
            current_results: Vec::new(),
        }
    }

    /// Intern a name.
    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Span stamped on every node built from now on.
    pub fn set_span(&mut self, span: Span) -> &mut Self {
        self.span = span;
        self
    }

    /// Type of an already built expression.
    pub fn type_of(&self, expr: ExprId) -> TypeId {
        self.arena.get_expr(expr).ty
    }

    // ===== Types =====

    /// `[]elem`
    pub fn slice_type(&mut self, elem: TypeId) -> TypeId {
        self.types.slice(elem)
    }

    /// `[len]elem`
    pub fn array_type(&mut self, elem: TypeId, len: u32) -> TypeId {
        self.types.array(elem, len)
    }

    /// `struct { fields }`
    pub fn struct_type(&mut self, fields: &[(&str, TypeId)]) -> TypeId {
        let fields = fields
            .iter()
            .map(|&(name, ty)| Field {
                name: self.interner.intern(name),
                ty,
            })
            .collect();
        self.types.structure(fields)
    }

    // ===== Expressions =====

    fn expr(&mut self, kind: ExprKind, ty: TypeId) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, ty, self.span))
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.expr(ExprKind::Int(value), TypeId::INT)
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.expr(ExprKind::float(value), TypeId::FLOAT)
    }

    pub fn rune(&mut self, value: char) -> ExprId {
        #[expect(
            clippy::cast_possible_wrap,
            reason = "code points stop at U+10FFFF, well inside i32"
        )]
        let value = u32::from(value) as i32;
        self.expr(ExprKind::Rune(value), TypeId::RUNE)
    }

    pub fn str(&mut self, value: &str) -> ExprId {
        let name = self.interner.intern(value);
        self.expr(ExprKind::Str(name), TypeId::STRING)
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Bool(value), TypeId::BOOL)
    }

    /// Variable reference typed by its most recent declaration.
    pub fn var(&mut self, name: &str) -> ExprId {
        let name = self.interner.intern(name);
        let ty = self.var_types.get(&name).copied().unwrap_or(TypeId::VOID);
        self.expr(ExprKind::Ident(name), ty)
    }

    /// The blank identifier, as an assignment target.
    pub fn blank(&mut self) -> ExprId {
        self.expr(ExprKind::Ident(Name::BLANK), TypeId::VOID)
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        if !matches!(op, BinaryOp::Shl | BinaryOp::Shr) {
            self.unify_constants(left, right);
        }
        let ty = if op.is_comparison() || op.is_short_circuit() {
            TypeId::BOOL
        } else {
            self.type_of(left)
        };
        self.expr(ExprKind::Binary { op, left, right }, ty)
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        let ty = if op == UnaryOp::Not {
            TypeId::BOOL
        } else {
            self.type_of(operand)
        };
        self.expr(ExprKind::Unary { op, operand }, ty)
    }

    pub fn index(&mut self, target: ExprId, index: ExprId) -> ExprId {
        let ty = match self.types.get(self.type_of(target)) {
            Type::Array { elem, .. } | Type::Slice { elem } => *elem,
            _ => TypeId::VOID,
        };
        self.expr(ExprKind::Index { target, index }, ty)
    }

    pub fn field(&mut self, receiver: ExprId, field: &str) -> ExprId {
        let field = self.interner.intern(field);
        let ty = match self.types.get(self.type_of(receiver)) {
            Type::Struct { fields } => fields
                .iter()
                .find(|f| f.name == field)
                .map_or(TypeId::VOID, |f| f.ty),
            _ => TypeId::VOID,
        };
        self.expr(ExprKind::Field { receiver, field }, ty)
    }

    /// Call a function declared with [`func`](Self::func) (or currently being built).
    pub fn call(&mut self, func: &str, args: Vec<ExprId>) -> ExprId {
        let func = self.interner.intern(func);
        let (params, ty) = self
            .signatures
            .get(&func)
            .map_or((Vec::new(), TypeId::VOID), |sig| (sig.params.clone(), sig.result));
        if params.len() == args.len() {
            for (&arg, &param) in args.iter().zip(&params) {
                self.coerce(arg, param);
            }
        }
        self.expr(ExprKind::Call { func, args }, ty)
    }

    pub fn append(&mut self, slice: ExprId, value: ExprId) -> ExprId {
        let ty = self.type_of(slice);
        let elem = match self.types.get(ty) {
            Type::Slice { elem } => Some(*elem),
            _ => None,
        };
        if let Some(elem) = elem {
            self.coerce(value, elem);
        }
        self.expr(ExprKind::Append { slice, value }, ty)
    }

    pub fn len(&mut self, operand: ExprId) -> ExprId {
        self.expr(ExprKind::Len(operand), TypeId::INT)
    }

    pub fn cap(&mut self, operand: ExprId) -> ExprId {
        self.expr(ExprKind::Cap(operand), TypeId::INT)
    }

    /// `ty(operand)`
    pub fn convert(&mut self, ty: TypeId, operand: ExprId) -> ExprId {
        self.expr(ExprKind::Convert(operand), ty)
    }

    /// Give an untyped integer constant the type its context demands.
    fn coerce(&mut self, expr: ExprId, ty: TypeId) {
        if ty != TypeId::RUNE && ty != TypeId::FLOAT {
            return;
        }
        if !self.is_untyped_constant(expr) {
            return;
        }
        self.retype_constant(expr, ty);
    }

    fn unify_constants(&mut self, left: ExprId, right: ExprId) {
        let (lt, rt) = (self.type_of(left), self.type_of(right));
        if self.is_untyped_constant(left) && !self.is_untyped_constant(right) {
            self.coerce(left, rt);
        } else if self.is_untyped_constant(right) && !self.is_untyped_constant(left) {
            self.coerce(right, lt);
        }
    }

    /// Integer literal, or arithmetic over integer literals only.
    fn is_untyped_constant(&self, expr: ExprId) -> bool {
        let node = self.arena.get_expr(expr);
        if node.ty != TypeId::INT {
            return false;
        }
        match &node.kind {
            ExprKind::Int(_) => true,
            ExprKind::Unary { operand, .. } => self.is_untyped_constant(*operand),
            ExprKind::Binary { op, left, right } => {
                !op.is_comparison()
                    && self.is_untyped_constant(*left)
                    && self.is_untyped_constant(*right)
            }
            _ => false,
        }
    }

    fn retype_constant(&mut self, expr: ExprId, ty: TypeId) {
        let children = match &self.arena.get_expr(expr).kind {
            ExprKind::Unary { operand, .. } => [Some(*operand), None],
            ExprKind::Binary { left, right, .. } => [Some(*left), Some(*right)],
            _ => [None, None],
        };
        for child in children.into_iter().flatten() {
            self.retype_constant(child, ty);
        }

        let node = self.arena.get_expr_mut(expr);
        if let ExprKind::Int(value) = node.kind {
            if ty == TypeId::FLOAT {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "integer constants in float context round like Go's checker"
                )]
                let value = value as f64;
                node.kind = ExprKind::float(value);
            }
        }
        node.ty = ty;
    }

    // ===== Statements =====

    fn stmt(&mut self, kind: StmtKind) -> StmtId {
        self.arena.alloc_stmt(Stmt::new(kind, self.span))
    }

    pub fn empty(&mut self) -> StmtId {
        self.stmt(StmtKind::Empty)
    }

    pub fn block(&mut self, stmts: Vec<StmtId>) -> StmtId {
        self.stmt(StmtKind::Block(stmts))
    }

    /// Expression statement.
    pub fn eval(&mut self, expr: ExprId) -> StmtId {
        self.stmt(StmtKind::Expr(expr))
    }

    /// `targets = values`
    pub fn assign(&mut self, targets: Vec<ExprId>, values: Vec<ExprId>) -> StmtId {
        if targets.len() == values.len() {
            for (&target, &value) in targets.iter().zip(&values) {
                let ty = self.type_of(target);
                self.coerce(value, ty);
            }
        }
        self.stmt(StmtKind::Assign { targets, values })
    }

    /// `target op= value`
    pub fn op_assign(&mut self, target: ExprId, op: BinaryOp, value: ExprId) -> StmtId {
        if !matches!(op, BinaryOp::Shl | BinaryOp::Shr) {
            let ty = self.type_of(target);
            self.coerce(value, ty);
        }
        self.stmt(StmtKind::OpAssign { target, op, value })
    }

    fn var_spec(&mut self, names: &[&str], ty: Option<TypeId>, values: Vec<ExprId>) -> VarSpec {
        let names: Vec<Name> = names.iter().map(|n| self.interner.intern(n)).collect();
        if let Some(ty) = ty {
            for &value in &values {
                self.coerce(value, ty);
            }
        }
        let value_types = self.value_types(&values, names.len());
        for (i, &name) in names.iter().enumerate() {
            let declared = ty
                .or_else(|| value_types.get(i).copied())
                .unwrap_or(TypeId::VOID);
            self.var_types.insert(name, declared);
        }
        VarSpec {
            names,
            ty,
            values,
            span: self.span,
        }
    }

    /// Types of a value list, spreading a single multi-result call.
    fn value_types(&self, values: &[ExprId], arity: usize) -> Vec<TypeId> {
        if let [single] = values {
            if arity > 1 {
                if let Type::Tuple { elems } = self.types.get(self.type_of(*single)) {
                    return elems.clone();
                }
            }
        }
        values.iter().map(|&v| self.type_of(v)).collect()
    }

    /// `var names ty = values`
    pub fn var_decl(&mut self, names: &[&str], ty: Option<TypeId>, values: Vec<ExprId>) -> StmtId {
        let spec = self.var_spec(names, ty, values);
        self.stmt(StmtKind::VarDecl(vec![spec]))
    }

    /// `names := values`
    pub fn define(&mut self, names: &[&str], values: Vec<ExprId>) -> StmtId {
        let names: Vec<Name> = names.iter().map(|n| self.interner.intern(n)).collect();
        let value_types = self.value_types(&values, names.len());
        for (&name, &ty) in names.iter().zip(&value_types) {
            self.var_types.insert(name, ty);
        }
        self.stmt(StmtKind::ShortVarDecl { names, values })
    }

    /// Local `type name ty`.
    pub fn type_decl(&mut self, name: &str, ty: TypeId) -> StmtId {
        let name = self.interner.intern(name);
        self.stmt(StmtKind::TypeDecl { name, ty })
    }

    /// `target++`
    pub fn inc(&mut self, target: ExprId) -> StmtId {
        self.stmt(StmtKind::IncDec {
            target,
            decrement: false,
        })
    }

    /// `target--`
    pub fn dec(&mut self, target: ExprId) -> StmtId {
        self.stmt(StmtKind::IncDec {
            target,
            decrement: true,
        })
    }

    pub fn print(&mut self, args: Vec<ExprId>) -> StmtId {
        self.stmt(StmtKind::Print(args))
    }

    pub fn println(&mut self, args: Vec<ExprId>) -> StmtId {
        self.stmt(StmtKind::Println(args))
    }

    /// `if init; cond { then } else else_branch`
    pub fn if_(
        &mut self,
        init: Option<StmtId>,
        cond: ExprId,
        then: Vec<StmtId>,
        else_branch: Option<StmtId>,
    ) -> StmtId {
        let then_branch = self.block(then);
        self.stmt(StmtKind::If {
            init,
            cond,
            then_branch,
            else_branch,
        })
    }

    /// `for init; cond; post { body }`
    pub fn for_(
        &mut self,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        post: Option<StmtId>,
        body: Vec<StmtId>,
    ) -> StmtId {
        let body = self.block(body);
        self.stmt(StmtKind::For {
            init,
            cond,
            post,
            body,
        })
    }

    /// `case exprs: body`
    pub fn case(&self, exprs: Vec<ExprId>, body: Vec<StmtId>) -> CaseClause {
        CaseClause {
            exprs: Some(exprs),
            body,
            span: self.span,
        }
    }

    /// `default: body`
    pub fn default_case(&self, body: Vec<StmtId>) -> CaseClause {
        CaseClause {
            exprs: None,
            body,
            span: self.span,
        }
    }

    /// `switch init; tag { clauses }`
    pub fn switch(
        &mut self,
        init: Option<StmtId>,
        tag: Option<ExprId>,
        clauses: Vec<CaseClause>,
    ) -> StmtId {
        if let Some(tag) = tag {
            let ty = self.type_of(tag);
            for expr in clauses.iter().filter_map(|c| c.exprs.as_ref()).flatten() {
                self.coerce(*expr, ty);
            }
        }
        self.stmt(StmtKind::Switch { init, tag, clauses })
    }

    pub fn brk(&mut self) -> StmtId {
        self.stmt(StmtKind::Break)
    }

    pub fn cont(&mut self) -> StmtId {
        self.stmt(StmtKind::Continue)
    }

    /// `return values`
    pub fn ret(&mut self, values: Vec<ExprId>) -> StmtId {
        if values.len() == self.current_results.len() {
            for (&value, ty) in values.iter().zip(self.current_results.clone()) {
                self.coerce(value, ty);
            }
        }
        self.stmt(StmtKind::Return(values))
    }

    // ===== Declarations =====

    /// Package-level `var names ty = values`.
    pub fn global(&mut self, names: &[&str], ty: Option<TypeId>, values: Vec<ExprId>) {
        let spec = self.var_spec(names, ty, values);
        self.decls.push(Decl::Var(spec));
    }

    /// Package-level `type name ty`.
    pub fn global_type(&mut self, name: &str, ty: TypeId) {
        let name = self.interner.intern(name);
        self.decls.push(Decl::Type {
            name,
            ty,
            span: self.span,
        });
    }

    /// `func name(params) results { body }`.
    ///
    /// The signature is registered before `body` runs, so the body may call
    /// the function recursively.
    pub fn func(
        &mut self,
        name: &str,
        params: &[(&str, TypeId)],
        results: &[TypeId],
        body: impl FnOnce(&mut Self) -> Vec<StmtId>,
    ) -> Name {
        let span = self.span;
        let name = self.interner.intern(name);
        let params: Vec<Param> = params
            .iter()
            .map(|&(param, ty)| Param {
                name: self.interner.intern(param),
                ty,
            })
            .collect();
        let result = self.types.results(results);
        self.signatures.insert(
            name,
            Signature {
                params: params.iter().map(|p| p.ty).collect(),
                result,
            },
        );
        for param in &params {
            self.var_types.insert(param.name, param.ty);
        }

        let outer_results = std::mem::replace(&mut self.current_results, results.to_vec());
        let stmts = body(self);
        self.current_results = outer_results;

        let body = self.block(stmts);
        self.decls.push(Decl::Func(Function {
            name,
            params,
            results: results.to_vec(),
            body,
            span,
        }));
        name
    }

    /// Finish building.
    pub fn finish(self) -> Program {
        Program {
            package: self.package,
            decls: self.decls,
            arena: self.arena,
            types: self.types,
        }
    }
}
