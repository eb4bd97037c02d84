//! Package-level declarations.

use super::VarSpec;
use crate::{ExprArena, Name, Span, StmtId, TypeId, TypeTable};

/// Function parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub name: Name,
    pub ty: TypeId,
}

/// Function definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub name: Name,
    pub params: Vec<Param>,
    /// Declared result types; empty for functions without results.
    pub results: Vec<TypeId>,
    /// Always a `StmtKind::Block`.
    pub body: StmtId,
    pub span: Span,
}

impl Function {
    /// Whether the function declares at least one result.
    #[inline]
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Package-level declaration, in source order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decl {
    Var(VarSpec),
    Type { name: Name, ty: TypeId, span: Span },
    Func(Function),
}

/// A whole GoLite package, ready to execute.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub package: Name,
    pub decls: Vec<Decl>,
    pub arena: ExprArena,
    pub types: TypeTable,
}

impl Program {
    /// Function declarations in source order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Func(func) => Some(func),
            _ => None,
        })
    }

    /// Package-level `var` specs in source order.
    pub fn globals(&self) -> impl Iterator<Item = &VarSpec> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Var(spec) => Some(spec),
            _ => None,
        })
    }

    /// Look up a function by name.
    pub fn function(&self, name: Name) -> Option<&Function> {
        self.functions().find(|f| f.name == name)
    }
}
