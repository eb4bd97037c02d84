//! Evaluation errors and runtime faults.
//!
//! Two disjoint families share the `EvalError` carrier:
//!
//! - **Faults** (`EvalErrorKind::Fault`): runtime conditions a well-typed
//!   program can hit (division by zero, index out of range). They abort the
//!   evaluation and surface as `ExitStatus::Faulted`.
//! - **Ill-formed program errors**: defects a checker should have rejected
//!   (undefined names, operator type mismatches). They surface as `Err`.
//!
//! Errors are created through the `#[cold]` factory functions below and
//! located with [`EvalError::with_span`] at the raise site.

use std::fmt;

use golite_ir::{BinaryOp, Span, UnaryOp};
use thiserror::Error;

/// Unrecoverable runtime condition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FaultKind {
    #[error("integer divide by zero")]
    DivideByZero,
    #[error("index out of range [{index}] with length {length}")]
    IndexOutOfBounds { index: i64, length: usize },
    #[error("invalid memory address or nil pointer dereference")]
    NilDereference,
    #[error("negative shift amount")]
    NegativeShift,
}

/// Structured error category.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalErrorKind {
    #[error("runtime error: {0}")]
    Fault(FaultKind),

    // Access
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("undefined function: {name}")]
    UndefinedFunction { name: String },
    #[error("no field {field} on {type_name}")]
    UndefinedField {
        field: String,
        type_name: &'static str,
    },
    #[error("cannot index {type_name}")]
    NotIndexable { type_name: &'static str },
    #[error("cannot assign to this expression")]
    NotAddressable,

    // Program shape
    #[error("function main is undeclared in the main package")]
    MissingMain,
    #[error("func main must have no arguments and no return values")]
    InvalidMain,
    #[error("{name} expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("assignment mismatch: {targets} variables but {values} values")]
    AssignmentMismatch { targets: usize, values: usize },

    // Type/Operator
    #[error("operator `{}` cannot be applied to {type_name}", .op.as_symbol())]
    InvalidBinaryOp {
        type_name: &'static str,
        op: BinaryOp,
    },
    #[error("cannot apply operator to `{left}` and `{right}`")]
    BinaryTypeMismatch {
        left: &'static str,
        right: &'static str,
    },
    #[error("operator `{}` cannot be applied to {type_name}", .op.as_symbol())]
    InvalidUnaryOp {
        type_name: &'static str,
        op: UnaryOp,
    },
    #[error("{type_name} values are not comparable")]
    NotComparable { type_name: &'static str },
    #[error("expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    #[error("cannot convert {from} to {to}")]
    InvalidConversion { from: &'static str, to: String },

    // Function
    #[error("maximum call depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name.
    pub name: String,
    /// Source location of the call site.
    pub span: Option<Span>,
}

/// Immutable snapshot of the call stack at an error site, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "goroutine 1 [running]:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Source location where the error occurred.
    pub span: Option<Span>,
    /// Call stack at the error site, attached by the innermost call.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error from a structured kind.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            backtrace: None,
        }
    }

    /// Attach a source span to this error, keeping an existing one.
    ///
    /// The innermost raise site knows the most precise location.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// Attach a backtrace to this error.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// The fault, if this error is a runtime fault.
    pub fn fault(&self) -> Option<&FaultKind> {
        match &self.kind {
            EvalErrorKind::Fault(kind) => Some(kind),
            _ => None,
        }
    }
}

impl From<FaultKind> for EvalError {
    #[cold]
    fn from(kind: FaultKind) -> Self {
        EvalError::from_kind(EvalErrorKind::Fault(kind))
    }
}

/// Result of evaluation.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

/// Fault reported in a finished evaluation's exit status.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeFault {
    pub kind: FaultKind,
    pub span: Option<Span>,
    pub backtrace: Option<EvalBacktrace>,
}

impl fmt::Display for RuntimeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panic: runtime error: {}", self.kind)?;
        if let Some(span) = self.span {
            write!(f, " at {span}")?;
        }
        Ok(())
    }
}

// Faults

#[cold]
pub fn division_by_zero() -> EvalError {
    FaultKind::DivideByZero.into()
}

#[cold]
pub fn index_out_of_bounds(index: i64, length: usize) -> EvalError {
    FaultKind::IndexOutOfBounds { index, length }.into()
}

#[cold]
pub fn nil_dereference() -> EvalError {
    FaultKind::NilDereference.into()
}

#[cold]
pub fn negative_shift() -> EvalError {
    FaultKind::NegativeShift.into()
}

// Access

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_field(field: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedField {
        field: field.to_string(),
        type_name,
    })
}

#[cold]
pub fn not_indexable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIndexable { type_name })
}

#[cold]
pub fn not_addressable() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAddressable)
}

// Program shape

#[cold]
pub fn missing_main() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingMain)
}

#[cold]
pub fn invalid_main() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidMain)
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn assignment_mismatch(targets: usize, values: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssignmentMismatch { targets, values })
}

// Type/Operator

#[cold]
pub fn invalid_binary_op(type_name: &'static str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp { type_name, op })
}

#[cold]
pub fn binary_type_mismatch(left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch { left, right })
}

#[cold]
pub fn invalid_unary_op(type_name: &'static str, op: UnaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp { type_name, op })
}

#[cold]
pub fn not_comparable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotComparable { type_name })
}

#[cold]
pub fn type_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { expected, got })
}

#[cold]
pub fn invalid_conversion(from: &'static str, to: String) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidConversion { from, to })
}

// Function

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}
