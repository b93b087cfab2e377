//! Evaluation errors.
//!
//! `EvalErrorKind` gives every failure a typed category so callers can
//! match on the kind instead of parsing message strings. Factory functions
//! are the construction API; they populate both `kind` and `message`.
//!
//! Every error here is fatal to the running script. The evaluator never
//! terminates the host process; the CLI decides what a failure means.

use std::fmt;

use yail_ir::{BinaryOp, Span};

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Variables
    UndefinedVariable { name: String },
    RedeclaredVariable { name: String },

    // Functions
    UndefinedFunction { name: String },
    ArityMismatch { name: String, expected: usize, got: usize },
    AccessViolation { name: String },

    // Structs
    UndefinedStruct { name: String },
    DuplicateDefinition { name: String },

    // Types and operators
    TypeMismatch { expected: String, got: String },
    UnsupportedOperation { detail: String },

    // Arithmetic
    DivisionByZero,

    // Containers
    IndexOutOfRange { index: i32 },
    KeyNotFound { key: String },

    /// Catch-all for failures without a structured kind.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "variable '{name}' is not defined"),
            Self::RedeclaredVariable { name } => {
                write!(f, "variable '{name}' is already defined")
            }
            Self::UndefinedFunction { name } => write!(f, "undefined function: {name}"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let word = if *expected == 1 {
                    "parameter"
                } else {
                    "parameters"
                };
                write!(f, "function '{name}' expects {expected} {word}, got {got}")
            }
            Self::AccessViolation { name } => {
                write!(f, "cannot call private function '{name}'")
            }
            Self::UndefinedStruct { name } => write!(f, "struct '{name}' is not defined"),
            Self::DuplicateDefinition { name } => {
                write!(f, "duplicate definition of {name}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::UnsupportedOperation { detail } => f.write_str(detail),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IndexOutOfRange { index } => write!(f, "index {index} out of range"),
            Self::KeyNotFound { key } => write!(f, "cannot find key '{key}'"),
            Self::Custom { message } => f.write_str(message),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-made
    /// errors.
    pub message: String,
    /// Source location where the error occurred, when known.
    pub span: Option<Span>,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    ///
    /// Prefer the specific factory functions when a structured kind fits.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            span: None,
        }
    }

    /// Create an error from a structured kind.
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    /// Attach a source span, keeping an already-attached one.
    ///
    /// Errors are spanned at the innermost point that knows a location;
    /// outer frames must not overwrite it.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Factory functions

pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

pub fn redeclared_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RedeclaredVariable {
        name: name.to_string(),
    })
}

pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

pub fn access_violation(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AccessViolation {
        name: name.to_string(),
    })
}

pub fn undefined_struct(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedStruct {
        name: name.to_string(),
    })
}

pub fn duplicate_definition(name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateDefinition { name: name.into() })
}

pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.into(),
        got: got.into(),
    })
}

pub fn unsupported_operation(detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        detail: detail.into(),
    })
}

/// Operator applied to an incompatible kind pairing.
pub fn invalid_binary_op(op: BinaryOp, left: &str, right: &str) -> EvalError {
    unsupported_operation(format!(
        "operator `{}` is not supported for {left} and {right}",
        op.as_symbol()
    ))
}

pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

pub fn index_out_of_range(index: i32) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index })
}

pub fn key_not_found(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}
