//! Expression nodes.

use crate::{BinaryOp, CastTarget, DataKind, Span};

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression variants.
///
/// The evaluator matches exhaustively on this enum; adding a variant
/// without handling it is a compile error, not a silent fallthrough.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    // ===== Literals =====
    /// Integer literal: 42
    Int(i32),

    /// Double literal: 3.14
    Double(f64),

    /// Boolean literal: true, false
    Bool(bool),

    /// String literal (escapes already cooked)
    Str(String),

    /// Char literal: 'a', '\n'
    Char(char),

    /// Null literal
    Null,

    // ===== References =====
    /// Variable reference
    Ident(String),

    // ===== Compound expressions =====
    /// Binary operation: left op right
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Logical negation: !operand
    Not(Box<Expr>),

    /// Cast: value as target
    Cast {
        value: Box<Expr>,
        target: CastTarget,
    },

    /// Parenthesized expression: (inner)
    Paren(Box<Expr>),

    // ===== Collections =====
    /// Array literal: [a, b, c] with optional element-kind suffix
    Array {
        elements: Vec<Expr>,
        elem_kind: Option<DataKind>,
    },

    /// Dictionary literal: {"k": v, ...}
    Dict { entries: Vec<(String, Expr)> },

    /// Index access: target[index]
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },

    /// Length of a string or array: len(value)
    Len(Box<Expr>),

    // ===== Calls =====
    /// Bare function call, resolved against the active package: name(args)
    Call { name: String, args: Vec<Expr> },

    /// Package-qualified function call: package::name(args)
    NamespacedCall {
        package: String,
        name: String,
        args: Vec<Expr>,
    },

    /// Method call on a named object: object.method(args)
    MethodCall {
        object: String,
        method: String,
        args: Vec<Expr>,
    },

    // ===== Structs =====
    /// Instantiation: new [package::]Name() { field = expr; ... }
    New {
        package: Option<String>,
        name: String,
        ctor: Vec<FieldInit>,
    },

    /// Instance field read: object.field
    Field { object: String, field: String },
}

/// One `field = expr;` line inside an instantiation constructor body.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldInit {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}
