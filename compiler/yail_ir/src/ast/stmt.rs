//! Statement nodes and top-level declarations.

use crate::{AccessLevel, BinaryOp, DataKind, Expr, OpPosition, SelfOp, Span};

/// A parsed program: the statement list of one (preprocessed) source unit.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// Statement variants.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `package name` - sets the active package.
    Package(String),

    /// `using name;` - import marker, consumed by the preprocessor.
    Using(String),

    /// `#use name` - evaluator directive, active for the rest of the run.
    Directive(String),

    /// `var name = expr;` / `var ref name = expr;`
    VarDecl {
        name: String,
        is_ref: bool,
        value: Expr,
    },

    /// `name = expr;` or `name[index] = expr;`
    Assign {
        name: String,
        index: Option<Expr>,
        value: Expr,
    },

    /// `name op= expr;` (compound assignment, arithmetic ops only)
    OpAssign {
        name: String,
        op: BinaryOp,
        value: Expr,
    },

    /// `name++;` / `++name;` / `name**;` / `name//;`
    SelfOp {
        name: String,
        op: SelfOp,
        position: OpPosition,
    },

    /// `object.field = expr;`
    FieldAssign {
        object: String,
        field: String,
        value: Expr,
    },

    /// Expression in statement position (calls, method calls).
    Expr(Expr),

    /// `return;` / `return expr;`
    Return(Option<Expr>),

    /// `break;`
    Break,

    /// `continue;`
    Continue,

    /// `if (cond) { } else if (cond) { } else { }`
    ///
    /// Each arm is a condition plus body; the trailing else has no
    /// condition. Exactly one body executes.
    If {
        arms: Vec<IfArm>,
        else_body: Option<Vec<Stmt>>,
    },

    /// `while (cond) { }`
    While { cond: Expr, body: Vec<Stmt> },

    /// `for (init; cond; update) { }` - all three clauses optional.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        update: Option<Box<Stmt>>,
        body: Vec<Stmt>,
    },

    /// `foreach (name in iterable) { }`
    Foreach {
        var: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },

    /// Function declaration.
    FnDecl(FnDecl),

    /// Struct declaration.
    StructDecl(StructDecl),
}

/// One `if` / `else if` arm.
#[derive(Clone, Debug, PartialEq)]
pub struct IfArm {
    pub cond: Expr,
    pub body: Vec<Stmt>,
}

/// A function declaration.
///
/// Stored by the evaluator under `package::name`; the body is walked on
/// every call.
#[derive(Clone, Debug, PartialEq)]
pub struct FnDecl {
    pub name: String,
    pub access: AccessLevel,
    pub params: Vec<Param>,
    pub return_kind: DataKind,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A declared parameter: name plus declared kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: DataKind,
}

/// A struct declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub access: AccessLevel,
    pub fields: Vec<StructFieldDecl>,
    pub span: Span,
}

/// One field line of a struct declaration.
///
/// A missing default expression means the field starts at the zero value
/// of its declared kind.
#[derive(Clone, Debug, PartialEq)]
pub struct StructFieldDecl {
    pub name: String,
    pub kind: DataKind,
    pub default: Option<Expr>,
}
