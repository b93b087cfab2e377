//! AST node types.
//!
//! The tree is produced by `yail_parse` and consumed read-only by the
//! evaluator. Children are boxed; the node set matches the statement and
//! expression kinds of the language one-to-one.

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, FieldInit};
pub use operators::{BinaryOp, OpPosition, SelfOp};
pub use stmt::{
    FnDecl, IfArm, Param, Program, Stmt, StmtKind, StructDecl, StructFieldDecl,
};
