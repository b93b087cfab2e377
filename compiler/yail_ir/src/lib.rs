//! Yail IR - syntax tree and shared definitions for the Yail interpreter.
//!
//! This crate holds everything the front end and the evaluator share:
//!
//! - [`Span`]: byte-offset source locations
//! - AST node types ([`Program`], [`Stmt`], [`Expr`] and friends)
//! - Operator enums ([`BinaryOp`], [`SelfOp`])
//! - [`DataKind`] / [`CastTarget`]: the language's type keywords
//!
//! The AST is a plain boxed tree with a tagged variant per node kind, so
//! consumers dispatch by exhaustive `match` and an unhandled node kind is
//! a compile-time error.

mod ast;
mod data_kind;
mod span;

pub use ast::{
    BinaryOp, Expr, ExprKind, FieldInit, FnDecl, IfArm, OpPosition, Param, Program, SelfOp,
    Stmt, StmtKind, StructDecl, StructFieldDecl,
};
pub use data_kind::{AccessLevel, CastTarget, DataKind};
pub use span::Span;
