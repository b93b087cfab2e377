//! Yail Diagnostic - error reporting for the Yail interpreter.
//!
//! Front-end and runtime failures are converted into [`Diagnostic`] values
//! and rendered against a [`SourceMap`], which resolves the byte-offset
//! spans carried on AST nodes into line/column positions.

mod diagnostic;
mod emitter;
mod source_map;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::render;
pub use source_map::{LineCol, SourceMap};
