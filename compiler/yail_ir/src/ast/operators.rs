//! Operator enums shared by the parser and the evaluator.

use std::fmt;

/// Binary operators.
///
/// `is` / `is not` are textual aliases of `==` / `!=` and lower to the same
/// variants during parsing.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Textual logic / bitwise
    And,
    Or,
    Xor,
}

impl BinaryOp {
    /// Source-level symbol for error messages.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
        }
    }

    /// Whether this operator is one of the compound-assignment arithmetic ops.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Self operations (`x++`, `--x`, `x**`, `x//`).
///
/// `**` squares the operand and `//` floor-halves it; both desugar in the
/// evaluator to the power / floor-divide entry points of the operation
/// engine with a constant right operand.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SelfOp {
    Increment,
    Decrement,
    Square,
    Halve,
}

impl SelfOp {
    /// Source-level symbol for error messages.
    pub fn as_symbol(self) -> &'static str {
        match self {
            SelfOp::Increment => "++",
            SelfOp::Decrement => "--",
            SelfOp::Square => "**",
            SelfOp::Halve => "//",
        }
    }
}

impl fmt::Display for SelfOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Whether a self operation is written before or after the identifier.
///
/// A pre operation yields the updated value; a post operation yields the
/// value the variable held before the update.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpPosition {
    Pre,
    Post,
}
