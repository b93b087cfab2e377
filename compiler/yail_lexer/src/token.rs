//! Cooked tokens handed to the parser.

use std::fmt;

use yail_ir::Span;

/// A spanned token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kinds after cooking (escapes resolved, literals parsed).
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // ===== Literals =====
    Int(i32),
    Double(f64),
    Str(String),
    Char(char),

    /// Identifier (variable, function, package, struct, field names).
    Ident(String),

    /// Type keyword (`i32`, `double`, `string`, `bool`, `char`, `i16`,
    /// `i64`, `any`, `void`).
    TypeName(String),

    /// `#use <name>` directive; carries the trimmed name.
    Directive(String),

    // ===== Keywords =====
    Package,
    Using,
    Var,
    Ref,
    Fn,
    Pub,
    Pv,
    Struct,
    New,
    If,
    Else,
    While,
    For,
    Foreach,
    In,
    Break,
    Continue,
    Return,
    True,
    False,
    Null,
    And,
    Or,
    Xor,
    Is,
    NotKw,
    As,
    Len,

    // ===== Symbols =====
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Colon,
    PathSep,
    Dot,
    Assign,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    PlusPlus,
    MinusMinus,
    StarStar,
    SlashSlash,
    Bang,
}

impl TokenKind {
    /// Short human-readable description for parse errors.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer literal",
            TokenKind::Double(_) => "double literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::Char(_) => "char literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::TypeName(_) => "type name",
            TokenKind::Directive(_) => "directive",
            TokenKind::Package => "`package`",
            TokenKind::Using => "`using`",
            TokenKind::Var => "`var`",
            TokenKind::Ref => "`ref`",
            TokenKind::Fn => "`fn`",
            TokenKind::Pub => "`pub`",
            TokenKind::Pv => "`pv`",
            TokenKind::Struct => "`struct`",
            TokenKind::New => "`new`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::For => "`for`",
            TokenKind::Foreach => "`foreach`",
            TokenKind::In => "`in`",
            TokenKind::Break => "`break`",
            TokenKind::Continue => "`continue`",
            TokenKind::Return => "`return`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Xor => "`xor`",
            TokenKind::Is => "`is`",
            TokenKind::NotKw => "`not`",
            TokenKind::As => "`as`",
            TokenKind::Len => "`len`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Semi => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::PathSep => "`::`",
            TokenKind::Dot => "`.`",
            TokenKind::Assign => "`=`",
            TokenKind::Eq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::PlusAssign => "`+=`",
            TokenKind::MinusAssign => "`-=`",
            TokenKind::StarAssign => "`*=`",
            TokenKind::SlashAssign => "`/=`",
            TokenKind::PercentAssign => "`%=`",
            TokenKind::PlusPlus => "`++`",
            TokenKind::MinusMinus => "`--`",
            TokenKind::StarStar => "`**`",
            TokenKind::SlashSlash => "`//`",
            TokenKind::Bang => "`!`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
