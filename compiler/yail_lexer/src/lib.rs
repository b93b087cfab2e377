//! Yail Lexer - token stream for the Yail interpreter.
//!
//! A [`logos`]-derived raw token enum does the byte-level scanning; [`lex`]
//! cooks the raw matches into owned [`Token`] values (escape sequences
//! resolved, numeric literals parsed, directive names trimmed) with byte
//! spans for diagnostics.
//!
//! Comments are not handled here: the preprocessor strips them before the
//! source reaches the lexer, because `//` is also the floor-halve self
//! operator (`x//;`).

mod escape;
mod token;

pub use token::{Token, TokenKind};

use logos::Logos;
use yail_ir::Span;

/// A lexing failure with its source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl LexError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        LexError {
            message: message.into(),
            span,
        }
    }
}

/// Raw token from logos (before cooking).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    // === Directives (rest of line) ===
    #[regex(r"#use[^\n]*")]
    DirectiveLine,

    // === Keywords ===
    #[token("package")]
    Package,
    #[token("using")]
    Using,
    #[token("var")]
    Var,
    #[token("ref")]
    Ref,
    #[token("fn")]
    Fn,
    #[token("pub")]
    Pub,
    #[token("pv")]
    Pv,
    #[token("struct")]
    Struct,
    #[token("new")]
    New,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("foreach")]
    Foreach,
    #[token("in")]
    In,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("xor")]
    Xor,
    #[token("is")]
    Is,
    #[token("not")]
    Not,
    #[token("as")]
    As,
    #[token("len")]
    Len,

    // === Type keywords ===
    #[regex("i16|i32|i64|double|string|bool|char|any|void", priority = 10)]
    TypeName,

    // === Literals ===
    #[regex(r"[0-9]+\.[0-9]+")]
    DoubleLit,
    #[regex(r"[0-9]+")]
    IntLit,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLit,
    #[regex(r"'([^'\\\n]|\\.)'")]
    CharLit,

    // === Identifiers ===
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // === Symbols ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token("::")]
    PathSep,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("**")]
    StarStar,
    #[token("//")]
    SlashSlash,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
}

/// Lex a source text into cooked tokens.
///
/// Stops at the first invalid token; lexing failures are fatal to the run
/// just like every other front-end failure.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let slice = lexer.slice();
        let raw = result.map_err(|()| {
            LexError::new(format!("unrecognized token `{slice}`"), span)
        })?;
        let kind = cook(raw, slice, span)?;
        tokens.push(Token::new(kind, span));
    }

    Ok(tokens)
}

/// Convert one raw match into a cooked token kind.
fn cook(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    Ok(match raw {
        RawToken::DirectiveLine => {
            let name = slice.trim_start_matches("#use").trim();
            if name.is_empty() {
                return Err(LexError::new("`#use` directive missing a name", span));
            }
            TokenKind::Directive(name.to_string())
        }
        RawToken::IntLit => {
            let value = slice.parse::<i32>().map_err(|_| {
                LexError::new(format!("integer literal `{slice}` out of range for i32"), span)
            })?;
            TokenKind::Int(value)
        }
        RawToken::DoubleLit => {
            let value = slice.parse::<f64>().map_err(|_| {
                LexError::new(format!("invalid double literal `{slice}`"), span)
            })?;
            TokenKind::Double(value)
        }
        RawToken::StringLit => {
            let body = &slice[1..slice.len() - 1];
            let cooked = escape::cook_string(body)
                .map_err(|e| LexError::new(e.message, span))?;
            TokenKind::Str(cooked)
        }
        RawToken::CharLit => {
            let body = &slice[1..slice.len() - 1];
            let cooked = escape::cook_char(body)
                .map_err(|e| LexError::new(e.message, span))?;
            TokenKind::Char(cooked)
        }
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
        RawToken::TypeName => TokenKind::TypeName(slice.to_string()),
        RawToken::Package => TokenKind::Package,
        RawToken::Using => TokenKind::Using,
        RawToken::Var => TokenKind::Var,
        RawToken::Ref => TokenKind::Ref,
        RawToken::Fn => TokenKind::Fn,
        RawToken::Pub => TokenKind::Pub,
        RawToken::Pv => TokenKind::Pv,
        RawToken::Struct => TokenKind::Struct,
        RawToken::New => TokenKind::New,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::Foreach => TokenKind::Foreach,
        RawToken::In => TokenKind::In,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Return => TokenKind::Return,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Xor => TokenKind::Xor,
        RawToken::Is => TokenKind::Is,
        RawToken::Not => TokenKind::NotKw,
        RawToken::As => TokenKind::As,
        RawToken::Len => TokenKind::Len,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Comma => TokenKind::Comma,
        RawToken::PathSep => TokenKind::PathSep,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Assign => TokenKind::Assign,
        RawToken::PlusAssign => TokenKind::PlusAssign,
        RawToken::MinusAssign => TokenKind::MinusAssign,
        RawToken::StarAssign => TokenKind::StarAssign,
        RawToken::SlashAssign => TokenKind::SlashAssign,
        RawToken::PercentAssign => TokenKind::PercentAssign,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::SlashSlash => TokenKind::SlashSlash,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
    })
}
