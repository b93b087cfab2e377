//! Token cursor for the recursive-descent parser.

use yail_ir::Span;
use yail_lexer::{Token, TokenKind};

use crate::ParseError;

/// Peekable position in a token list.
pub(crate) struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Whether all tokens are consumed.
    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Current token, if any.
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Current token kind, if any.
    pub(crate) fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// Token kind `n` positions ahead of the current one.
    pub(crate) fn peek_kind_at(&self, n: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + n).map(|t| &t.kind)
    }

    /// Span to attach to an error at the current position.
    ///
    /// Falls back to the last token's span at end of input.
    pub(crate) fn error_span(&self) -> Span {
        match self.peek() {
            Some(token) => token.span,
            None => self.tokens.last().map_or(Span::DUMMY, |t| t.span),
        }
    }

    /// Span of the most recently consumed token.
    pub(crate) fn prev_span(&self) -> Span {
        if self.pos == 0 {
            return Span::DUMMY;
        }
        self.tokens
            .get(self.pos - 1)
            .map_or(Span::DUMMY, |t| t.span)
    }

    /// Consume and return the current token.
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Whether the current token kind equals `kind`.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consume the current token if its kind equals `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail.
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().expect("checked token exists"))
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Consume an identifier token or fail.
    pub(crate) fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Ident(name),
                span,
            }) => {
                let out = (name.clone(), *span);
                self.pos += 1;
                Ok(out)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Consume a type-name token or fail.
    pub(crate) fn expect_type_name(&mut self) -> Result<(String, Span), ParseError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::TypeName(name),
                span,
            }) => {
                let out = (name.clone(), *span);
                self.pos += 1;
                Ok(out)
            }
            _ => Err(self.unexpected("type name")),
        }
    }

    /// Build an "expected X, found Y" error at the current position.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let found = self
            .peek_kind()
            .map_or("end of input", TokenKind::describe);
        ParseError::new(
            format!("expected {expected}, found {found}"),
            self.error_span(),
        )
    }
}
