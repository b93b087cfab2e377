//! Expression-level grammar.
//!
//! Precedence, loosest binding first:
//! logic (`and`/`or`/`xor`) < comparison < additive < multiplicative
//! < cast (`as`) < unary (`!`) < index < primary.

use yail_ir::{BinaryOp, CastTarget, DataKind, Expr, ExprKind, FieldInit};
use yail_lexer::TokenKind;

use super::Parser;
use crate::ParseError;

impl Parser {
    /// Parse one expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_logic()
    }

    fn parse_logic(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.cursor.peek_kind() {
                Some(TokenKind::And) => BinaryOp::And,
                Some(TokenKind::Or) => BinaryOp::Or,
                Some(TokenKind::Xor) => BinaryOp::Xor,
                _ => break,
            };
            self.cursor.advance();
            let right = self.parse_comparison()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.cursor.peek_kind() {
                Some(TokenKind::Eq) => BinaryOp::Eq,
                Some(TokenKind::NotEq) => BinaryOp::NotEq,
                Some(TokenKind::Lt) => BinaryOp::Lt,
                Some(TokenKind::Gt) => BinaryOp::Gt,
                Some(TokenKind::LtEq) => BinaryOp::LtEq,
                Some(TokenKind::GtEq) => BinaryOp::GtEq,
                // `is` / `is not` alias `==` / `!=`
                Some(TokenKind::Is) => {
                    self.cursor.advance();
                    let op = if self.cursor.eat(&TokenKind::NotKw) {
                        BinaryOp::NotEq
                    } else {
                        BinaryOp::Eq
                    };
                    let right = self.parse_additive()?;
                    let span = left.span.merge(right.span);
                    left = Expr::new(
                        ExprKind::Binary {
                            op,
                            left: Box::new(left),
                            right: Box::new(right),
                        },
                        span,
                    );
                    continue;
                }
                _ => break,
            };
            self.cursor.advance();
            let right = self.parse_additive()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.cursor.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.cursor.advance();
            let right = self.parse_multiplicative()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_cast()?;
        loop {
            let op = match self.cursor.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                Some(TokenKind::Percent) => BinaryOp::Mod,
                _ => break,
            };
            self.cursor.advance();
            let right = self.parse_cast()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    /// `value as type`, left-associative (`x as i32 as string`).
    fn parse_cast(&mut self) -> Result<Expr, ParseError> {
        let mut value = self.parse_unary()?;
        while self.cursor.eat(&TokenKind::As) {
            let (name, span) = self.cursor.expect_type_name()?;
            let target = CastTarget::from_keyword(&name)
                .ok_or_else(|| ParseError::new(format!("`{name}` is not a cast target"), span))?;
            let full = value.span.merge(span);
            value = Expr::new(
                ExprKind::Cast {
                    value: Box::new(value),
                    target,
                },
                full,
            );
        }
        Ok(value)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.cursor.check(&TokenKind::Bang) {
            let start = self.cursor.error_span();
            self.cursor.advance();
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(ExprKind::Not(Box::new(operand)), span));
        }
        self.parse_postfix()
    }

    /// Index chains: `expr[i]`, `expr[i][j]`.
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        while self.cursor.eat(&TokenKind::LBracket) {
            let index = self.parse_expr()?;
            let end = self.cursor.error_span();
            self.cursor.expect(&TokenKind::RBracket)?;
            let span = expr.span.merge(end);
            expr = Expr::new(
                ExprKind::Index {
                    target: Box::new(expr),
                    index: Box::new(index),
                },
                span,
            );
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.cursor.error_span();
        match self.cursor.peek_kind() {
            Some(TokenKind::Int(value)) => {
                let value = *value;
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Int(value), span))
            }
            // negative numeric literals (`-1`, `-2.5`); binary minus is
            // consumed by the additive level before primaries are reached
            Some(TokenKind::Minus) => {
                self.cursor.advance();
                match self.cursor.peek_kind() {
                    Some(TokenKind::Int(value)) => {
                        let value = value.wrapping_neg();
                        let end = self.cursor.error_span();
                        self.cursor.advance();
                        Ok(Expr::new(ExprKind::Int(value), span.merge(end)))
                    }
                    Some(TokenKind::Double(value)) => {
                        let value = -*value;
                        let end = self.cursor.error_span();
                        self.cursor.advance();
                        Ok(Expr::new(ExprKind::Double(value), span.merge(end)))
                    }
                    _ => Err(self.cursor.unexpected("numeric literal after `-`")),
                }
            }
            Some(TokenKind::Double(value)) => {
                let value = *value;
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Double(value), span))
            }
            Some(TokenKind::Str(value)) => {
                let value = value.clone();
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Str(value), span))
            }
            Some(TokenKind::Char(value)) => {
                let value = *value;
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Char(value), span))
            }
            Some(TokenKind::True) => {
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Bool(true), span))
            }
            Some(TokenKind::False) => {
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Bool(false), span))
            }
            Some(TokenKind::Null) => {
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Null, span))
            }
            Some(TokenKind::Len) => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::LParen)?;
                let value = self.parse_expr()?;
                let end = self.cursor.error_span();
                self.cursor.expect(&TokenKind::RParen)?;
                Ok(Expr::new(ExprKind::Len(Box::new(value)), span.merge(end)))
            }
            Some(TokenKind::LParen) => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                let end = self.cursor.error_span();
                self.cursor.expect(&TokenKind::RParen)?;
                Ok(Expr::new(
                    ExprKind::Paren(Box::new(inner)),
                    span.merge(end),
                ))
            }
            Some(TokenKind::LBracket) => self.parse_array_literal(),
            Some(TokenKind::LBrace) => self.parse_dict_literal(),
            Some(TokenKind::New) => self.parse_new(),
            Some(TokenKind::Ident(_)) => self.parse_ident_expr(),
            _ => Err(self.cursor.unexpected("expression")),
        }
    }

    /// `[a, b, c]` with an optional element-kind suffix (`[1, 2] i32`).
    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::LBracket)?;
        let mut elements = Vec::new();
        if !self.cursor.check(&TokenKind::RBracket) {
            loop {
                elements.push(self.parse_expr()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        let mut end = self.cursor.error_span();
        self.cursor.expect(&TokenKind::RBracket)?;

        let elem_kind = if let Some(TokenKind::TypeName(name)) = self.cursor.peek_kind() {
            let name = name.clone();
            end = self.cursor.error_span();
            let kind = DataKind::from_keyword(&name).ok_or_else(|| {
                ParseError::new(format!("`{name}` is not an element kind"), end)
            })?;
            self.cursor.advance();
            Some(kind)
        } else {
            None
        };

        Ok(Expr::new(
            ExprKind::Array {
                elements,
                elem_kind,
            },
            start.merge(end),
        ))
    }

    /// `{"key": value, ...}` - keys are string literals.
    fn parse_dict_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::LBrace)?;
        let mut entries = Vec::new();
        if !self.cursor.check(&TokenKind::RBrace) {
            loop {
                let key = match self.cursor.peek_kind() {
                    Some(TokenKind::Str(key)) => {
                        let key = key.clone();
                        self.cursor.advance();
                        key
                    }
                    _ => return Err(self.cursor.unexpected("string key")),
                };
                self.cursor.expect(&TokenKind::Colon)?;
                let value = self.parse_expr()?;
                entries.push((key, value));
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        let end = self.cursor.error_span();
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(Expr::new(
            ExprKind::Dict { entries },
            start.merge(end),
        ))
    }

    /// `new [package::]Name() { field = expr; ... }`
    fn parse_new(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::New)?;
        let (first, _) = self.cursor.expect_ident()?;
        let (package, name) = if self.cursor.eat(&TokenKind::PathSep) {
            let (name, _) = self.cursor.expect_ident()?;
            (Some(first), name)
        } else {
            (None, first)
        };
        self.cursor.expect(&TokenKind::LParen)?;
        self.cursor.expect(&TokenKind::RParen)?;

        let mut ctor = Vec::new();
        if self.cursor.eat(&TokenKind::LBrace) {
            while !self.cursor.check(&TokenKind::RBrace) {
                let field_span = self.cursor.error_span();
                let (field_name, _) = self.cursor.expect_ident()?;
                self.cursor.expect(&TokenKind::Assign)?;
                let value = self.parse_expr()?;
                let span = field_span.merge(value.span);
                self.cursor.expect(&TokenKind::Semi)?;
                ctor.push(FieldInit {
                    name: field_name,
                    value,
                    span,
                });
            }
            self.cursor.expect(&TokenKind::RBrace)?;
        }

        let span = start.merge(self.cursor.prev_span());
        Ok(Expr::new(
            ExprKind::New {
                package,
                name,
                ctor,
            },
            span,
        ))
    }

    /// Identifier-led expressions: variable reads, calls, namespaced calls,
    /// field reads, and method calls.
    fn parse_ident_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.error_span();
        let (name, _) = self.cursor.expect_ident()?;

        match self.cursor.peek_kind() {
            Some(TokenKind::PathSep) => {
                self.cursor.advance();
                let (func, _) = self.cursor.expect_ident()?;
                let args = self.parse_call_args()?;
                let span = start.merge(self.cursor.prev_span());
                Ok(Expr::new(
                    ExprKind::NamespacedCall {
                        package: name,
                        name: func,
                        args,
                    },
                    span,
                ))
            }
            Some(TokenKind::LParen) => {
                let args = self.parse_call_args()?;
                let span = start.merge(self.cursor.prev_span());
                Ok(Expr::new(ExprKind::Call { name, args }, span))
            }
            Some(TokenKind::Dot) => {
                self.cursor.advance();
                let (member, member_span) = self.cursor.expect_ident()?;
                if self.cursor.check(&TokenKind::LParen) {
                    let args = self.parse_call_args()?;
                    let span = start.merge(self.cursor.prev_span());
                    Ok(Expr::new(
                        ExprKind::MethodCall {
                            object: name,
                            method: member,
                            args,
                        },
                        span,
                    ))
                } else {
                    Ok(Expr::new(
                        ExprKind::Field {
                            object: name,
                            field: member,
                        },
                        start.merge(member_span),
                    ))
                }
            }
            _ => Ok(Expr::new(ExprKind::Ident(name), start)),
        }
    }

    /// `(arg, arg, ...)`
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(args)
    }
}
