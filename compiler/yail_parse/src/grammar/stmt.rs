//! Statement-level grammar.

use yail_ir::{
    AccessLevel, BinaryOp, DataKind, FnDecl, IfArm, OpPosition, Param, SelfOp, Stmt, StmtKind,
    StructDecl, StructFieldDecl,
};
use yail_lexer::TokenKind;

use super::Parser;
use crate::ParseError;

impl Parser {
    /// Parse one statement.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.cursor.peek_kind() {
            Some(TokenKind::Package) => self.parse_package(),
            Some(TokenKind::Using) => self.parse_using(),
            Some(TokenKind::Directive(_)) => self.parse_directive(),
            Some(TokenKind::Pub | TokenKind::Pv) => self.parse_decl_with_access(),
            Some(TokenKind::Fn) => self.parse_fn_decl(AccessLevel::Private),
            Some(TokenKind::Struct) => self.parse_struct_decl(AccessLevel::Private),
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::While) => self.parse_while(),
            Some(TokenKind::For) => self.parse_for(),
            Some(TokenKind::Foreach) => self.parse_foreach(),
            Some(TokenKind::Return) => self.parse_return(),
            Some(TokenKind::Break) => {
                let span = self.cursor.error_span();
                self.cursor.advance();
                self.cursor.expect(&TokenKind::Semi)?;
                Ok(Stmt::new(StmtKind::Break, span))
            }
            Some(TokenKind::Continue) => {
                let span = self.cursor.error_span();
                self.cursor.advance();
                self.cursor.expect(&TokenKind::Semi)?;
                Ok(Stmt::new(StmtKind::Continue, span))
            }
            _ => {
                let stmt = self.parse_simple_stmt()?;
                self.cursor.expect(&TokenKind::Semi)?;
                Ok(stmt)
            }
        }
    }

    /// `package name` with an optional trailing `;`.
    fn parse_package(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.advance();
        let (name, end) = self.cursor.expect_ident()?;
        self.cursor.eat(&TokenKind::Semi);
        Ok(Stmt::new(StmtKind::Package(name), start.merge(end)))
    }

    /// `using name;` / `using "file.yail";`
    fn parse_using(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.advance();
        let name = match self.cursor.peek_kind() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                self.cursor.advance();
                name
            }
            Some(TokenKind::Str(path)) => {
                let path = path.clone();
                self.cursor.advance();
                path
            }
            _ => return Err(self.cursor.unexpected("package name or file path")),
        };
        let end = self.cursor.error_span();
        self.cursor.expect(&TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::Using(name), start.merge(end)))
    }

    /// `#use name` (whole line lexed as one token).
    fn parse_directive(&mut self) -> Result<Stmt, ParseError> {
        let span = self.cursor.error_span();
        let Some(TokenKind::Directive(name)) = self.cursor.advance().map(|t| t.kind) else {
            return Err(self.cursor.unexpected("directive"));
        };
        Ok(Stmt::new(StmtKind::Directive(name), span))
    }

    /// `pub`/`pv` followed by a function or struct declaration.
    fn parse_decl_with_access(&mut self) -> Result<Stmt, ParseError> {
        let access = if self.cursor.eat(&TokenKind::Pub) {
            AccessLevel::Public
        } else {
            self.cursor.expect(&TokenKind::Pv)?;
            AccessLevel::Private
        };
        match self.cursor.peek_kind() {
            Some(TokenKind::Fn) => self.parse_fn_decl(access),
            Some(TokenKind::Struct) => self.parse_struct_decl(access),
            _ => Err(self.cursor.unexpected("`fn` or `struct`")),
        }
    }

    /// `fn name(a i32, b string) kind { ... }`
    fn parse_fn_decl(&mut self, access: AccessLevel) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::Fn)?;
        let (name, _) = self.cursor.expect_ident()?;

        self.cursor.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                let (param_name, _) = self.cursor.expect_ident()?;
                let kind = self.parse_data_kind()?;
                params.push(Param {
                    name: param_name,
                    kind,
                });
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;

        let return_kind = self.parse_data_kind()?;
        let body = self.parse_block()?;
        let span = start.merge(self.cursor.prev_span());

        Ok(Stmt::new(
            StmtKind::FnDecl(FnDecl {
                name,
                access,
                params,
                return_kind,
                body,
                span,
            }),
            span,
        ))
    }

    /// `struct Name { var x i32; var y i32 = 3; }`
    fn parse_struct_decl(&mut self, access: AccessLevel) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::Struct)?;
        let (name, _) = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            self.cursor.expect(&TokenKind::Var)?;
            let (field_name, _) = self.cursor.expect_ident()?;
            let kind = self.parse_data_kind()?;
            let default = if self.cursor.eat(&TokenKind::Assign) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.cursor.expect(&TokenKind::Semi)?;
            fields.push(StructFieldDecl {
                name: field_name,
                kind,
                default,
            });
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        let span = start.merge(self.cursor.prev_span());

        Ok(Stmt::new(
            StmtKind::StructDecl(StructDecl {
                name,
                access,
                fields,
                span,
            }),
            span,
        ))
    }

    /// `if (cond) { } else if (cond) { } else { }`
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::If)?;

        let mut arms = vec![self.parse_if_arm()?];
        let mut else_body = None;

        while self.cursor.eat(&TokenKind::Else) {
            if self.cursor.eat(&TokenKind::If) {
                arms.push(self.parse_if_arm()?);
            } else {
                else_body = Some(self.parse_block()?);
                break;
            }
        }

        let span = start.merge(self.cursor.prev_span());
        Ok(Stmt::new(StmtKind::If { arms, else_body }, span))
    }

    fn parse_if_arm(&mut self) -> Result<IfArm, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.cursor.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(IfArm { cond, body })
    }

    /// `while (cond) { }`
    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::While)?;
        self.cursor.expect(&TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.cursor.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;
        let span = start.merge(self.cursor.prev_span());
        Ok(Stmt::new(StmtKind::While { cond, body }, span))
    }

    /// `for (init; cond; update) { }` - every clause optional.
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::For)?;
        self.cursor.expect(&TokenKind::LParen)?;

        let init = if self.cursor.check(&TokenKind::Semi) {
            None
        } else {
            Some(Box::new(self.parse_simple_stmt()?))
        };
        self.cursor.expect(&TokenKind::Semi)?;

        let cond = if self.cursor.check(&TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.cursor.expect(&TokenKind::Semi)?;

        let update = if self.cursor.check(&TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_simple_stmt()?))
        };
        self.cursor.expect(&TokenKind::RParen)?;

        let body = self.parse_block()?;
        let span = start.merge(self.cursor.prev_span());
        Ok(Stmt::new(
            StmtKind::For {
                init,
                cond,
                update,
                body,
            },
            span,
        ))
    }

    /// `foreach (name in iterable) { }`
    fn parse_foreach(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::Foreach)?;
        self.cursor.expect(&TokenKind::LParen)?;
        let (var, _) = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::In)?;
        let iterable = self.parse_expr()?;
        self.cursor.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;
        let span = start.merge(self.cursor.prev_span());
        Ok(Stmt::new(
            StmtKind::Foreach {
                var,
                iterable,
                body,
            },
            span,
        ))
    }

    /// `return;` / `return expr;`
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::Return)?;
        let value = if self.cursor.check(&TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let span = start.merge(self.cursor.error_span());
        self.cursor.expect(&TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::Return(value), span))
    }

    /// A statement with no block and no trailing `;`: variable declaration,
    /// assignment, compound assignment, self operation, field assignment,
    /// or a bare expression.
    ///
    /// Shared between statement position (caller adds the `;`) and the
    /// init/update clauses of a C-style `for`.
    pub(crate) fn parse_simple_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.cursor.peek_kind() {
            Some(TokenKind::Var) => self.parse_var_decl(),
            Some(
                TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::StarStar
                | TokenKind::SlashSlash,
            ) => self.parse_pre_self_op(),
            Some(TokenKind::Ident(_)) => self.parse_ident_led(),
            _ => {
                let expr = self.parse_expr()?;
                let span = expr.span;
                Ok(Stmt::new(StmtKind::Expr(expr), span))
            }
        }
    }

    /// `var name = expr` / `var ref name = expr`
    fn parse_var_decl(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        self.cursor.expect(&TokenKind::Var)?;
        let is_ref = self.cursor.eat(&TokenKind::Ref);
        let (name, _) = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::Assign)?;
        let value = self.parse_expr()?;
        let span = start.merge(value.span);
        Ok(Stmt::new(
            StmtKind::VarDecl {
                name,
                is_ref,
                value,
            },
            span,
        ))
    }

    /// `++name` and friends.
    fn parse_pre_self_op(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.error_span();
        let op = self.self_op_from_current()?;
        self.cursor.advance();
        let (name, end) = self.cursor.expect_ident()?;
        Ok(Stmt::new(
            StmtKind::SelfOp {
                name,
                op,
                position: OpPosition::Pre,
            },
            start.merge(end),
        ))
    }

    /// Statements that start with an identifier.
    fn parse_ident_led(&mut self) -> Result<Stmt, ParseError> {
        // Lookahead decides between the assignment forms and a bare
        // expression statement (calls, field reads).
        match self.cursor.peek_kind_at(1) {
            Some(TokenKind::Assign) => {
                let start = self.cursor.error_span();
                let (name, _) = self.cursor.expect_ident()?;
                self.cursor.advance();
                let value = self.parse_expr()?;
                let span = start.merge(value.span);
                Ok(Stmt::new(
                    StmtKind::Assign {
                        name,
                        index: None,
                        value,
                    },
                    span,
                ))
            }
            Some(
                TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::StarAssign
                | TokenKind::SlashAssign
                | TokenKind::PercentAssign,
            ) => {
                let start = self.cursor.error_span();
                let (name, _) = self.cursor.expect_ident()?;
                let op = match self.cursor.advance().map(|t| t.kind) {
                    Some(TokenKind::PlusAssign) => BinaryOp::Add,
                    Some(TokenKind::MinusAssign) => BinaryOp::Sub,
                    Some(TokenKind::StarAssign) => BinaryOp::Mul,
                    Some(TokenKind::SlashAssign) => BinaryOp::Div,
                    _ => BinaryOp::Mod,
                };
                let value = self.parse_expr()?;
                let span = start.merge(value.span);
                Ok(Stmt::new(StmtKind::OpAssign { name, op, value }, span))
            }
            Some(
                TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::StarStar
                | TokenKind::SlashSlash,
            ) => {
                let start = self.cursor.error_span();
                let (name, _) = self.cursor.expect_ident()?;
                let op = self.self_op_from_current()?;
                let end = self.cursor.error_span();
                self.cursor.advance();
                Ok(Stmt::new(
                    StmtKind::SelfOp {
                        name,
                        op,
                        position: OpPosition::Post,
                    },
                    start.merge(end),
                ))
            }
            Some(TokenKind::Dot)
                if matches!(self.cursor.peek_kind_at(2), Some(TokenKind::Ident(_)))
                    && self.cursor.peek_kind_at(3) == Some(&TokenKind::Assign) =>
            {
                let start = self.cursor.error_span();
                let (object, _) = self.cursor.expect_ident()?;
                self.cursor.advance();
                let (field, _) = self.cursor.expect_ident()?;
                self.cursor.advance();
                let value = self.parse_expr()?;
                let span = start.merge(value.span);
                Ok(Stmt::new(
                    StmtKind::FieldAssign {
                        object,
                        field,
                        value,
                    },
                    span,
                ))
            }
            Some(TokenKind::LBracket) if self.indexed_assign_ahead() => {
                let start = self.cursor.error_span();
                let (name, _) = self.cursor.expect_ident()?;
                self.cursor.expect(&TokenKind::LBracket)?;
                let index = self.parse_expr()?;
                self.cursor.expect(&TokenKind::RBracket)?;
                self.cursor.expect(&TokenKind::Assign)?;
                let value = self.parse_expr()?;
                let span = start.merge(value.span);
                Ok(Stmt::new(
                    StmtKind::Assign {
                        name,
                        index: Some(index),
                        value,
                    },
                    span,
                ))
            }
            _ => {
                let expr = self.parse_expr()?;
                let span = expr.span;
                Ok(Stmt::new(StmtKind::Expr(expr), span))
            }
        }
    }

    /// Whether the tokens ahead form `name[...] =` (an indexed assignment
    /// rather than an index read in expression position).
    fn indexed_assign_ahead(&self) -> bool {
        // Starts at the `[` one past the identifier.
        let mut depth = 0usize;
        let mut n = 1;
        loop {
            match self.cursor.peek_kind_at(n) {
                Some(TokenKind::LBracket) => depth += 1,
                Some(TokenKind::RBracket) => {
                    depth -= 1;
                    if depth == 0 {
                        return self.cursor.peek_kind_at(n + 1) == Some(&TokenKind::Assign);
                    }
                }
                None => return false,
                _ => {}
            }
            n += 1;
        }
    }

    /// Map the current token to a self operation.
    fn self_op_from_current(&self) -> Result<SelfOp, ParseError> {
        match self.cursor.peek_kind() {
            Some(TokenKind::PlusPlus) => Ok(SelfOp::Increment),
            Some(TokenKind::MinusMinus) => Ok(SelfOp::Decrement),
            Some(TokenKind::StarStar) => Ok(SelfOp::Square),
            Some(TokenKind::SlashSlash) => Ok(SelfOp::Halve),
            _ => Err(self.cursor.unexpected("self operation")),
        }
    }

    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.cursor.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            if self.cursor.at_end() {
                return Err(self.cursor.unexpected("`}`"));
            }
            stmts.push(self.parse_stmt()?);
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(stmts)
    }

    /// A type keyword resolving to a declared kind.
    pub(crate) fn parse_data_kind(&mut self) -> Result<DataKind, ParseError> {
        let (name, span) = self.cursor.expect_type_name()?;
        DataKind::from_keyword(&name)
            .ok_or_else(|| ParseError::new(format!("`{name}` is not a declarable type"), span))
    }
}
