//! Yail Parse - recursive-descent parser for the Yail interpreter.
//!
//! Consumes the token stream from `yail_lexer` and produces the boxed AST
//! from `yail_ir`. Parsing is fail-fast: the first error aborts with a
//! spanned [`ParseError`], which converts into a `yail_diagnostic`
//! diagnostic for rendering.

mod cursor;
mod error;
mod grammar;

pub use error::ParseError;

use yail_ir::Program;
use yail_lexer::Token;

use grammar::Parser;

/// Parse a token list into a program.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

/// Lex and parse a (preprocessed) source text.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    tracing::debug!(len = source.len(), "parsing source");
    let tokens = yail_lexer::lex(source)?;
    let program = parse_tokens(tokens)?;
    tracing::debug!(stmts = program.stmts.len(), "parsed program");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use yail_ir::{
        AccessLevel, BinaryOp, DataKind, ExprKind, OpPosition, SelfOp, StmtKind,
    };

    fn stmt_kinds(source: &str) -> Vec<StmtKind> {
        parse_source(source)
            .unwrap()
            .stmts
            .into_iter()
            .map(|s| s.kind)
            .collect()
    }

    #[test]
    fn parses_package_and_declaration() {
        let kinds = stmt_kinds("package main\nvar x = 3;");
        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds[0], StmtKind::Package("main".into()));
        let StmtKind::VarDecl { name, is_ref, value } = &kinds[1] else {
            panic!("expected declaration, got {:?}", kinds[1]);
        };
        assert_eq!(name, "x");
        assert!(!is_ref);
        assert_eq!(value.kind, ExprKind::Int(3));
    }

    #[test]
    fn parses_reference_declaration() {
        let kinds = stmt_kinds("var ref x = a[1];");
        let StmtKind::VarDecl { is_ref, value, .. } = &kinds[0] else {
            panic!("expected declaration");
        };
        assert!(is_ref);
        assert!(matches!(value.kind, ExprKind::Index { .. }));
    }

    #[test]
    fn parses_array_literal_with_suffix() {
        let kinds = stmt_kinds("var a = [1, 2, 3] i32;");
        let StmtKind::VarDecl { value, .. } = &kinds[0] else {
            panic!("expected declaration");
        };
        let ExprKind::Array { elements, elem_kind } = &value.kind else {
            panic!("expected array literal");
        };
        assert_eq!(elements.len(), 3);
        assert_eq!(*elem_kind, Some(DataKind::Int32));
    }

    #[test]
    fn parses_dictionary_literal() {
        let kinds = stmt_kinds(r#"var d = {"a": 1, "b": 2};"#);
        let StmtKind::VarDecl { value, .. } = &kinds[0] else {
            panic!("expected declaration");
        };
        let ExprKind::Dict { entries } = &value.kind else {
            panic!("expected dictionary literal");
        };
        assert_eq!(entries[0].0, "a");
        assert_eq!(entries[1].0, "b");
    }

    #[test]
    fn precedence_add_binds_tighter_than_compare() {
        let kinds = stmt_kinds("var b = 1 + 2 < 4;");
        let StmtKind::VarDecl { value, .. } = &kinds[0] else {
            panic!("expected declaration");
        };
        let ExprKind::Binary { op, left, .. } = &value.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinaryOp::Lt);
        assert!(matches!(
            left.kind,
            ExprKind::Binary {
                op: BinaryOp::Add,
                ..
            }
        ));
    }

    #[test]
    fn is_not_parses_as_not_equal() {
        let kinds = stmt_kinds("var b = x is not y;");
        let StmtKind::VarDecl { value, .. } = &kinds[0] else {
            panic!("expected declaration");
        };
        assert!(matches!(
            value.kind,
            ExprKind::Binary {
                op: BinaryOp::NotEq,
                ..
            }
        ));
    }

    #[test]
    fn parses_function_declaration() {
        let kinds = stmt_kinds("pub fn add(a i32, b i32) i32 { return a + b; }");
        let StmtKind::FnDecl(decl) = &kinds[0] else {
            panic!("expected function declaration");
        };
        assert_eq!(decl.name, "add");
        assert_eq!(decl.access, AccessLevel::Public);
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.params[0].kind, DataKind::Int32);
        assert_eq!(decl.return_kind, DataKind::Int32);
        assert_eq!(decl.body.len(), 1);
    }

    #[test]
    fn omitted_access_level_is_private() {
        let kinds = stmt_kinds("fn helper() void { }");
        let StmtKind::FnDecl(decl) = &kinds[0] else {
            panic!("expected function declaration");
        };
        assert_eq!(decl.access, AccessLevel::Private);
        assert_eq!(decl.return_kind, DataKind::Void);
    }

    #[test]
    fn parses_struct_with_defaults() {
        let kinds = stmt_kinds("pub struct Point { var x i32; var y i32 = 3; }");
        let StmtKind::StructDecl(decl) = &kinds[0] else {
            panic!("expected struct declaration");
        };
        assert_eq!(decl.name, "Point");
        assert_eq!(decl.fields.len(), 2);
        assert!(decl.fields[0].default.is_none());
        assert!(decl.fields[1].default.is_some());
    }

    #[test]
    fn parses_new_with_constructor_body() {
        let kinds = stmt_kinds("var p = new test::Point() { y = 2; };");
        let StmtKind::VarDecl { value, .. } = &kinds[0] else {
            panic!("expected declaration");
        };
        let ExprKind::New { package, name, ctor } = &value.kind else {
            panic!("expected instantiation");
        };
        assert_eq!(package.as_deref(), Some("test"));
        assert_eq!(name, "Point");
        assert_eq!(ctor.len(), 1);
        assert_eq!(ctor[0].name, "y");
    }

    #[test]
    fn parses_field_assign_and_read() {
        let kinds = stmt_kinds("p.x = 2; println(p.x);");
        assert!(matches!(kinds[0], StmtKind::FieldAssign { .. }));
        let StmtKind::Expr(call) = &kinds[1] else {
            panic!("expected expression statement");
        };
        let ExprKind::Call { args, .. } = &call.kind else {
            panic!("expected call");
        };
        assert!(matches!(args[0].kind, ExprKind::Field { .. }));
    }

    #[test]
    fn parses_indexed_assignment() {
        let kinds = stmt_kinds("a[0] = 5;");
        let StmtKind::Assign { name, index, .. } = &kinds[0] else {
            panic!("expected assignment, got {:?}", kinds[0]);
        };
        assert_eq!(name, "a");
        assert!(index.is_some());
    }

    #[test]
    fn parses_compound_assignment() {
        let kinds = stmt_kinds("x += 2;");
        assert!(matches!(
            kinds[0],
            StmtKind::OpAssign {
                op: BinaryOp::Add,
                ..
            }
        ));
    }

    #[test]
    fn parses_self_operations() {
        let kinds = stmt_kinds("x++; ++x; x**;");
        assert!(matches!(
            kinds[0],
            StmtKind::SelfOp {
                op: SelfOp::Increment,
                position: OpPosition::Post,
                ..
            }
        ));
        assert!(matches!(
            kinds[1],
            StmtKind::SelfOp {
                op: SelfOp::Increment,
                position: OpPosition::Pre,
                ..
            }
        ));
        assert!(matches!(
            kinds[2],
            StmtKind::SelfOp {
                op: SelfOp::Square,
                position: OpPosition::Post,
                ..
            }
        ));
    }

    #[test]
    fn parses_if_else_chain() {
        let kinds = stmt_kinds("if (a) { } else if (b) { } else { x = 1; }");
        let StmtKind::If { arms, else_body } = &kinds[0] else {
            panic!("expected if");
        };
        assert_eq!(arms.len(), 2);
        assert_eq!(else_body.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn parses_for_with_all_clauses() {
        let kinds = stmt_kinds("for (var i = 0; i < 10; i++) { println(i); }");
        let StmtKind::For {
            init,
            cond,
            update,
            body,
        } = &kinds[0]
        else {
            panic!("expected for");
        };
        assert!(init.is_some());
        assert!(cond.is_some());
        assert!(update.is_some());
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn parses_for_with_empty_clauses() {
        let kinds = stmt_kinds("for (;;) { break; }");
        let StmtKind::For {
            init,
            cond,
            update,
            ..
        } = &kinds[0]
        else {
            panic!("expected for");
        };
        assert!(init.is_none());
        assert!(cond.is_none());
        assert!(update.is_none());
    }

    #[test]
    fn parses_foreach() {
        let kinds = stmt_kinds("foreach (item in list) { println(item); }");
        let StmtKind::Foreach { var, .. } = &kinds[0] else {
            panic!("expected foreach");
        };
        assert_eq!(var, "item");
    }

    #[test]
    fn parses_namespaced_call_statement() {
        let kinds = stmt_kinds("math::add(1, 2);");
        let StmtKind::Expr(expr) = &kinds[0] else {
            panic!("expected expression statement");
        };
        let ExprKind::NamespacedCall { package, name, args } = &expr.kind else {
            panic!("expected namespaced call");
        };
        assert_eq!(package, "math");
        assert_eq!(name, "add");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn parses_method_call() {
        let kinds = stmt_kinds("a.push(4);");
        let StmtKind::Expr(expr) = &kinds[0] else {
            panic!("expected expression statement");
        };
        assert!(matches!(expr.kind, ExprKind::MethodCall { .. }));
    }

    #[test]
    fn parses_cast_expression() {
        let kinds = stmt_kinds("var x = y as i32;");
        let StmtKind::VarDecl { value, .. } = &kinds[0] else {
            panic!("expected declaration");
        };
        assert!(matches!(value.kind, ExprKind::Cast { .. }));
    }

    #[test]
    fn parses_directive_line() {
        let kinds = stmt_kinds("#use disable-type-checking\nvar x = 1;");
        assert_eq!(kinds[0], StmtKind::Directive("disable-type-checking".into()));
    }

    #[test]
    fn missing_semicolon_is_an_error() {
        let err = parse_source("var x = 3").unwrap_err();
        assert!(err.message.contains("`;`"));
    }

    #[test]
    fn error_carries_span() {
        let err = parse_source("var x = ;").unwrap_err();
        assert!(err.span.start > 0);
    }
}
