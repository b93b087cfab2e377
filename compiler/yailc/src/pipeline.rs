//! Parse-and-evaluate pipeline with diagnostic rendering.

use yail_diagnostic::{render, Diagnostic, SourceMap};
use yail_eval::Interpreter;

/// Parse and evaluate a preprocessed source text.
///
/// On failure, returns the rendered diagnostic report. The interpreter
/// itself never terminates the process; deciding what a failure means is
/// the caller's job.
pub fn execute(source: &str) -> Result<(), String> {
    let map = SourceMap::new(source);

    tracing::debug!(bytes = source.len(), "parsing");
    let program = match yail_parse::parse_source(source) {
        Ok(program) => program,
        Err(err) => return Err(render(&err.to_diagnostic(), &map)),
    };

    tracing::debug!(stmts = program.stmts.len(), "evaluating");
    let mut interpreter = Interpreter::new();
    interpreter.run(&program).map_err(|err| {
        let mut diag = Diagnostic::error(err.message.clone());
        if let Some(span) = err.span {
            diag = diag.with_span(span);
        }
        render(&diag, &map)
    })
}

/// Parse and evaluate with explicit I/O handlers, returning captured
/// output. Used by embedders and tests.
pub fn execute_captured(source: &str) -> Result<String, String> {
    let map = SourceMap::new(source);

    let program = match yail_parse::parse_source(source) {
        Ok(program) => program,
        Err(err) => return Err(render(&err.to_diagnostic(), &map)),
    };

    let mut interpreter = Interpreter::with_io(
        yail_eval::buffer_handler(),
        yail_eval::scripted_input(Vec::new()),
    );
    match interpreter.run(&program) {
        Ok(()) => Ok(interpreter.output()),
        Err(err) => {
            let mut diag = Diagnostic::error(err.message.clone());
            if let Some(span) = err.span {
                diag = diag.with_span(span);
            }
            Err(render(&diag, &map))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::{strip_comments, strip_using_statements};
    use pretty_assertions::assert_eq;

    #[test]
    fn executes_preprocessed_source() {
        let raw = "
            using mathlib;
            // greet the world
            var x = 1;
            println(x);
        ";
        let source = strip_using_statements(&strip_comments(raw));
        assert_eq!(execute_captured(&source).unwrap(), "1\n");
    }

    #[test]
    fn parse_failure_renders_location() {
        let report = execute_captured("var x = ;").unwrap_err();
        assert!(report.starts_with("error:"));
        assert!(report.contains("-->"));
    }

    #[test]
    fn eval_failure_renders_location() {
        let report = execute_captured("println(missing);").unwrap_err();
        assert!(report.contains("variable 'missing' is not defined"));
        assert!(report.contains("println(missing);"));
    }
}
