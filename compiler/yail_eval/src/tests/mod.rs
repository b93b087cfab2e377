//! Evaluator test suites.
//!
//! Operator tests exercise the operation engine directly at the `Value`
//! level; the remaining suites run source text end-to-end through the
//! parser and interpreter with a buffer print handler.

mod operators_tests;
mod struct_tests;

use crate::{buffer_handler, scripted_input, EvalError, Interpreter};

/// Run source text and return everything it printed.
pub(crate) fn run_code(source: &str) -> String {
    run_with_input(source, Vec::new())
}

/// Run source text with scripted `input()` lines.
pub(crate) fn run_with_input(source: &str, input: Vec<String>) -> String {
    let program = yail_parse::parse_source(source).expect("source should parse");
    let mut interpreter = Interpreter::with_io(buffer_handler(), scripted_input(input));
    interpreter.run(&program).expect("script should run");
    interpreter.output()
}

/// Run source text that must fail, returning the error.
pub(crate) fn run_code_err(source: &str) -> EvalError {
    let program = yail_parse::parse_source(source).expect("source should parse");
    let mut interpreter =
        Interpreter::with_io(buffer_handler(), scripted_input(Vec::new()));
    interpreter
        .run(&program)
        .expect_err("script should fail")
}
