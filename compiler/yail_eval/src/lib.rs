//! Yail Eval - tree-walking evaluator for the Yail interpreter.
//!
//! # Architecture
//!
//! - [`Value`] / [`ValueData`]: the runtime value model, a sum type per
//!   kind plus a constness flag
//! - [`evaluate_binary`]: direct enum-based binary operator dispatch,
//!   including scalar broadcast over arrays
//! - [`cast_value`]: the closed explicit-cast table
//! - [`Environment`]: function-level variable scope with reference
//!   resynchronization
//! - [`Interpreter`]: statement execution with explicit [`Flow`] control
//!   signals, package-qualified function/struct tables, the call stack
//!   for private-access checks, and the active directive set
//! - [`dispatch_builtin`] / [`dispatch_array_method`]: built-in function
//!   and array method dispatch
//!
//! All failures are typed [`EvalError`] values; the evaluator never
//! terminates the host process.

mod builtins;
mod cast;
mod environment;
pub mod errors;
mod interpreter;
mod methods;
mod operators;
mod print_handler;
mod value;

#[cfg(test)]
mod tests;

pub use builtins::dispatch_builtin;
pub use cast::cast_value;
pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Flow, Interpreter, DISABLE_TYPE_CHECKING};
pub use methods::dispatch_array_method;
pub use operators::{evaluate_binary, floor_divide, power};
pub use print_handler::{
    buffer_handler, scripted_input, stdin_input, stdout_handler, InputSource,
    PrintHandlerImpl,
};
pub use value::{RefValue, StructValue, Value, ValueData};
