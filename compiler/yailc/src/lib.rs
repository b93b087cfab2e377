//! Yailc - command-line front end for the Yail interpreter.
//!
//! Owns everything outside the evaluator core: source preprocessing
//! (comment and `using` stripping, package file concatenation), the
//! parse-and-evaluate pipeline, diagnostic rendering, and exit codes.

pub mod pipeline;
pub mod preprocess;
