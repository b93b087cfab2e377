//! `yail` - run a Yail script.
//!
//! Usage: `yail <file.y|file.yail>`

use std::path::Path;
use std::process::ExitCode;

use yailc::pipeline;
use yailc::preprocess;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path_arg) = args.next() else {
        eprintln!("error: provide a source file path");
        return ExitCode::FAILURE;
    };

    let path = Path::new(&path_arg);
    if !preprocess::has_source_extension(path) {
        eprintln!("error: Yail source files must end with '.y' or '.yail'");
        return ExitCode::FAILURE;
    }

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let combined = preprocess::prepend_imports(&source, path);
    let prepared = preprocess::strip_using_statements(&preprocess::strip_comments(&combined));

    match pipeline::execute(&prepared) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprint!("{report}");
            ExitCode::FAILURE
        }
    }
}
