//! Print and input handlers for configurable console I/O.
//!
//! Output from `print`/`println` and input for `input()` go through
//! handler enums so embedders and tests can capture or script them:
//! - Native runs: stdout / stdin (defaults)
//! - Tests: buffer output for assertions, scripted input lines
//!
//! Enum dispatch instead of trait objects keeps this hot path static.

use std::io::BufRead;

use parking_lot::Mutex;

/// Print handler implementation.
pub enum PrintHandlerImpl {
    /// Writes to stdout (default).
    Stdout,
    /// Captures to a buffer (testing/embedding).
    Buffer(Mutex<String>),
}

impl PrintHandlerImpl {
    /// Print without newline.
    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout => print!("{msg}"),
            Self::Buffer(buffer) => buffer.lock().push_str(msg),
        }
    }

    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout => println!("{msg}"),
            Self::Buffer(buffer) => {
                let mut buf = buffer.lock();
                buf.push_str(msg);
                buf.push('\n');
            }
        }
    }

    /// Get all captured output.
    ///
    /// Returns an empty string for the stdout handler, which does not
    /// capture.
    pub fn output(&self) -> String {
        match self {
            Self::Stdout => String::new(),
            Self::Buffer(buffer) => buffer.lock().clone(),
        }
    }
}

/// Create the default stdout handler.
pub fn stdout_handler() -> PrintHandlerImpl {
    PrintHandlerImpl::Stdout
}

/// Create a buffer handler for capturing output.
pub fn buffer_handler() -> PrintHandlerImpl {
    PrintHandlerImpl::Buffer(Mutex::new(String::new()))
}

/// Input source for the `input()` built-in.
pub enum InputSource {
    /// Blocking reads from stdin (default).
    Stdin,
    /// Scripted lines consumed in order (testing); exhausted lines read
    /// as empty strings.
    Scripted(Mutex<Vec<String>>),
}

impl InputSource {
    /// Read one line, without its trailing newline.
    ///
    /// End of input reads as an empty string.
    pub fn read_line(&self) -> String {
        match self {
            Self::Stdin => {
                let mut line = String::new();
                let _ = std::io::stdin().lock().read_line(&mut line);
                line.trim_end_matches(['\n', '\r']).to_string()
            }
            Self::Scripted(lines) => {
                let mut lines = lines.lock();
                if lines.is_empty() {
                    String::new()
                } else {
                    lines.remove(0)
                }
            }
        }
    }
}

/// Create the default stdin input source.
pub fn stdin_input() -> InputSource {
    InputSource::Stdin
}

/// Create a scripted input source from prepared lines.
pub fn scripted_input(lines: Vec<String>) -> InputSource {
    InputSource::Scripted(Mutex::new(lines))
}
