//! Terminal rendering for diagnostics.

use std::fmt::Write as _;

use crate::{Diagnostic, SourceMap};

/// Render a diagnostic against its source to a plain-text report.
///
/// Format:
///
/// ```text
/// error: undefined variable: x
///   --> 3:9
///    |
///  3 | println(x);
///    |
/// ```
pub fn render(diag: &Diagnostic, map: &SourceMap<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", diag.severity, diag.message);

    if let Some(span) = diag.span {
        let pos = map.span_start(span);
        let line = map.line_text(span.start);
        let gutter = pos.line.to_string().len();
        let _ = writeln!(out, "{:gutter$}--> {}:{}", "", pos.line, pos.col);
        let _ = writeln!(out, "{:gutter$} |", "");
        let _ = writeln!(out, "{} | {}", pos.line, line);
        let _ = writeln!(out, "{:gutter$} |", "");
    }

    for label in &diag.labels {
        let pos = map.span_start(label.span);
        let _ = writeln!(out, "note: {} ({}:{})", label.message, pos.line, pos.col);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use yail_ir::Span;

    #[test]
    fn renders_message_and_location() {
        let source = "var x = 1;\nprintln(y);\n";
        let map = SourceMap::new(source);
        let diag = Diagnostic::error("undefined variable: y").with_span(Span::new(19, 20));
        let report = render(&diag, &map);
        assert!(report.starts_with("error: undefined variable: y"));
        assert!(report.contains("--> 2:9"));
        assert!(report.contains("2 | println(y);"));
    }

    #[test]
    fn renders_without_span() {
        let map = SourceMap::new("");
        let diag = Diagnostic {
            severity: Severity::Warning,
            message: "something".into(),
            span: None,
            labels: Vec::new(),
        };
        assert_eq!(render(&diag, &map), "warning: something\n");
    }
}
