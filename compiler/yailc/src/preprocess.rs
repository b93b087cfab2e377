//! Source preprocessing: comment stripping, `using` extraction and
//! removal, and package file discovery.
//!
//! Preprocessing runs before the lexer. Stripped regions are replaced
//! with spaces and newlines are kept, so byte offsets in diagnostics
//! still point into recognizable source.

use std::path::{Path, PathBuf};

/// Accepted source file extensions.
pub fn has_source_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("y" | "yail")
    )
}

/// Names imported by `using` statements, quotes removed.
///
/// Plain names (`using mathlib;`) refer to library packages; quoted
/// names (`using "vec.yail";`) refer to sibling source files.
pub fn extract_usings(source: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in source.lines() {
        let trimmed = line.trim_start();
        let Some(rest) = trimmed.strip_prefix("using ") else {
            continue;
        };
        let name = rest.trim().trim_end_matches(';').trim();
        let name = name.trim_matches('"');
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    names
}

/// Blank out `using` statements, preserving line structure.
pub fn strip_using_statements(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for (i, line) in source.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.trim_start().starts_with("using ") {
            out.extend(std::iter::repeat(' ').take(line.len()));
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Strip `/* */` block comments and `//` line comments.
///
/// `//` is also the floor-halve self operator, so a line comment is only
/// recognized when the slashes are followed by whitespace, another
/// slash, or the end of the line. String and char literals are left
/// untouched. Stripped bytes become spaces; newlines survive.
pub fn strip_comments(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string = false;
    let mut in_char = false;

    while i < bytes.len() {
        let b = bytes[i];

        if in_string || in_char {
            let quote = if in_string { b'"' } else { b'\'' };
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(b);
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == quote {
                in_string = false;
                in_char = false;
            }
            out.push(b);
            i += 1;
            continue;
        }

        match b {
            b'"' => {
                in_string = true;
                out.push(b);
                i += 1;
            }
            b'\'' => {
                in_char = true;
                out.push(b);
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                // block comment: blank until the closing marker
                i += 2;
                out.extend_from_slice(b"  ");
                while i < bytes.len() {
                    if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                        out.extend_from_slice(b"  ");
                        i += 2;
                        break;
                    }
                    out.push(if bytes[i] == b'\n' { b'\n' } else { b' ' });
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/')
                && matches!(
                    bytes.get(i + 2),
                    None | Some(b' ' | b'\t' | b'/' | b'\n' | b'\r')
                ) =>
            {
                // line comment: blank to end of line
                while i < bytes.len() && bytes[i] != b'\n' {
                    out.push(b' ');
                    i += 1;
                }
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out).unwrap_or_default()
}

/// The user's library directory (`~/.yail/lib`), if a home directory is
/// known.
pub fn library_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".yail").join("lib"))
}

/// Concatenate imported package sources in front of the main source.
///
/// Plain `using` names pull `<name>.y` / `<name>.yail` from the library
/// directory; quoted file names resolve against the script's own
/// directory. Missing imports are skipped silently, matching lookup
/// being best-effort.
pub fn prepend_imports(source: &str, script_path: &Path) -> String {
    let usings = extract_usings(source);
    if usings.is_empty() {
        return source.to_string();
    }

    let mut prefix = String::new();
    let script_dir = script_path.parent().unwrap_or_else(|| Path::new("."));

    for name in &usings {
        let candidates: Vec<PathBuf> = if name.ends_with(".y") || name.ends_with(".yail") {
            vec![script_dir.join(name)]
        } else if let Some(lib) = library_dir() {
            vec![lib.join(format!("{name}.y")), lib.join(format!("{name}.yail"))]
        } else {
            Vec::new()
        };

        for candidate in candidates {
            if let Ok(text) = std::fs::read_to_string(&candidate) {
                tracing::debug!(path = %candidate.display(), "prepending import");
                prefix.push_str(&text);
                prefix.push('\n');
                break;
            }
        }
    }

    format!("{prefix}{source}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extension_check() {
        assert!(has_source_extension(Path::new("main.y")));
        assert!(has_source_extension(Path::new("main.yail")));
        assert!(!has_source_extension(Path::new("main.rs")));
        assert!(!has_source_extension(Path::new("main")));
    }

    #[test]
    fn extracts_plain_and_quoted_usings() {
        let source = "using mathlib;\nusing \"vec.yail\";\nvar x = 1;\n";
        assert_eq!(extract_usings(source), vec!["mathlib", "vec.yail"]);
    }

    #[test]
    fn strips_using_lines_but_keeps_structure() {
        let source = "using mathlib;\nvar x = 1;";
        let stripped = strip_using_statements(source);
        assert_eq!(stripped.lines().count(), 2);
        assert!(!stripped.contains("using"));
        assert!(stripped.contains("var x = 1;"));
    }

    #[test]
    fn strips_line_comments() {
        let stripped = strip_comments("var x = 1; // the answer\nvar y = 2;");
        assert!(!stripped.contains("answer"));
        assert!(stripped.contains("var x = 1;"));
        assert!(stripped.contains("var y = 2;"));
    }

    #[test]
    fn keeps_halve_self_operator() {
        let stripped = strip_comments("x//;\ny //;\n");
        assert!(stripped.contains("x//;"));
        // an operator use directly before `;` survives even with a space
        assert!(stripped.contains("y //;"));
    }

    #[test]
    fn strips_block_comments_preserving_newlines() {
        let source = "var x = 1;\n/* gone\nstill gone */var y = 2;\n";
        let stripped = strip_comments(source);
        assert!(!stripped.contains("gone"));
        assert!(stripped.contains("var y = 2;"));
        assert_eq!(source.lines().count(), stripped.lines().count());
    }

    #[test]
    fn comment_markers_inside_strings_survive() {
        let source = "var s = \"a // b\"; var t = \"/* c */\";";
        assert_eq!(strip_comments(source), source);
    }
}
