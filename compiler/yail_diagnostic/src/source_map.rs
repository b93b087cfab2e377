//! Byte-offset to line/column mapping.

use yail_ir::Span;

/// A resolved source position (1-based line and column).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets in one source text to line/column positions.
///
/// Line starts are collected once at construction; lookups binary-search
/// the start table.
pub struct SourceMap<'src> {
    source: &'src str,
    line_starts: Vec<u32>,
}

impl<'src> SourceMap<'src> {
    /// Build the line-start table for a source text.
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0u32];
        for (idx, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx as u32 + 1);
            }
        }
        SourceMap {
            source,
            line_starts,
        }
    }

    /// The underlying source text.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Resolve a byte offset to a 1-based line/column.
    ///
    /// Offsets past the end of the source resolve to the final position.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let offset = offset.min(self.source.len() as u32);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let col = self.source[line_start as usize..offset as usize]
            .chars()
            .count() as u32;
        LineCol {
            line: line_idx as u32 + 1,
            col: col + 1,
        }
    }

    /// The full text of the line containing an offset, without its newline.
    pub fn line_text(&self, offset: u32) -> &'src str {
        let pos = self.line_col(offset);
        let start = self.line_starts[(pos.line - 1) as usize] as usize;
        let rest = &self.source[start..];
        match rest.find('\n') {
            Some(end) => rest[..end].trim_end_matches('\r'),
            None => rest,
        }
    }

    /// Resolve a span's start position.
    pub fn span_start(&self, span: Span) -> LineCol {
        self.line_col(span.start)
    }
}
