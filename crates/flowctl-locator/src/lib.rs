//! Issue Locator (C4): maps a logical path (`nodes[3].parameters.url`)
//! back to a `{line, col}` span and a surrounding source snippet, when
//! the original raw text is still available.

mod path;
mod scanner;

pub use path::{parse_path, PathSegment};

use scanner::Cursor;

/// A located span in the original source text. 1-indexed, matching
/// editor conventions.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SourceLocation {
    pub line: u32,
    pub col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub offset: usize,
    pub length: usize,
}

/// Contiguous source lines around a located span, with one marked as the
/// primary highlighted line.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SourceSnippet {
    pub lines: Vec<(u32, String)>,
    pub highlighted_line: u32,
}

/// Maps byte offsets to 1-indexed `(line, col)` pairs.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn build(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self { line_starts }
    }

    fn position(&self, offset: usize) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_at) => insert_at.saturating_sub(1),
        };
        let col = offset - self.line_starts[line] + 1;
        (line as u32 + 1, col as u32)
    }

    fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}

/// Locates `path` within `raw_text` and returns its source location plus
/// a ±2-line snippet. Returns `None` whenever the path can't be resolved
/// (malformed JSON, unknown key, out-of-range index) — callers then omit
/// `sourceLocation`/`sourceSnippet` from the issue, per the locator's
/// graceful-degradation contract.
pub fn locate(raw_text: &str, logical_path: &str) -> Option<(SourceLocation, SourceSnippet)> {
    let segments = parse_path(logical_path);
    if segments.is_empty() {
        return None;
    }
    let (start, end) = Cursor::locate(raw_text, &segments)?;

    let index = LineIndex::build(raw_text);
    let (line, col) = index.position(start);
    let (end_line, end_col) = index.position(end.saturating_sub(1).max(start));

    let location = SourceLocation {
        line,
        col,
        end_line,
        end_col,
        offset: start,
        length: end - start,
    };
    let snippet = build_snippet(raw_text, &index, line);
    Some((location, snippet))
}

fn build_snippet(raw_text: &str, index: &LineIndex, highlighted_line: u32) -> SourceSnippet {
    let total = index.line_count();
    let from = highlighted_line.saturating_sub(2).max(1);
    let to = (highlighted_line + 2).min(total);
    let lines = raw_text
        .lines()
        .enumerate()
        .filter(|(zero_based, _)| {
            let line_no = *zero_based as u32 + 1;
            line_no >= from && line_no <= to
        })
        .map(|(zero_based, content)| (zero_based as u32 + 1, content.to_string()))
        .collect();
    SourceSnippet {
        lines,
        highlighted_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_value_with_line_and_column() {
        let text = "{\n  \"nodes\": [\n    {\"name\": \"A\", \"parameters\": {\"url\": \"http://x\"}}\n  ]\n}";
        let (location, snippet) = locate(text, "nodes[0].parameters.url").unwrap();
        assert_eq!(location.line, 3);
        assert!(location.col > 1);
        assert_eq!(snippet.highlighted_line, 3);
        assert!(snippet.lines.iter().any(|(n, _)| *n == 3));
    }

    #[test]
    fn snippet_is_clamped_to_document_bounds() {
        let text = "{\"a\": 1}";
        let (_, snippet) = locate(text, "a").unwrap();
        assert_eq!(snippet.lines.len(), 1);
    }

    #[test]
    fn degrades_gracefully_when_path_is_unresolvable() {
        let text = "{\"nodes\": []}";
        assert!(locate(text, "nodes[9].missing").is_none());
    }

    #[test]
    fn degrades_gracefully_on_malformed_source() {
        let text = "not even json";
        assert!(locate(text, "nodes[0]").is_none());
    }
}
