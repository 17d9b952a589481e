//! A position-tracking JSON cursor used to walk raw source text along a
//! logical path without losing byte offsets, which `serde_json::Value`
//! discards once parsed.

use crate::path::PathSegment;

pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    /// Advances past one complete JSON value starting at the cursor.
    fn skip_value(&mut self) -> Option<()> {
        self.skip_ws();
        match self.peek()? {
            b'{' => self.skip_object(),
            b'[' => self.skip_array(),
            b'"' => self.skip_string(),
            b't' => self.skip_literal("true"),
            b'f' => self.skip_literal("false"),
            b'n' => self.skip_literal("null"),
            c if c == b'-' || c.is_ascii_digit() => self.skip_number(),
            _ => None,
        }
    }

    fn skip_literal(&mut self, word: &str) -> Option<()> {
        if self.bytes[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            Some(())
        } else {
            None
        }
    }

    fn skip_number(&mut self) -> Option<()> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || matches!(c, b'-' | b'+' | b'.' | b'e' | b'E'))
        {
            self.pos += 1;
        }
        (self.pos > start).then_some(())
    }

    fn skip_string(&mut self) -> Option<()> {
        if self.peek() != Some(b'"') {
            return None;
        }
        self.pos += 1;
        loop {
            match self.peek()? {
                b'"' => {
                    self.pos += 1;
                    return Some(());
                }
                b'\\' => self.pos += 2,
                _ => self.pos += 1,
            }
        }
    }

    fn skip_object(&mut self) -> Option<()> {
        self.pos += 1; // '{'
        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Some(());
        }
        loop {
            self.skip_ws();
            self.skip_string()?;
            self.skip_ws();
            if self.peek() != Some(b':') {
                return None;
            }
            self.pos += 1;
            self.skip_value()?;
            self.skip_ws();
            match self.peek()? {
                b',' => self.pos += 1,
                b'}' => {
                    self.pos += 1;
                    return Some(());
                }
                _ => return None,
            }
        }
    }

    fn skip_array(&mut self) -> Option<()> {
        self.pos += 1; // '['
        self.skip_ws();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Some(());
        }
        loop {
            self.skip_value()?;
            self.skip_ws();
            match self.peek()? {
                b',' => self.pos += 1,
                b']' => {
                    self.pos += 1;
                    return Some(());
                }
                _ => return None,
            }
        }
    }

    /// Reads a quoted string's decoded bytes range (without the quotes),
    /// leaving the cursor just past the closing quote.
    fn read_string_raw(&mut self) -> Option<&'a str> {
        let start = self.pos;
        self.skip_string()?;
        std::str::from_utf8(&self.bytes[start + 1..self.pos - 1]).ok()
    }

    /// Looks up `key` in the object the cursor currently points at (must be
    /// positioned at `{`), returning the byte range of the matched value.
    fn object_field(&mut self, key: &str) -> Option<(usize, usize)> {
        if self.peek() != Some(b'{') {
            return None;
        }
        self.pos += 1;
        self.skip_ws();
        if self.peek() == Some(b'}') {
            return None;
        }
        loop {
            self.skip_ws();
            let field_name = self.read_string_raw()?;
            self.skip_ws();
            if self.peek() != Some(b':') {
                return None;
            }
            self.pos += 1;
            self.skip_ws();
            let value_start = self.pos;
            if field_name == key {
                self.skip_value()?;
                return Some((value_start, self.pos));
            }
            self.skip_value()?;
            self.skip_ws();
            match self.peek()? {
                b',' => self.pos += 1,
                b'}' => return None,
                _ => return None,
            }
        }
    }

    /// Looks up `index` in the array the cursor currently points at (must
    /// be positioned at `[`), returning the byte range of the matched
    /// element.
    fn array_index(&mut self, index: usize) -> Option<(usize, usize)> {
        if self.peek() != Some(b'[') {
            return None;
        }
        self.pos += 1;
        self.skip_ws();
        if self.peek() == Some(b']') {
            return None;
        }
        let mut current = 0;
        loop {
            self.skip_ws();
            let value_start = self.pos;
            if current == index {
                self.skip_value()?;
                return Some((value_start, self.pos));
            }
            self.skip_value()?;
            self.skip_ws();
            current += 1;
            match self.peek()? {
                b',' => self.pos += 1,
                b']' => return None,
                _ => return None,
            }
        }
    }

    fn seek(&mut self, offset: usize) {
        self.pos = offset;
    }

    /// Walks `segments` from the document root, returning the byte range
    /// of the final target, or `None` if the path doesn't resolve (e.g.
    /// unknown key, out-of-range index, or malformed JSON along the way).
    pub fn locate(text: &'a str, segments: &[PathSegment]) -> Option<(usize, usize)> {
        let mut cursor = Cursor::new(text);
        cursor.skip_ws();
        let mut range = (cursor.pos, text.len());
        for segment in segments {
            cursor.seek(range.0);
            range = match segment {
                PathSegment::Key(key) => cursor.object_field(key)?,
                PathSegment::Index(index) => cursor.array_index(*index)?,
            };
        }
        Some(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse_path;

    #[test]
    fn locates_nested_array_and_object_field() {
        let text = r#"{"nodes": [{"name": "A"}, {"name": "B", "parameters": {"url": "http://x"}}]}"#;
        let segments = parse_path("nodes[1].parameters.url");
        let (start, end) = Cursor::locate(text, &segments).unwrap();
        assert_eq!(&text[start..end], "\"http://x\"");
    }

    #[test]
    fn returns_none_for_missing_key() {
        let text = r#"{"nodes": []}"#;
        let segments = parse_path("connections");
        assert!(Cursor::locate(text, &segments).is_none());
    }

    #[test]
    fn returns_none_for_out_of_range_index() {
        let text = r#"{"nodes": [{"name": "A"}]}"#;
        let segments = parse_path("nodes[5]");
        assert!(Cursor::locate(text, &segments).is_none());
    }
}
