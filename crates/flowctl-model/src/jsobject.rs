//! Fallback JavaScript object-literal parser (spec §4.3, parser stage 3).
//!
//! Accepts object/array/string/number/boolean/null literals and bare
//! identifiers (rendered as strings), with unquoted keys and `//` / `/*`
//! comments tolerated — covers the common "almost JSON" shapes a hand
//! edited workflow export ends up as.

use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
#[error("js-object parse error at byte {pos}: {message}")]
pub struct JsObjectError {
    pub pos: usize,
    pub message: String,
}

struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn err(&self, message: impl Into<String>) -> JsObjectError {
        JsObjectError {
            pos: self.pos,
            message: message.into(),
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r' | b',') => {
                    self.pos += 1;
                }
                Some(b'/') if self.input.get(self.pos + 1) == Some(&b'/') => {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.pos += 1;
                    }
                }
                Some(b'/') if self.input.get(self.pos + 1) == Some(&b'*') => {
                    self.pos += 2;
                    while self.pos < self.input.len()
                        && !(self.peek() == Some(b'*') && self.input.get(self.pos + 1) == Some(&b'/'))
                    {
                        self.pos += 1;
                    }
                    self.pos = (self.pos + 2).min(self.input.len());
                }
                _ => break,
            }
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), JsObjectError> {
        self.skip_trivia();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.err(format!("expected '{}'", byte as char)))
        }
    }

    fn parse_value(&mut self) -> Result<Value, JsObjectError> {
        self.skip_trivia();
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') | Some(b'\'') => self.parse_string().map(Value::String),
            Some(b't') | Some(b'f') | Some(b'n') | Some(b'u') => self.parse_keyword_or_identifier(),
            Some(c) if c == b'-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_ascii_alphabetic() || c == b'_' || c == b'$' => {
                self.parse_identifier().map(Value::String)
            }
            Some(c) => Err(self.err(format!("unexpected character '{}'", c as char))),
            None => Err(self.err("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value, JsObjectError> {
        self.expect(b'{')?;
        let mut map = Map::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(b'}') {
                self.pos += 1;
                break;
            }
            let key = self.parse_key()?;
            self.expect(b':')?;
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_trivia();
        }
        Ok(Value::Object(map))
    }

    fn parse_key(&mut self) -> Result<String, JsObjectError> {
        self.skip_trivia();
        match self.peek() {
            Some(b'"') | Some(b'\'') => self.parse_string(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_array(&mut self) -> Result<Value, JsObjectError> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(b']') {
                self.pos += 1;
                break;
            }
            items.push(self.parse_value()?);
            self.skip_trivia();
        }
        Ok(Value::Array(items))
    }

    fn parse_string(&mut self) -> Result<String, JsObjectError> {
        let quote = self.bump().ok_or_else(|| self.err("expected string"))?;
        let mut s = String::new();
        loop {
            match self.bump() {
                None => return Err(self.err("unterminated string")),
                Some(c) if c == quote => break,
                Some(b'\\') => match self.bump() {
                    Some(b'n') => s.push('\n'),
                    Some(b't') => s.push('\t'),
                    Some(b'r') => s.push('\r'),
                    Some(other) => s.push(other as char),
                    None => return Err(self.err("unterminated escape")),
                },
                Some(c) => s.push(c as char),
            }
        }
        Ok(s)
    }

    fn parse_identifier(&mut self) -> Result<String, JsObjectError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_' || c == b'$') {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.err("expected identifier"));
        }
        Ok(String::from_utf8_lossy(&self.input[start..self.pos]).into_owned())
    }

    fn parse_keyword_or_identifier(&mut self) -> Result<Value, JsObjectError> {
        let start = self.pos;
        let ident = self.parse_identifier()?;
        match ident.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" | "undefined" => Ok(Value::Null),
            _ => {
                self.pos = start;
                self.parse_identifier().map(Value::String)
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value, JsObjectError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == b'.' || c == b'e' || c == b'E' || c == b'+' || c == b'-') {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or_default();
        let number: f64 = text.parse().map_err(|_| self.err("invalid number"))?;
        Ok(serde_json::Number::from_f64(number).map(Value::Number).unwrap_or(Value::Null))
    }
}

/// Parses a JS object/array/literal/identifier expression into a JSON value.
pub fn parse_js_object(input: &str) -> Result<Value, JsObjectError> {
    let mut scanner = Scanner::new(input);
    let value = scanner.parse_value()?;
    scanner.skip_trivia();
    Ok(value)
}
