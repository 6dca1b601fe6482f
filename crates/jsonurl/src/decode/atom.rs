//! The atom layer, as an extension of [`super::Cursor`]: reads one scalar
//! (keyword, number, or string), including the raw/decoded twin-buffer
//! discipline that disambiguates a bare word from a string. `raw` mirrors
//! `decoded` byte-for-byte until a percent-escape is seen, at which point it
//! is poisoned (set to `None`) because no keyword or number lexeme ever
//! contains one.

use super::Cursor;
use crate::aqf;
use crate::classify;
use crate::error::{LexicalError, ParseError, StructuralError};
use crate::numbers::{self, NumberLexeme};
use crate::percent;
use crate::value::Value;

impl<'a> Cursor<'a> {
    /// Parses one atom: a quoted string, a bare keyword/number, or a bare
    /// string.
    pub(super) fn parse_atom(&mut self) -> Result<Value, ParseError> {
        if self.at_end() {
            return Err(self.err_struct(self.pos, StructuralError::EmptyValue));
        }
        let start = self.pos;

        if !self.opts.aqf && self.peek_byte() == Some(classify::QUOTE) {
            self.pos += 1;
            return self.parse_qstr();
        }

        let mut decoded = String::new();
        let mut raw: Option<String> = Some(String::new());

        loop {
            if self.at_end() {
                return self.convert_unquoted_atom(raw.as_deref(), decoded, start);
            }
            let b = self.peek_byte().expect("checked by at_end above");
            match b {
                b'%' => {
                    let (text, new_pos) = percent::decode_percent_run(self.bytes, self.pos)
                        .map_err(|e| self.err_lex(self.pos, e))?;
                    decoded.push_str(&text);
                    self.pos = new_pos;
                    // No keyword or number lexeme contains a percent-escape.
                    raw = None;
                }
                b'+' => {
                    decoded.push(' ');
                    if let Some(r) = raw.as_mut() {
                        r.push('+');
                    }
                    self.pos += 1;
                }
                classify::BANG if self.opts.aqf => {
                    decoded.push('!');
                    if let Some(r) = raw.as_mut() {
                        r.push('!');
                    }
                    self.pos += 1;
                    if let Some(escaped) = self.peek_byte() {
                        if matches!(escaped, b'(' | b')' | b',' | b':' | b'!') {
                            decoded.push(escaped as char);
                            if let Some(r) = raw.as_mut() {
                                r.push(escaped as char);
                            }
                            self.pos += 1;
                        }
                    }
                }
                b if b.is_ascii() && (classify::is_unencoded(b) || b == classify::QUOTE) => {
                    decoded.push(b as char);
                    if let Some(r) = raw.as_mut() {
                        r.push(b as char);
                    }
                    self.pos += 1;
                }
                _ => {
                    if decoded.is_empty() {
                        return Err(self.err_struct(self.pos, StructuralError::EmptyValue));
                    }
                    return self.convert_unquoted_atom(raw.as_deref(), decoded, start);
                }
            }
        }
    }

    /// Parses a `'`-quoted string, having already consumed the opening
    /// quote.
    fn parse_qstr(&mut self) -> Result<Value, ParseError> {
        let mut out = String::new();
        loop {
            if self.at_end() {
                return Err(self.err_lex(self.pos, LexicalError::UnterminatedQuotedString));
            }
            let b = self.peek_byte().expect("checked by at_end above");
            match b {
                b'%' => {
                    let (text, new_pos) = percent::decode_percent_run(self.bytes, self.pos)
                        .map_err(|e| self.err_lex(self.pos, e))?;
                    out.push_str(&text);
                    self.pos = new_pos;
                }
                b'+' => {
                    out.push(' ');
                    self.pos += 1;
                }
                classify::QUOTE => {
                    self.pos += 1;
                    return Ok(Value::Str(out));
                }
                b if b.is_ascii() && (classify::is_unencoded(b) || classify::is_structural(b)) => {
                    out.push(b as char);
                    self.pos += 1;
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// Classifies a finished atom as `null`/`true`/`false`/a number (using
    /// `raw`, which is only `Some` if no percent-escape occurred) or falls
    /// through to a string, applying AQF unescaping if needed.
    fn convert_unquoted_atom(
        &self,
        raw: Option<&str>,
        decoded: String,
        start: usize,
    ) -> Result<Value, ParseError> {
        if let Some(raw) = raw {
            match raw {
                "null" => return Ok(Value::Null),
                "true" => return Ok(Value::Bool(true)),
                "false" => return Ok(Value::Bool(false)),
                _ => {}
            }
            if let Some(lexeme) = numbers::classify(raw) {
                return Ok(match lexeme {
                    NumberLexeme::Integer => raw
                        .parse::<i64>()
                        .map(Value::Int)
                        .unwrap_or_else(|_| Value::Float(raw.parse::<f64>().unwrap())),
                    NumberLexeme::Float => Value::Float(raw.parse::<f64>().unwrap()),
                });
            }
        }

        if self.opts.aqf {
            if decoded == "!e" {
                return Ok(Value::Str(String::new()));
            }
            return Ok(Value::Str(aqf::unquote(&decoded, start)?));
        }

        Ok(Value::Str(decoded))
    }
}
