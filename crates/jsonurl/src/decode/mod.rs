//! The decoder: a single-pass, recursive-descent reader over the JSONURL
//! grammar.
//!
//! Organized as a directory of small, single-purpose submodules rather than
//! one large file: `atom` reads one scalar, this module reads composites
//! (lists and mappings) and owns the shared `Cursor` both parts operate on.
//! One parsing quirk is preserved on purpose: a dict entry may follow the
//! previous one without a literal `,` if the previous value closed a nested
//! composite; see `parse_dict`.

mod atom;

use crate::aqf;
use crate::classify;
use crate::error::{DecodeError, LexicalError, ParseError, StructuralError};
use crate::options::Options;
use crate::value::{Dict, Value};

/// Composite nesting deeper than this raises `NestingTooDeep` rather than
/// growing the native call stack without bound. The `fuzzing` feature lifts
/// the guard so a fuzz harness can explore pathological nesting instead of
/// immediately tripping it.
#[cfg(not(feature = "fuzzing"))]
const NESTING_LIMIT: usize = 1024;
#[cfg(feature = "fuzzing")]
const NESTING_LIMIT: usize = usize::MAX;

/// Owns the input and cursor position for one `decode` invocation.
///
/// Holds both the original `&str` (for correct multi-byte error reporting
/// and `char`-level string assembly) and its byte slice (for fast
/// structural-character dispatch); `pos` is always a byte offset at a char
/// boundary.
pub(crate) struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    opts: &'a Options,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, opts: &'a Options) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            opts,
        }
    }

    fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn err_lex(&self, at: usize, e: LexicalError) -> ParseError {
        ParseError::new(at, e)
    }

    fn err_struct(&self, at: usize, e: StructuralError) -> ParseError {
        ParseError::new(at, e)
    }

    /// Builds an `UnexpectedChar` error from whatever `char` (possibly
    /// multi-byte) sits at the cursor.
    fn unexpected(&self) -> ParseError {
        let c = self
            .peek_char()
            .expect("unexpected() is only called when at_end() is false");
        self.err_lex(self.pos, LexicalError::UnexpectedChar(c))
    }

    fn enter_composite(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > NESTING_LIMIT {
            return Err(self.err_struct(self.pos, StructuralError::NestingTooDeep));
        }
        Ok(())
    }

    fn exit_composite(&mut self) {
        self.depth -= 1;
    }

    /// `any := composite | atom`.
    fn parse_any(&mut self) -> Result<Value, ParseError> {
        if self.at_end() {
            return Err(self.err_struct(self.pos, StructuralError::MissingValue));
        }
        if self.peek_byte() == Some(classify::OPEN) {
            self.enter_composite()?;
            self.pos += 1;
            let result = self.parse_composite_body();
            self.exit_composite();
            result
        } else {
            self.parse_atom()
        }
    }

    /// Parses the inside of a composite, just after its opening `(` has been
    /// consumed: the empty forms, a nested composite as the first list
    /// element, or else falls to [`Cursor::parse_comp`].
    fn parse_composite_body(&mut self) -> Result<Value, ParseError> {
        if self.at_end() {
            return Err(self.err_struct(self.pos, StructuralError::UnterminatedComposite));
        }
        match self.peek_byte() {
            Some(classify::OPEN) => {
                let first = self.parse_any()?;
                self.parse_list(first)
            }
            Some(classify::COLON) if self.opts.distinguish_empty_list_dict => {
                self.pos += 1;
                if self.peek_byte() == Some(classify::CLOSE) {
                    self.pos += 1;
                    Ok(Value::Dict(Dict::new()))
                } else {
                    Err(self.err_struct(self.pos, StructuralError::UnterminatedComposite))
                }
            }
            Some(classify::CLOSE) => {
                self.pos += 1;
                if self.opts.distinguish_empty_list_dict {
                    Ok(Value::List(Vec::new()))
                } else {
                    Ok(Value::Dict(Dict::new()))
                }
            }
            _ => self.parse_comp(),
        }
    }

    /// Parses a composite whose first element is an atom, then dispatches
    /// on the character that follows it to decide list vs. mapping.
    fn parse_comp(&mut self) -> Result<Value, ParseError> {
        let first = self.parse_atom()?;
        if self.at_end() {
            return Err(self.err_struct(self.pos, StructuralError::UnterminatedComposite));
        }
        match self.peek_byte() {
            Some(classify::COLON) => {
                self.pos += 1;
                self.parse_dict(first)
            }
            Some(classify::COMMA) | Some(classify::CLOSE) => self.parse_list(first),
            _ => Err(self.unexpected()),
        }
    }

    /// Parses the remainder of a list whose first element has already been
    /// read, through the closing `)`.
    fn parse_list(&mut self, first: Value) -> Result<Value, ParseError> {
        let mut items = vec![first];
        loop {
            if self.at_end() {
                return Err(self.err_struct(self.pos, StructuralError::UnterminatedComposite));
            }
            match self.peek_byte() {
                Some(classify::CLOSE) => {
                    self.pos += 1;
                    return Ok(Value::List(items));
                }
                Some(classify::COMMA) => {
                    self.pos += 1;
                    items.push(self.parse_any()?);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// Parses the remainder of a mapping whose first key has already been
    /// read and whose `:` has already been consumed, through the closing
    /// `)`.
    ///
    /// Deliberately lenient: after an entry, a `,` is consumed if present,
    /// but a new key is attempted either way rather than requiring the
    /// separator. In practice this only matters when the previous value was
    /// itself a composite, so the next key can start immediately after its
    /// closing `)`.
    fn parse_dict(&mut self, first_key: Value) -> Result<Value, ParseError> {
        let first_val = self.parse_any()?;
        let mut dict = Dict::new();
        dict.insert(first_key, first_val);
        loop {
            if self.at_end() {
                return Err(self.err_struct(self.pos, StructuralError::UnterminatedComposite));
            }
            if self.peek_byte() == Some(classify::CLOSE) {
                self.pos += 1;
                return Ok(Value::Dict(dict));
            }
            if self.peek_byte() == Some(classify::COMMA) {
                self.pos += 1;
            }
            let key = self.expect_key_atom()?;
            if self.at_end() {
                return Err(self.err_struct(self.pos, StructuralError::UnterminatedComposite));
            }
            if self.peek_byte() != Some(classify::COLON) {
                return Err(self.err_struct(self.pos, StructuralError::MissingColon));
            }
            self.pos += 1;
            let val = self.parse_any()?;
            dict.insert(key, val);
        }
    }

    /// Reads an atom known to be in mapping-key position: end of input or a
    /// structural character here means a key was expected but never
    /// started, which is [`StructuralError::MissingKey`] rather than the
    /// atom layer's generic [`StructuralError::EmptyValue`].
    fn expect_key_atom(&mut self) -> Result<Value, ParseError> {
        match self.peek_byte() {
            None => return Err(self.err_struct(self.pos, StructuralError::MissingKey)),
            Some(b) if classify::is_structural(b) => {
                return Err(self.err_struct(self.pos, StructuralError::MissingKey))
            }
            _ => {}
        }
        self.parse_atom()
    }

    /// `implied-list-body := (any ("," any)*)?`, consuming to end of input.
    fn parse_list_data(&mut self) -> Result<Value, ParseError> {
        let mut items = Vec::new();
        if self.at_end() {
            return Ok(Value::List(items));
        }
        loop {
            items.push(self.parse_any()?);
            if self.at_end() {
                return Ok(Value::List(items));
            }
            if self.peek_byte() != Some(classify::COMMA) {
                return Err(self.unexpected());
            }
            self.pos += 1;
        }
    }

    /// `implied-dict-body := (atom ":" any ("," atom ":" any)*)?`,
    /// consuming to end of input.
    fn parse_dict_data(&mut self) -> Result<Value, ParseError> {
        let mut dict = Dict::new();
        if self.at_end() {
            return Ok(Value::Dict(dict));
        }
        loop {
            let key = self.expect_key_atom()?;
            if self.at_end() {
                return Err(self.err_struct(self.pos, StructuralError::MissingValue));
            }
            if self.peek_byte() != Some(classify::COLON) {
                return Err(self.err_struct(self.pos, StructuralError::MissingColon));
            }
            self.pos += 1;
            let val = self.parse_any()?;
            dict.insert(key, val);
            if self.at_end() {
                return Ok(Value::Dict(dict));
            }
            if self.peek_byte() != Some(classify::COMMA) {
                return Err(self.unexpected());
            }
            self.pos += 1;
        }
    }

    /// Parses one top-level value, then demands end of input.
    fn parse_top(&mut self) -> Result<Value, ParseError> {
        let value = self.parse_any()?;
        if !self.at_end() {
            return Err(self.err_struct(self.pos, StructuralError::TrailingInput));
        }
        Ok(value)
    }
}

/// Decodes JSONURL text into a [`Value`] under `options`. See the
/// crate-level docs for the supported grammar and modes.
pub fn decode(text: &str, options: &Options) -> Result<Value, DecodeError> {
    options.validate()?;

    let owned;
    let effective: &str = if options.aqf {
        owned = aqf::partial_decode(text).map_err(|e| ParseError::new(0, e))?;
        &owned
    } else {
        text
    };

    let mut cursor = Cursor::new(effective, options);
    let value = if options.implied_dict {
        cursor.parse_dict_data()?
    } else if options.implied_list {
        cursor.parse_list_data()?
    } else {
        cursor.parse_top()?
    };
    Ok(value)
}
