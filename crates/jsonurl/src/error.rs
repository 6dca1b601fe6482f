//! Error types for the JSONURL codec.
//!
//! A thin outer struct carries positional information and wraps an inner
//! enum that names the actual fault. The position is a byte offset rather
//! than a line/column pair, since JSONURL text has no line structure.

use thiserror::Error;

/// A single parse failure, with the byte offset into the input at which it
/// was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    /// Byte offset into the decoded input where the fault was detected.
    pub offset: usize,
    /// The specific fault.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(offset: usize, kind: impl Into<ParseErrorKind>) -> Self {
        Self {
            offset,
            kind: kind.into(),
        }
    }
}

/// The two error families: lexical faults (detected while scanning a single
/// atom) and structural faults (detected while assembling composites).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A fault in the lexical layer (percent-decoding, character
    /// classification, quoting).
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    /// A fault in the composite (list/dict) layer.
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// Faults raised by the percent codec, the character classifier, and the
/// atom layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// A `%` was followed by a character that is not a hex digit.
    #[error("invalid hex digit {0:?} in percent-escape")]
    InvalidHexDigit(char),
    /// Input ended (or a non-hex character appeared) before two hex digits
    /// followed a `%`.
    #[error("unterminated percent-escape")]
    UnterminatedPercent,
    /// A run of `%HH` triples decoded to bytes that are not valid UTF-8.
    #[error("percent-escape decoded to invalid UTF-8")]
    InvalidUtf8,
    /// A character outside the unencoded, structural, and sigil sets
    /// appeared without being percent-encoded.
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    /// A quoted string (`'...'`) was not closed before end of input.
    #[error("unterminated quoted string")]
    UnterminatedQuotedString,
    /// A `!`-escape in AQF mode was followed by a character that is not a
    /// valid escape target.
    #[error("invalid '!'-escape sequence")]
    InvalidEscape,
    /// An AQF atom ended with a bare, unescaped `!`.
    #[error("trailing '!' at end of atom")]
    TrailingBang,
}

/// Faults raised while assembling lists and mappings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// A composite was opened with `(` but input ended before the matching
    /// `)`.
    #[error("unterminated composite")]
    UnterminatedComposite,
    /// A mapping or list element was expected (e.g. after `,`) but a
    /// structural character or end of input appeared instead.
    #[error("missing key or element")]
    MissingKey,
    /// A mapping entry had a key and `:` but no value before `,` or `)`.
    #[error("missing value after ':'")]
    MissingValue,
    /// A mapping entry had a key but no `:`.
    #[error("missing ':' after mapping key")]
    MissingColon,
    /// An atom could not be read at all at the current position (e.g. the
    /// very first character is a structural character or end of input).
    #[error("expected a value")]
    EmptyValue,
    /// Top-level input was fully parsed but bytes remained.
    #[error("trailing input after top-level value")]
    TrailingInput,
    /// Composite nesting exceeded the recursion guard.
    #[error("composite nesting too deep")]
    NestingTooDeep,
}

/// Faults raised by the public entry points on bad configuration, as opposed
/// to faults found while parsing or encoding a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// `implied_list` and `implied_dict` were both set.
    #[error("implied_list and implied_dict are mutually exclusive")]
    MutuallyExclusiveOptions,
    /// `safe` contained a character outside the set that may be marked safe.
    #[error("character {0:?} cannot be marked as safe")]
    UnsafeCharInSafeSet(char),
}

/// Errors that `decode` may return.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The supplied options were not internally consistent.
    #[error(transparent)]
    Option(#[from] OptionError),
    /// The input text did not conform to the JSONURL grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that `encode` may return.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The supplied options were not internally consistent.
    #[error(transparent)]
    Option(#[from] OptionError),
    /// The value contained something the data model cannot represent as
    /// text (currently: a non-finite `f64`).
    #[error("value of kind {0} has no JSONURL text representation")]
    UnsupportedValueKind(&'static str),
}
