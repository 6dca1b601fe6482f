//! A JSONURL codec: a URL-safe textual encoding of the JSON data model.
//!
//! See <https://jsonurl.org/> and the
//! [specification](https://github.com/jsonurl/specification/) for the wire
//! format this crate reads and writes. [`decode`] parses JSONURL text into a
//! [`Value`]; [`encode`] writes a [`Value`] back out. [`Options`] selects
//! among the format's orthogonal modes: implied-array, implied-object,
//! address-bar/query-string-friendly (AQF) escaping, and distinguishing an
//! empty list from an empty mapping.
//!
//! # Examples
//!
//! ```rust
//! use jsonurl::{decode, encode, Options, Value};
//!
//! let opts = Options::default();
//! let value = decode("(a:1,b:(2,3))", &opts).unwrap();
//! assert_eq!(encode(&value, &opts).unwrap(), "(a:1,b:(2,3))");
//! ```

mod aqf;
mod classify;
mod decode;
mod encode;
mod error;
mod numbers;
mod options;
mod percent;
mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::{
    DecodeError, EncodeError, LexicalError, OptionError, ParseError, ParseErrorKind,
    StructuralError,
};
pub use options::Options;
pub use value::{Dict, List, Value};
