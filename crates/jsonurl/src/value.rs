//! The JSONURL value model.
//!
//! This module defines the [`Value`] enum, which represents any value in the
//! JSON data model as JSONURL sees it: `null`, `true`/`false`, a signed
//! 64-bit integer, a 64-bit float, a string, an ordered list, or an
//! insertion-ordered mapping keyed by another `Value`.
//!
//! A plain tagged union, with `From` impls for the scalar variants and
//! `is_*`/`as_*` accessor methods. Numbers split into `Int`/`Float` rather
//! than a single `f64`, since the wire grammar distinguishes them, and the
//! mapping type is insertion-ordered and keyed by `Value` rather than
//! `BTreeMap<String, _>`, since JSONURL mapping keys are not restricted to
//! strings (see DESIGN.md).

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

/// An ordered JSONURL list.
pub type List = Vec<Value>;

/// An insertion-ordered JSONURL mapping. Keys may be any [`Value`], not just
/// strings.
pub type Dict = IndexMap<Value, Value>;

/// A value in the JSONURL data model.
///
/// # Examples
///
/// ```rust
/// use jsonurl::Value;
///
/// let v = Value::from(vec![Value::from(1i64), Value::from("two")]);
/// assert!(v.is_list());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub enum Value {
    /// The JSONURL `null` atom.
    Null,
    /// A boolean atom (`true`/`false`).
    Bool(bool),
    /// An integer-grammar number, held as a signed 64-bit integer.
    Int(i64),
    /// A non-integer-grammar number (has a `.` or exponent), held as a
    /// 64-bit float.
    Float(f64),
    /// A string atom.
    Str(String),
    /// An ordered sequence of values.
    List(List),
    /// An insertion-ordered mapping from value to value.
    Dict(Dict),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Self::List(v)
    }
}

impl From<Dict> for Value {
    fn from(v: Dict) -> Self {
        Self::Dict(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Value::Bool`].
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    /// Returns `true` if the value is [`Value::Int`] or [`Value::Float`].
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(..) | Self::Float(..))
    }

    /// Returns `true` if the value is [`Value::Str`].
    #[must_use]
    pub fn is_str(&self) -> bool {
        matches!(self, Self::Str(..))
    }

    /// Returns `true` if the value is [`Value::List`].
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(..))
    }

    /// Returns `true` if the value is [`Value::Dict`].
    #[must_use]
    pub fn is_dict(&self) -> bool {
        matches!(self, Self::Dict(..))
    }

    /// Borrows the inner string if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::Str(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Borrows the inner list if this is a [`Value::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&List> {
        if let Self::List(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Borrows the inner dict if this is a [`Value::Dict`].
    #[must_use]
    pub fn as_dict(&self) -> Option<&Dict> {
        if let Self::Dict(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// A short, stable name for the value's kind, used in error messages.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
        }
    }
}

/// `Value` is used as a `Dict` key, which requires `Eq`/`Hash`. JSONURL
/// numbers are parsed from a finite digit grammar, so a NaN/Infinity float
/// never arises from decoding; encoding rejects non-finite floats outright
/// (see `EncodeError::UnsupportedValueKind`). Comparing/hashing floats by bit
/// pattern is therefore total in practice and keeps `Eq` consistent with
/// `Hash` without pulling in an ordered-float crate for one field.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Dict(a), Self::Dict(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Null => 0u8.hash(state),
            Self::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            Self::Int(i) => {
                2u8.hash(state);
                i.hash(state);
            }
            Self::Float(f) => {
                3u8.hash(state);
                f.to_bits().hash(state);
            }
            Self::Str(s) => {
                4u8.hash(state);
                s.hash(state);
            }
            Self::List(l) => {
                5u8.hash(state);
                l.hash(state);
            }
            Self::Dict(d) => {
                6u8.hash(state);
                // IndexMap's PartialEq is order-insensitive, so Hash must be
                // too: combine per-entry hashes with an associative,
                // commutative operator (XOR) instead of feeding the hasher
                // sequentially.
                let mut acc: u64 = 0;
                for (k, v) in d {
                    let mut entry_hasher = std::collections::hash_map::DefaultHasher::new();
                    k.hash(&mut entry_hasher);
                    v.hash(&mut entry_hasher);
                    acc ^= entry_hasher.finish();
                }
                acc.hash(state);
            }
        }
    }
}
