//! Configuration for the JSONURL codec.
//!
//! A plain `Clone`/`Default` data struct with one doc comment per field,
//! rather than a builder.

use crate::error::OptionError;

/// Extra characters the writer is additionally allowed to leave unencoded.
///
/// Only the characters in `!$*/;?@` may be marked safe (and, when `aqf` is
/// set, `'` as well). `encode` rejects any other character with
/// [`OptionError::UnsafeCharInSafeSet`].
const MARKABLE_SAFE: &str = "!$*/;?@";

/// Options shared by `encode` and `decode`.
///
/// # Examples
///
/// ```rust
/// use jsonurl::Options;
///
/// let opts = Options {
///     aqf: true,
///     ..Options::default()
/// };
/// assert!(opts.aqf);
/// ```
///
/// # Default
///
/// All flags default to `false`; `safe` defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// The top-level value is a list, written/read without enclosing
    /// parentheses. Mutually exclusive with `implied_dict`.
    ///
    /// # Default
    ///
    /// `false`
    pub implied_list: bool,

    /// The top-level value is a mapping, written/read without enclosing
    /// parentheses. Mutually exclusive with `implied_list`.
    ///
    /// # Default
    ///
    /// `false`
    pub implied_dict: bool,

    /// Use `!`-based escaping ("Address-bar Query-string Friendly") instead
    /// of `'`-based quoting.
    ///
    /// # Default
    ///
    /// `false`
    pub aqf: bool,

    /// Write `()` for an empty list and `(:)` for an empty dict, instead of
    /// `()` for both.
    ///
    /// # Default
    ///
    /// `false`
    pub distinguish_empty_list_dict: bool,

    /// Extra characters the writer may emit unencoded, beyond the default
    /// safe set. Ignored by `decode`. Restricted to `!$*/;?@`, plus `'` when
    /// `aqf` is set; any other character is rejected by `encode` with
    /// [`OptionError::UnsafeCharInSafeSet`].
    ///
    /// # Default
    ///
    /// empty
    pub safe: String,
}

impl Options {
    /// Validates the invariants that `encode` and `decode` both require:
    /// `implied_list`/`implied_dict` are mutually exclusive, and every
    /// character of `safe` is markable.
    ///
    /// Both entry points call this eagerly rather than letting one flag
    /// silently win, per the corrected invariant recorded in `DESIGN.md`.
    pub(crate) fn validate(&self) -> Result<(), OptionError> {
        if self.implied_list && self.implied_dict {
            return Err(OptionError::MutuallyExclusiveOptions);
        }
        for c in self.safe.chars() {
            if MARKABLE_SAFE.contains(c) {
                continue;
            }
            if self.aqf && c == '\'' {
                continue;
            }
            return Err(OptionError::UnsafeCharInSafeSet(c));
        }
        Ok(())
    }

    /// Returns `true` if the writer may emit byte `b` unencoded because the
    /// caller marked it safe via [`Options::safe`].
    pub(crate) fn is_user_safe(&self, b: u8) -> bool {
        b.is_ascii() && self.safe.as_bytes().contains(&b)
    }
}
