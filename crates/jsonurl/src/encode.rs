//! The writer: turns a [`Value`] back into JSONURL text.
//!
//! The AQF string writer is two steps: percent-encode treating the
//! structural characters and `!` as temporarily safe, then translate those
//! four characters (plus a literal `!`) into their `!`-escaped form.

use crate::error::EncodeError;
use crate::numbers;
use crate::options::Options;
use crate::percent;
use crate::value::{Dict, Value};

/// Bytes `urllib.parse.quote_plus` never percent-encodes, independent of
/// its `safe` argument.
fn is_always_safe(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// Percent-encodes `s`, treating a byte as safe (left unencoded) when
/// `is_always_safe` holds or `extra_safe(b)` returns `true`; a literal
/// space is written as `+`, matching `urllib.parse.quote_plus`.
fn quote_plus(s: &str, extra_safe: impl Fn(u8) -> bool, out: &mut String) {
    for &b in s.as_bytes() {
        if b == b' ' {
            out.push('+');
        } else if is_always_safe(b) || extra_safe(b) {
            out.push(b as char);
        } else {
            percent::push_percent_encoded(out, b);
        }
    }
}

/// Writes a string atom, quoting/escaping it so that a reader cannot
/// mistake it for `null`/`true`/`false`/a number.
fn write_str(s: &str, opts: &Options, out: &mut String) {
    if opts.aqf {
        match s {
            "true" => return out.push_str("!true"),
            "false" => return out.push_str("!false"),
            "null" => return out.push_str("!null"),
            "" => return out.push_str("!e"),
            _ => {}
        }
        if numbers::classify(s).is_some() {
            out.push('!');
            out.push_str(s);
            return;
        }
        let mut safe_form = String::new();
        quote_plus(
            s,
            |b| opts.is_user_safe(b) || matches!(b, b'(' | b')' | b',' | b':' | b'!'),
            &mut safe_form,
        );
        for c in safe_form.chars() {
            match c {
                '!' => out.push_str("!!"),
                '(' => out.push_str("!("),
                ')' => out.push_str("!)"),
                ',' => out.push_str("!,"),
                ':' => out.push_str("!:"),
                other => out.push(other),
            }
        }
    } else {
        match s {
            "true" => return out.push_str("'true'"),
            "false" => return out.push_str("'false'"),
            "null" => return out.push_str("'null'"),
            "" => return out.push_str("''"),
            _ => {}
        }
        if numbers::classify(s).is_some() {
            out.push('\'');
            out.push_str(s);
            out.push('\'');
            return;
        }
        quote_plus(s, |b| opts.is_user_safe(b), out);
    }
}

/// Formats a float the way Rust's default `Display` does, except that a
/// whole number gets a trailing `.0` so it cannot be re-read as an
/// integer-grammar atom.
fn format_float(f: f64) -> Result<String, EncodeError> {
    if !f.is_finite() {
        return Err(EncodeError::UnsupportedValueKind("non-finite float"));
    }
    let mut s = f.to_string();
    if !s.contains(['.', 'e', 'E']) {
        s.push_str(".0");
    }
    Ok(s)
}

fn write_value(v: &Value, opts: &Options, out: &mut String) -> Result<(), EncodeError> {
    match v {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&format_float(*f)?),
        Value::Str(s) => write_str(s, opts, out),
        Value::List(items) => {
            out.push('(');
            write_list_data(items, opts, out)?;
            out.push(')');
        }
        Value::Dict(d) => {
            if d.is_empty() && opts.distinguish_empty_list_dict {
                out.push_str("(:)");
            } else {
                out.push('(');
                write_dict_data(d, opts, out)?;
                out.push(')');
            }
        }
    }
    Ok(())
}

fn write_list_data(items: &[Value], opts: &Options, out: &mut String) -> Result<(), EncodeError> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_value(item, opts, out)?;
    }
    Ok(())
}

/// A mapping key is written like any other value, composites included:
/// nothing about the writer restricts a key's kind. `decode` only ever
/// reads an atom in key position, so a composite key does not round-trip;
/// that is a deliberate, documented asymmetry (see DESIGN.md) rather than a
/// validation gap to close here.
fn write_dict_data(d: &Dict, opts: &Options, out: &mut String) -> Result<(), EncodeError> {
    for (i, (k, v)) in d.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_value(k, opts, out)?;
        out.push(':');
        write_value(v, opts, out)?;
    }
    Ok(())
}

/// Encodes `value` as JSONURL text under `options`. See the crate-level
/// docs for the supported grammar and modes.
pub fn encode(value: &Value, options: &Options) -> Result<String, EncodeError> {
    options.validate()?;
    let mut out = String::new();
    if options.implied_dict {
        match value {
            Value::Dict(d) => write_dict_data(d, options, &mut out)?,
            other => return Err(EncodeError::UnsupportedValueKind(other.kind_name())),
        }
    } else if options.implied_list {
        match value {
            Value::List(items) => write_list_data(items, options, &mut out)?,
            other => return Err(EncodeError::UnsupportedValueKind(other.kind_name())),
        }
    } else {
        write_value(value, options, &mut out)?;
    }
    Ok(out)
}
