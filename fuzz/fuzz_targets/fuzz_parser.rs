#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsonurl::{decode, encode, Dict, List, Options, Value};
use libfuzzer_sys::fuzz_target;

/// Builds every legal combination of the four orthogonal options flags plus
/// a handful of `safe`-set variations, so one fuzz run exercises all of them
/// rather than just the default.
fn option_matrix(u: &mut Unstructured<'_>) -> arbitrary::Result<Options> {
    let aqf = bool::arbitrary(u)?;
    let distinguish_empty_list_dict = bool::arbitrary(u)?;
    let markable = if aqf { "!$*/;?@'" } else { "!$*/;?@" };
    let safe = match u8::arbitrary(u)? % 3 {
        0 => String::new(),
        1 => markable.to_owned(),
        _ => markable.chars().take(1).collect(),
    };
    let (implied_list, implied_dict) = match u8::arbitrary(u)? % 3 {
        0 => (false, false),
        1 => (true, false),
        _ => (false, true),
    };
    Ok(Options {
        implied_list,
        implied_dict,
        aqf,
        distinguish_empty_list_dict,
        safe,
    })
}

#[derive(Debug)]
struct ArbitraryValue(Value);

/// Depth-bounded recursive `Value` generator, grounded the same way as the
/// crate's own `tests/properties.rs` generator: scalars dominate so
/// generation always terminates.
impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self(arbitrary_value(u, 4)?))
    }
}

fn arbitrary_scalar(u: &mut Unstructured<'_>) -> arbitrary::Result<Value> {
    Ok(match u8::arbitrary(u)? % 5 {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(u)?),
        2 => Value::Int(i64::arbitrary(u)?),
        3 => {
            let f = f64::arbitrary(u)?;
            Value::Float(if f.is_finite() { f } else { 0.0 })
        }
        _ => Value::Str(String::arbitrary(u)?),
    })
}

fn arbitrary_value(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Value> {
    if depth == 0 {
        return arbitrary_scalar(u);
    }
    Ok(match u8::arbitrary(u)? % 6 {
        0..=3 => arbitrary_scalar(u)?,
        4 => {
            let len = u8::arbitrary(u)? % 4;
            let mut items = List::new();
            for _ in 0..len {
                items.push(arbitrary_value(u, depth - 1)?);
            }
            Value::List(items)
        }
        _ => {
            let len = u8::arbitrary(u)? % 4;
            let mut d = Dict::new();
            for _ in 0..len {
                d.insert(arbitrary_scalar(u)?, arbitrary_value(u, depth - 1)?);
            }
            Value::Dict(d)
        }
    })
}

/// Decoding arbitrary bytes must never panic, and any value it does produce
/// must re-encode (with the same options) without panicking either.
fn fuzz_raw_text(u: &mut Unstructured<'_>) -> arbitrary::Result<()> {
    let opts = option_matrix(u)?;
    let text = String::arbitrary(u)?;
    if let Ok(value) = decode(&text, &opts) {
        let _ = encode(&value, &opts);
    }
    Ok(())
}

/// Encoding an arbitrary value must never panic, and if it succeeds,
/// decoding its own output back under the same options must never panic
/// either (the `properties.rs` round-trip invariant, minus the equality
/// assertion a crashing fuzz target can't usefully make on malformed
/// option/value combinations).
fn fuzz_structured_round_trip(u: &mut Unstructured<'_>) -> arbitrary::Result<()> {
    let opts = option_matrix(u)?;
    let value = ArbitraryValue::arbitrary(u)?.0;
    if let Ok(text) = encode(&value, &opts) {
        let _ = decode(&text, &opts);
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(pick_structured) = bool::arbitrary(&mut u) else {
        return;
    };
    let _ = if pick_structured {
        fuzz_structured_round_trip(&mut u)
    } else {
        fuzz_raw_text(&mut u)
    };
});
