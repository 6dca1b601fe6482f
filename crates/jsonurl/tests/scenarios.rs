//! End-to-end decode/encode scenarios and the canonical error corpus.

use jsonurl::{
    decode, encode, DecodeError, Dict, List, Options, ParseErrorKind, StructuralError, Value,
};
use rstest::rstest;

fn distinguish_opts() -> Options {
    Options {
        distinguish_empty_list_dict: true,
        implied_dict: true,
        ..Options::default()
    }
}

#[rstest]
fn scenario_1_flat_object() {
    let mut d = Dict::new();
    d.insert(Value::from("a"), Value::Int(1));
    let value = Value::Dict(d);
    let opts = Options::default();

    assert_eq!(encode(&value, &opts).unwrap(), "(a:1)");
    assert_eq!(decode("(a:1)", &opts).unwrap(), value);
}

#[rstest]
fn scenario_2_space_in_string() {
    let mut d = Dict::new();
    d.insert(Value::from("a"), Value::from("b c"));
    let value = Value::Dict(d);
    let opts = Options::default();

    assert_eq!(encode(&value, &opts).unwrap(), "(a:b+c)");
    assert_eq!(decode("(a:b+c)", &opts).unwrap(), value);
}

#[rstest]
fn scenario_3_percent_encoded_char() {
    let mut d = Dict::new();
    d.insert(Value::from("a"), Value::from("b$c"));
    let value = Value::Dict(d);
    let opts = Options::default();

    assert_eq!(encode(&value, &opts).unwrap(), "(a:b%24c)");
    assert_eq!(decode("(a:b%24c)", &opts).unwrap(), value);
}

#[rstest]
fn scenario_4_numeric_looking_string_is_quoted() {
    let mut d = Dict::new();
    d.insert(Value::from("a"), Value::from("123"));
    let value = Value::Dict(d);
    let opts = Options::default();

    assert_eq!(encode(&value, &opts).unwrap(), "(a:'123')");
    assert_eq!(decode("(a:'123')", &opts).unwrap(), value);
}

#[rstest]
fn scenario_5_nested_list() {
    let value = Value::List(List::from([
        Value::Int(1),
        Value::List(List::from([Value::Int(2), Value::Int(3)])),
    ]));
    let opts = Options::default();

    assert_eq!(encode(&value, &opts).unwrap(), "(1,(2,3))");
    assert_eq!(decode("(1,(2,3))", &opts).unwrap(), value);
}

#[rstest]
fn scenario_6_aqf_implied_list() {
    let value = Value::List(List::from([
        Value::from("!"),
        Value::from("true"),
        Value::from(""),
    ]));
    let opts = Options {
        aqf: true,
        implied_list: true,
        ..Options::default()
    };

    assert_eq!(encode(&value, &opts).unwrap(), "!!,!true,!e");
    assert_eq!(decode("!!,!true,!e", &opts).unwrap(), value);
}

#[rstest]
fn scenario_7_aqf_implied_dict_empty_string_key_and_value() {
    let mut d = Dict::new();
    d.insert(Value::from(""), Value::from("a"));
    d.insert(Value::from("a"), Value::from(""));
    let value = Value::Dict(d);
    let opts = Options {
        aqf: true,
        implied_dict: true,
        ..Options::default()
    };

    assert_eq!(encode(&value, &opts).unwrap(), "!e:a,a:!e");
    assert_eq!(decode("!e:a,a:!e", &opts).unwrap(), value);
}

#[rstest]
fn scenario_8_distinguish_empty_list_dict_under_implied_dict() {
    let mut d = Dict::new();
    d.insert(Value::from("a"), Value::Dict(Dict::new()));
    d.insert(Value::from("b"), Value::List(List::new()));
    d.insert(Value::from("c"), Value::Null);
    let value = Value::Dict(d);
    let opts = distinguish_opts();

    assert_eq!(encode(&value, &opts).unwrap(), "a:(:),b:(),c:null");
    assert_eq!(decode("a:(:),b:(),c:null", &opts).unwrap(), value);
}

#[rstest]
fn scenario_9_bare_apostrophe_and_plus_in_bare_atom() {
    let opts = Options::default();
    let value = decode("Bob's+house", &opts).unwrap();
    assert_eq!(value, Value::from("Bob's house"));
}

#[rstest]
fn scenario_10_unterminated_composite() {
    let opts = Options::default();
    let err = decode("(", &opts).unwrap_err();
    let DecodeError::Parse(parse_err) = err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(
        parse_err.kind,
        ParseErrorKind::Structural(StructuralError::UnterminatedComposite)
    );
}

#[rstest]
#[case("(")]
#[case(")")]
#[case("{")]
#[case("}")]
#[case(",")]
#[case(":")]
#[case("(1")]
#[case("(a:")]
#[case("(1,1")]
#[case("(a,,c)")]
#[case("(a:)")]
#[case("(:a)")]
#[case("'a=b'")]
fn canonical_error_corpus_rejects(#[case] input: &str) {
    let opts = Options::default();
    assert!(
        decode(input, &opts).is_err(),
        "expected {input:?} to be rejected"
    );
}

#[rstest]
fn empty_input_under_implied_list_is_empty_list() {
    let opts = Options {
        implied_list: true,
        ..Options::default()
    };
    assert_eq!(decode("", &opts).unwrap(), Value::List(List::new()));
}

#[rstest]
fn empty_input_under_implied_dict_is_empty_dict() {
    let opts = Options {
        implied_dict: true,
        ..Options::default()
    };
    assert_eq!(decode("", &opts).unwrap(), Value::Dict(Dict::new()));
}

#[rstest]
fn percent_only_atom_is_never_a_keyword() {
    // "%6e%75%6c%6c" decodes to the letters "null", but since a percent-escape
    // occurred, the raw buffer is poisoned and the classifier must fall
    // through to a string rather than recognizing the keyword.
    let opts = Options::default();
    assert_eq!(
        decode("%6e%75%6c%6c", &opts).unwrap(),
        Value::from("null")
    );
}

#[rstest]
fn lowercase_and_uppercase_hex_decode_the_same() {
    let opts = Options::default();
    assert_eq!(decode("%2e", &opts).unwrap(), decode("%2E", &opts).unwrap());
}

#[rstest]
fn plus_in_quoted_string_becomes_space() {
    let opts = Options::default();
    assert_eq!(decode("'a+b'", &opts).unwrap(), Value::from("a b"));
}

#[rstest]
fn mutually_exclusive_implied_modes_are_rejected() {
    let opts = Options {
        implied_list: true,
        implied_dict: true,
        ..Options::default()
    };
    assert!(decode("", &opts).is_err());
    assert!(encode(&Value::Null, &opts).is_err());
}

#[rstest]
fn nested_empty_composites_under_distinguish() {
    let opts = Options {
        distinguish_empty_list_dict: true,
        ..Options::default()
    };
    let value = Value::List(List::from([Value::List(List::new()), Value::Dict(Dict::new())]));
    assert_eq!(encode(&value, &opts).unwrap(), "((),(:))");
    assert_eq!(decode("((),(:))", &opts).unwrap(), value);
}
