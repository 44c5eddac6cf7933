//! Property-based round-trip guarantees over generated value trees.

use proptest::prelude::*;
use toon_codec::{
    decode_with_options, encode_with_options, minify, normalize, toon, validate, Delimiter,
    Map, Number, ToonOptions, Value,
};

/// Scalar generator. Round-trip assertions compare against `normalize`d
/// input, so non-canonical scalars (integral floats) are included too —
/// most importantly the floats sitting on the i64 fold boundaries.
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| Value::Number(Number::Integer(i))),
        any::<f64>().prop_filter_map("finite non-integral float", |f| {
            (f.is_finite() && f.fract() != 0.0).then_some(Value::Number(Number::Float(f)))
        }),
        prop::sample::select(vec![
            9_007_199_254_740_992.0f64,   // 2^53
            -9_007_199_254_740_992.0,
            9_223_372_036_854_775_808.0,  // 2^63, first float past i64::MAX
            -9_223_372_036_854_775_808.0, // i64::MIN exactly
            i64::MAX as f64,
        ])
        .prop_map(|f| Value::Number(Number::Float(f))),
        "[ -~]{0,16}".prop_map(Value::String),
        "\\PC{0,8}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-zA-Z0-9 _.-]{0,8}", inner), 0..6).prop_map(|entries| {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key, value);
                }
                Value::Object(map)
            }),
        ]
    })
}

fn arb_options() -> impl Strategy<Value = ToonOptions> {
    (
        prop_oneof![
            Just(Delimiter::Comma),
            Just(Delimiter::Tab),
            Just(Delimiter::Pipe)
        ],
        prop_oneof![Just(None), Just(Some('#'))],
        2usize..=4,
    )
        .prop_map(|(delimiter, marker, indent)| {
            let options = ToonOptions::default()
                .with_delimiter(delimiter)
                .with_indent(indent);
            match marker {
                Some(m) => options.with_length_marker(m),
                None => options,
            }
        })
}

proptest! {
    #[test]
    fn round_trip_default_options(value in arb_value()) {
        let options = ToonOptions::default();
        let text = encode_with_options(&value, &options).unwrap();
        let back = decode_with_options(&text, &options).unwrap();
        prop_assert_eq!(back, normalize(value), "text was:\n{}", text);
    }

    #[test]
    fn round_trip_any_options(value in arb_value(), options in arb_options()) {
        let text = encode_with_options(&value, &options).unwrap();
        let back = decode_with_options(&text, &options).unwrap();
        prop_assert_eq!(back, normalize(value), "text was:\n{}", text);
    }

    #[test]
    fn encoded_text_always_validates(value in arb_value(), options in arb_options()) {
        let text = encode_with_options(&value, &options).unwrap();
        prop_assert!(validate(&text).valid, "text was:\n{}", text);
    }

    #[test]
    fn minified_text_decodes_the_same(value in arb_value(), options in arb_options()) {
        let text = encode_with_options(&value, &options).unwrap();
        let dense = minify(&text);
        let back = decode_with_options(&dense, &options).unwrap();
        prop_assert_eq!(back, normalize(value), "dense was:\n{}", dense);
    }

    #[test]
    fn normalize_is_idempotent(value in arb_value()) {
        let once = normalize(value);
        prop_assert_eq!(normalize(once.clone()), once);
    }

    #[test]
    fn decoding_arbitrary_text_never_panics(input in "\\PC{0,200}") {
        let _ = decode_with_options(&input, &ToonOptions::default());
    }
}

#[test]
fn integral_float_boundaries_round_trip() {
    let value = toon!({
        "folds": (9_007_199_254_740_992.0f64),
        "keeps": (9_223_372_036_854_775_808.0f64),
        "min": (i64::MIN as f64),
    });
    let options = ToonOptions::default();
    let text = encode_with_options(&value, &options).unwrap();
    let back = decode_with_options(&text, &options).unwrap();
    assert_eq!(back, normalize(value));

    let obj = back.as_object().unwrap();
    // 2^53 folds to an integer; 2^63 is out of i64 range and must keep its
    // exact value as a float.
    assert_eq!(obj.get("folds"), Some(&Value::Number(Number::Integer(1 << 53))));
    assert_eq!(
        obj.get("keeps"),
        Some(&Value::Number(Number::Float(9_223_372_036_854_775_808.0)))
    );
    assert_eq!(obj.get("min"), Some(&Value::Number(Number::Integer(i64::MIN))));
}

#[test]
fn deeply_uneven_tree_round_trips() {
    // A regression-style shape mixing every layout in one tree.
    let value = toon!({
        "scalars": [1, -2.5, "x", null, true],
        "table": [{"a": 1, "b": ""}, {"a": 2, "b": "y z"}],
        "ragged": [{"a": 1}, {"a": 1, "b": 2}, [], [[]]],
        "deep": {"a": {"b": {"c": [{"d": null}]}}},
    });
    let text = encode_with_options(&value, &ToonOptions::default()).unwrap();
    assert_eq!(
        decode_with_options(&text, &ToonOptions::default()).unwrap(),
        value
    );
}
