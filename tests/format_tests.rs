//! Layout under every configuration: delimiters, length markers, indent
//! widths, and the whitespace transforms.

use toon_codec::{
    decode_with_options, encode_with_options, minify, normalize, optimize, toon, validate,
    Delimiter, ToonOptions, Value,
};

fn round_trips(value: &Value, options: &ToonOptions) {
    let text = encode_with_options(value, options).unwrap();
    let back = decode_with_options(&text, options).unwrap();
    assert_eq!(back, normalize(value.clone()), "text was:\n{text}");
}

fn sample() -> Value {
    toon!({
        "title": "report, draft | v2",
        "count": 3,
        "rows": [
            {"id": 1, "name": "Alice", "score": 91.5},
            {"id": 2, "name": "Bob", "score": 87},
        ],
        "tags": ["a", "b,c", "d|e"],
        "nested": {"list": [[1, 2], []], "empty": {}},
    })
}

#[test]
fn tab_delimiter_layout() {
    let options = ToonOptions::default().with_delimiter(Delimiter::Tab);
    let text = encode_with_options(&toon!([1, 2, 3]), &options).unwrap();
    assert_eq!(text, "[3]: 1\t2\t3");
}

#[test]
fn pipe_delimiter_layout() {
    let options = ToonOptions::default().with_delimiter(Delimiter::Pipe);
    let text = encode_with_options(&toon!([1, 2, 3]), &options).unwrap();
    assert_eq!(text, "[3]: 1|2|3");
}

#[test]
fn length_marker_layout() {
    let options = ToonOptions::default().with_length_marker('#');
    let text = encode_with_options(&toon!(["x"]), &options).unwrap();
    assert_eq!(text, "[#1]: x");
}

#[test]
fn marker_is_optional_on_decode() {
    let options = ToonOptions::default().with_length_marker('#');
    assert_eq!(
        decode_with_options("[#3]: 1,2,3", &options).unwrap(),
        decode_with_options("[3]: 1,2,3", &options).unwrap()
    );
}

#[test]
fn indent_width_is_respected() {
    let options = ToonOptions::default().with_indent(4);
    let text = encode_with_options(&toon!({"a": {"b": 1}}), &options).unwrap();
    assert_eq!(text, "a:\n    b: 1");
}

#[test]
fn zero_indent_is_raised_to_one() {
    // Indent 0 output would place children at the parent's column and stop
    // decoding as nesting, so the encoder enforces a minimum of one space.
    let options = ToonOptions::default().with_indent(0);
    assert_eq!(options.indent, 1);

    let value = toon!({"a": {"b": 1}});
    let text = encode_with_options(&value, &options).unwrap();
    assert_eq!(text, "a:\n b: 1");
    assert_eq!(decode_with_options(&text, &options).unwrap(), value);

    // Setting the field directly bypasses the builder; the encoder still
    // refuses to emit flat nesting.
    let raw = ToonOptions {
        indent: 0,
        ..ToonOptions::default()
    };
    let text = encode_with_options(&value, &raw).unwrap();
    assert_eq!(text, "a:\n b: 1");
    assert_eq!(decode_with_options(&text, &raw).unwrap(), value);
}

#[test]
fn tabular_rows_use_the_active_delimiter() {
    let options = ToonOptions::default().with_delimiter(Delimiter::Pipe);
    let value = toon!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]);
    let text = encode_with_options(&value, &options).unwrap();
    assert_eq!(text, "[2]{id|name}:\n  1|a\n  2|b");
    assert_eq!(decode_with_options(&text, &options).unwrap(), value);
}

#[test]
fn round_trip_across_all_configurations() {
    let value = sample();
    for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
        for marker in [None, Some('#')] {
            for indent in [2usize, 4] {
                let mut options = ToonOptions::default()
                    .with_delimiter(delimiter)
                    .with_indent(indent);
                if let Some(m) = marker {
                    options = options.with_length_marker(m);
                }
                round_trips(&value, &options);
            }
        }
    }
}

#[test]
fn encoder_output_validates_under_every_delimiter() {
    let value = sample();
    for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
        let options = ToonOptions::default().with_delimiter(delimiter);
        let text = encode_with_options(&value, &options).unwrap();
        assert!(validate(&text).valid, "{text}");
    }
}

#[test]
fn optimized_text_decodes_unchanged() {
    let value = sample();
    let options = ToonOptions::default();
    let text = encode_with_options(&value, &options).unwrap();
    let padded = text
        .lines()
        .map(|l| format!("{l}   "))
        .collect::<Vec<_>>()
        .join("\n\n\n");
    let cleaned = optimize(&padded);
    assert_eq!(
        decode_with_options(&cleaned, &options).unwrap(),
        normalize(value)
    );
}

#[test]
fn minified_text_decodes_unchanged() {
    let value = sample();
    for indent in [2usize, 4, 8] {
        let options = ToonOptions::default().with_indent(indent);
        let text = encode_with_options(&value, &options).unwrap();
        let dense = minify(&text);
        assert!(dense.len() <= text.len());
        assert_eq!(
            decode_with_options(&dense, &options).unwrap(),
            normalize(value.clone())
        );
    }
}

#[test]
fn minify_is_idempotent() {
    let text = encode_with_options(&sample(), &ToonOptions::default()).unwrap();
    let once = minify(&text);
    assert_eq!(minify(&once), once);
}
