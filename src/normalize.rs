//! Value normalization.
//!
//! [`normalize`] rewrites a [`Value`] tree into its canonical form before
//! encoding. It is total (never fails) and idempotent: normalizing an
//! already-canonical tree returns it unchanged.
//!
//! Rules:
//!
//! - `NaN`, `+∞`, `-∞` → [`Value::Null`]
//! - `-0.0` → `0`
//! - integral floats in `i64` range → [`Number::Integer`], so integral
//!   numbers always render without a trailing `.0`
//! - sequences and mappings normalize element-wise and value-wise
//!
//! Host-type coercions that need type information (timestamps, big integers,
//! absent values) are handled earlier, by the `From` conversions in
//! [`crate::value`] and by [`to_value`](crate::to_value).

use crate::{Number, Value};

/// Canonicalizes a value tree. Total and idempotent.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{normalize, Number, Value};
///
/// assert_eq!(normalize(Value::from(f64::NAN)), Value::Null);
/// assert_eq!(
///     normalize(Value::from(-0.0f64)),
///     Value::Number(Number::Integer(0))
/// );
/// assert_eq!(
///     normalize(Value::from(2.0f64)),
///     Value::Number(Number::Integer(2))
/// );
/// ```
#[must_use]
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Number(n) => normalize_number(n),
        Value::Array(arr) => Value::Array(arr.into_iter().map(normalize).collect()),
        Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, normalize(v)))
                .collect(),
        ),
        scalar => scalar,
    }
}

pub(crate) fn normalize_number(n: Number) -> Value {
    match n {
        Number::Integer(i) => Value::Number(Number::Integer(i)),
        Number::Float(f) => {
            if !f.is_finite() {
                return Value::Null;
            }
            // Covers -0.0 as well: (-0.0).fract() == 0.0 and -0.0 as i64 == 0.
            // The upper bound is exclusive: `i64::MAX as f64` rounds up to
            // 2^63, and converting that back would saturate off by one.
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < 9_223_372_036_854_775_808.0 {
                Value::Number(Number::Integer(f as i64))
            } else {
                Value::Number(Number::Float(f))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{toon, Map};

    #[test]
    fn non_finite_numbers_become_null() {
        assert_eq!(normalize(Value::from(f64::NAN)), Value::Null);
        assert_eq!(normalize(Value::from(f64::INFINITY)), Value::Null);
        assert_eq!(normalize(Value::from(f64::NEG_INFINITY)), Value::Null);
    }

    #[test]
    fn negative_zero_becomes_zero() {
        assert_eq!(
            normalize(Value::from(-0.0f64)),
            Value::Number(Number::Integer(0))
        );
    }

    #[test]
    fn integral_floats_become_integers() {
        assert_eq!(
            normalize(Value::from(1e6)),
            Value::Number(Number::Integer(1_000_000))
        );
        assert_eq!(
            normalize(Value::from(2.5f64)),
            Value::Number(Number::Float(2.5))
        );
    }

    #[test]
    fn integral_floats_at_the_i64_boundaries() {
        // 2^63 is the first integral float past i64::MAX; folding it would
        // saturate to a different integer.
        let two_pow_63 = 9_223_372_036_854_775_808.0f64;
        assert_eq!(
            normalize(Value::from(two_pow_63)),
            Value::Number(Number::Float(two_pow_63))
        );
        // i64::MIN is exactly representable and converts losslessly.
        assert_eq!(
            normalize(Value::from(i64::MIN as f64)),
            Value::Number(Number::Integer(i64::MIN))
        );
        let two_pow_53 = 9_007_199_254_740_992.0f64;
        assert_eq!(
            normalize(Value::from(two_pow_53)),
            Value::Number(Number::Integer(1 << 53))
        );
    }

    #[test]
    fn recurses_into_containers() {
        let input = toon!({
            "a": (f64::NAN),
            "b": [(f64::INFINITY), 1.0],
        });
        let expected = toon!({
            "a": null,
            "b": [null, 1],
        });
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn idempotent() {
        let values = vec![
            Value::Null,
            Value::from(true),
            Value::from(-7i64),
            Value::from(3.5f64),
            Value::from("text"),
            toon!({"k": [1, 2.5, "x", null], "m": {"n": false}}),
            Value::Object(Map::new()),
            Value::Array(vec![]),
        ];
        for v in values {
            let once = normalize(v);
            assert_eq!(normalize(once.clone()), once);
        }
    }
}
