/// Builds a [`Value`](crate::Value) tree from JSON-like literal syntax.
///
/// Keys are string literals; values may be `null`, booleans, numbers
/// (including negative literals), strings, nested arrays and objects, or any
/// parenthesized expression that implements `Serialize`.
///
/// # Examples
///
/// ```rust
/// use toon_codec::toon;
///
/// let value = toon!({
///     "name": "Alice",
///     "delta": -2.5,
///     "tags": ["admin", "ops"],
///     "meta": {"active": true, "score": 91.5},
/// });
/// assert!(value.is_object());
/// ```
#[macro_export]
macro_rules! toon {
    // Sequence elements, munched one at a time. A leading `-` binds to the
    // literal that follows it, so negative numbers are single elements.
    (@seq [$($out:expr,)*] - $n:literal $(, $($rest:tt)*)?) => {
        $crate::toon!(@seq [$($out,)* $crate::toon!(- $n),] $($($rest)*)?)
    };
    (@seq [$($out:expr,)*] $elem:tt $(, $($rest:tt)*)?) => {
        $crate::toon!(@seq [$($out,)* $crate::toon!($elem),] $($($rest)*)?)
    };
    (@seq [$($out:expr,)*]) => {
        $crate::Value::Array(vec![$($out),*])
    };

    // Mapping entries.
    (@map $object:ident ($key:literal : - $n:literal $(, $($rest:tt)*)?)) => {
        $object.insert($key.to_string(), $crate::toon!(- $n));
        $crate::toon!(@map $object ($($($rest)*)?));
    };
    (@map $object:ident ($key:literal : $value:tt $(, $($rest:tt)*)?)) => {
        $object.insert($key.to_string(), $crate::toon!($value));
        $crate::toon!(@map $object ($($($rest)*)?));
    };
    (@map $object:ident ()) => {};

    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    (- $n:literal) => {
        $crate::to_value(&(-$n)).unwrap_or($crate::Value::Null)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($tt:tt)+ ]) => {
        $crate::toon!(@seq [] $($tt)+)
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($tt:tt)+ }) => {{
        let mut object = $crate::Map::new();
        $crate::toon!(@map object ($($tt)+));
        $crate::Value::Object(object)
    }};

    // Fallback: any serializable expression.
    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn primitives() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(true), Value::Bool(true));
        assert_eq!(toon!(42), Value::Number(Number::Integer(42)));
        assert_eq!(toon!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(toon!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn negative_number_literals() {
        assert_eq!(toon!(-7), Value::Number(Number::Integer(-7)));
        assert_eq!(toon!(-2.5), Value::Number(Number::Float(-2.5)));
        assert_eq!(
            toon!([1, -2.5, "x", null, true]),
            Value::Array(vec![
                Value::Number(Number::Integer(1)),
                Value::Number(Number::Float(-2.5)),
                Value::String("x".to_string()),
                Value::Null,
                Value::Bool(true),
            ])
        );
        assert_eq!(
            toon!({"lo": -9, "hi": 9}),
            toon!({"lo": (-9), "hi": 9})
        );
    }

    #[test]
    fn arrays_and_objects() {
        assert_eq!(toon!([]), Value::Array(vec![]));
        assert_eq!(toon!({}), Value::Object(Map::new()));

        let value = toon!({"name": "Alice", "scores": [1, 2, 3]});
        let obj = match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        };
        assert_eq!(obj.get("name"), Some(&Value::String("Alice".to_string())));
        assert_eq!(obj.get("scores"), Some(&toon!([1, 2, 3])));

        // Trailing commas are accepted everywhere.
        assert_eq!(toon!([1, 2,]), toon!([1, 2]));
        assert_eq!(toon!({"a": 1,}), toon!({"a": 1}));
    }

    #[test]
    fn parenthesized_expressions() {
        let n = 5;
        assert_eq!(toon!((n * 2)), Value::Number(Number::Integer(10)));
        assert_eq!(
            toon!({"sum": (n + 1)}),
            toon!({"sum": 6})
        );
    }
}
