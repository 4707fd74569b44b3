/// Builds a [`Value`](crate::value::Value) from a literal-like syntax.
///
/// ```
/// use inspect_rs::value;
///
/// let v = value!({"x" => [1, 2, nil], "y" => (inspect_rs::Value::keyword("k"))});
/// assert_eq!(v.len(), 2);
/// ```
///
/// Elements and map entries are single token trees: wrap anything longer,
/// such as `-1` or a method call, in parentheses.
#[macro_export]
macro_rules! value {
    (nil) => {
        $crate::value::Value::Null
    };
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::value::Value::Vector($crate::value::Vector::from_vec(vec![$($crate::value!($elem)),*]))
    };
    ({ $($key:tt => $val:tt),* $(,)? }) => {
        $crate::value::Value::Map($crate::value::Map::from_entries(vec![$(($crate::value!($key), $crate::value!($val))),*]))
    };
    ($e:expr) => {
        $crate::value::Value::from($e)
    };
}

#[cfg(test)]
mod tests {
    use crate::value::Value;

    #[test]
    fn test_value_macro() {
        let v = value!({"a" => [1, 2.5, "s", nil, true], "b" => {}, "c" => []});
        let map = v.as_map().expect("map");
        assert_eq!(map.len(), 3);
        let a = map.get(&"a".into()).expect("a");
        assert_eq!(a.len(), 5);
        assert!(matches!(a.as_vector().and_then(|v| v.get(3)), Some(Value::Null)));
        assert!(map.get(&"b".into()).is_some_and(|b| b.is_empty()));
    }

    #[test]
    fn test_value_macro_expression() {
        let inner = value!([(-1)]);
        let outer = value!([(inner.clone()), (Value::keyword("k"))]);
        let first = outer.as_vector().and_then(|v| v.get(0)).expect("first");
        assert!(first.is_identical(&inner));
        assert_eq!(first.as_vector().and_then(|v| v.get(0)).and_then(|v| v.as_i64()), Some(-1));
    }
}
