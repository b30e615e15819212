//! The [`nt!`] macro for building [`crate::Value`] trees inline.

/// Builds a [`crate::Value`] tree with JSON-like syntax.
///
/// Dictionary literals use `{"key": value}`, list literals `[a, b, c]`.
/// Any expression implementing [`serde::Serialize`] can appear in value
/// position; scalars come out as their string rendering, matching
/// [`crate::to_value`].
///
/// # Examples
///
/// ```rust
/// use serde_nestedtext::nt;
///
/// let tree = nt!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["admin", "ops"]
/// });
///
/// assert_eq!(
///     tree.to_string(),
///     "name: Alice\nage: 30\ntags:\n  - admin\n  - ops\n",
/// );
/// ```
#[macro_export]
macro_rules! nt {
    ([]) => {
        $crate::Value::list(::std::vec::Vec::new())
    };

    ([ $($item:tt),* $(,)? ]) => {
        $crate::Value::list(::std::vec![ $( $crate::nt!($item) ),* ])
    };

    ({}) => {
        $crate::Value::dictionary($crate::NtMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::NtMap::new();
        $(
            map.insert(::std::string::String::from($key), $crate::nt!($value));
        )*
        $crate::Value::dictionary(map)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or_else(|_| $crate::Value::string(""))
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn empty_containers() {
        assert!(nt!([]).as_list().is_some_and(|v| v.is_empty()));
        assert!(nt!({}).as_dictionary().is_some_and(|m| m.is_empty()));
    }

    #[test]
    fn nested_literals() {
        let tree = nt!({
            "list": [1, 2],
            "inner": {"k": "v"},
        });
        let list = tree.get("list").and_then(|v| v.as_list()).unwrap();
        assert_eq!(list[0].as_str(), Some("1"));
        assert_eq!(
            tree.get("inner").and_then(|v| v.get("k")).and_then(|v| v.as_str()),
            Some("v"),
        );
    }

    #[test]
    fn expression_values() {
        let n = 7u8;
        let tree = nt!({"n": n});
        assert_eq!(tree.get("n").and_then(|v| v.as_str()), Some("7"));
    }
}
