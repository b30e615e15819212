//! NestedText deserialization: [`Value`] trees into Rust values.
//!
//! Since NestedText's only leaf type is the string, leaf values are parsed
//! on demand: asking for an integer from the leaf `"42"` succeeds, asking
//! for one from `"hi"` fails with a type mismatch. Text blocks deserialize
//! as their concatenated multiline payload. The empty leaf doubles as
//! `None`, the unit value, the empty sequence, and the empty map.
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_nestedtext::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Config {
//!     port: u16,
//!     hosts: Vec<String>,
//! }
//!
//! let config: Config = from_str("port: 8080\nhosts:\n  - alpha\n  - beta").unwrap();
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.hosts, vec!["alpha", "beta"]);
//! ```

use crate::value::Kind;
use crate::{Error, NtMap, Result, Value};
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, EnumAccess, IntoDeserializer, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};

/// Deserializes a `T` from an owned [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use serde_nestedtext::{from_value, nt};
///
/// let tree = nt!({"name": "Alice", "age": "30"});
/// #[derive(serde::Deserialize, PartialEq, Debug)]
/// struct User { name: String, age: u8 }
///
/// let user: User = from_value(tree).unwrap();
/// assert_eq!(user, User { name: "Alice".to_string(), age: 30 });
/// ```
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(value)
}

impl Value {
    fn kind_name(&self) -> &'static str {
        match self.kind {
            Kind::Unknown => "unknown",
            Kind::String(_) => "string",
            Kind::Text(_) => "multiline text",
            Kind::List(_) => "list",
            Kind::Dictionary(_) => "dictionary",
        }
    }

    /// The leaf payload, if this value is a string or text block.
    fn leaf_str(&self) -> Option<String> {
        match &self.kind {
            Kind::String(s) => Some(s.clone()),
            Kind::Text(lines) => Some(lines.concat()),
            _ => None,
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(expected, self.kind_name())
    }
}

macro_rules! deserialize_parsed {
    ($method:ident, $visit:ident, $ty:ty, $expected:literal) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: Visitor<'de>,
        {
            let payload = self.leaf_str().ok_or_else(|| self.mismatch($expected))?;
            let parsed: $ty = payload
                .trim()
                .parse()
                .map_err(|_| Error::type_mismatch($expected, &format!("`{payload}`")))?;
            visitor.$visit(parsed)
        }
    };
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.kind {
            Kind::Unknown => visitor.visit_unit(),
            Kind::String(s) => visitor.visit_string(s),
            Kind::Text(lines) => visitor.visit_string(lines.concat()),
            Kind::List(items) => visit_list(items, visitor),
            Kind::Dictionary(entries) => visit_dictionary(entries, visitor),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let payload = self.leaf_str().ok_or_else(|| self.mismatch("boolean"))?;
        match payload.trim() {
            "true" => visitor.visit_bool(true),
            "false" => visitor.visit_bool(false),
            other => Err(Error::type_mismatch("boolean", &format!("`{other}`"))),
        }
    }

    deserialize_parsed!(deserialize_i8, visit_i8, i8, "integer");
    deserialize_parsed!(deserialize_i16, visit_i16, i16, "integer");
    deserialize_parsed!(deserialize_i32, visit_i32, i32, "integer");
    deserialize_parsed!(deserialize_i64, visit_i64, i64, "integer");
    deserialize_parsed!(deserialize_u8, visit_u8, u8, "unsigned integer");
    deserialize_parsed!(deserialize_u16, visit_u16, u16, "unsigned integer");
    deserialize_parsed!(deserialize_u32, visit_u32, u32, "unsigned integer");
    deserialize_parsed!(deserialize_u64, visit_u64, u64, "unsigned integer");
    deserialize_parsed!(deserialize_f32, visit_f32, f32, "number");
    deserialize_parsed!(deserialize_f64, visit_f64, f64, "number");

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let payload = self.leaf_str().ok_or_else(|| self.mismatch("character"))?;
        let mut chars = payload.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::type_mismatch("character", &format!("`{payload}`"))),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.kind {
            Kind::String(s) => visitor.visit_string(s),
            Kind::Text(lines) => visitor.visit_string(lines.concat()),
            _ => Err(self.mismatch("string")),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        // The empty leaf is the format's null.
        match &self.kind {
            Kind::String(s) if s.is_empty() => visitor.visit_none(),
            Kind::Text(lines) if lines.iter().all(|l| l.is_empty()) => visitor.visit_none(),
            Kind::Unknown => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match &self.kind {
            Kind::String(s) if s.is_empty() => visitor.visit_unit(),
            Kind::Text(lines) if lines.iter().all(|l| l.is_empty()) => visitor.visit_unit(),
            Kind::Unknown => visitor.visit_unit(),
            _ => Err(self.mismatch("empty value")),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.kind {
            Kind::List(items) => visit_list(items, visitor),
            // An empty leaf doubles as the empty sequence; block form cannot
            // express an empty list.
            Kind::String(ref s) if s.is_empty() => visit_list(Vec::new(), visitor),
            _ => Err(self.mismatch("list")),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.kind {
            Kind::Dictionary(entries) => visit_dictionary(entries, visitor),
            Kind::String(ref s) if s.is_empty() => visit_dictionary(NtMap::new(), visitor),
            _ => Err(self.mismatch("dictionary")),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.kind {
            // A bare string is a unit variant.
            Kind::String(s) => visitor.visit_enum(s.into_deserializer()),
            // A one-entry dictionary is a data-carrying variant.
            Kind::Dictionary(entries) => {
                let mut iter = entries.into_iter();
                let (variant, value) = iter
                    .next()
                    .ok_or_else(|| Error::type_mismatch("enum variant", "empty dictionary"))?;
                if iter.next().is_some() {
                    return Err(Error::type_mismatch(
                        "dictionary with a single entry",
                        "dictionary with multiple entries",
                    ));
                }
                visitor.visit_enum(EnumDeserializer { variant, value })
            }
            _ => Err(self.mismatch("enum variant")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

fn visit_list<'de, V>(items: Vec<Value>, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let mut access = SeqDeserializer {
        iter: items.into_iter(),
    };
    visitor.visit_seq(&mut access)
}

fn visit_dictionary<'de, V>(entries: NtMap, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let mut access = MapDeserializer {
        iter: entries.into_iter(),
        pending_value: None,
    };
    visitor.visit_map(&mut access)
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl<'de> SeqAccess<'de> for &mut SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(item) => seed.deserialize(item).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    pending_value: Option<Value>,
}

impl<'de> MapAccess<'de> for &mut MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.pending_value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let value = self
            .pending_value
            .take()
            .ok_or_else(|| Error::custom("next_value_seed called before next_key_seed"))?;
        seed.deserialize(value)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl<'de> EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(self.variant.into_deserializer())?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        de::Deserialize::deserialize(self.value)
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(self.value)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self.value, visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_map(self.value, visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_strings_parse_into_primitives() {
        assert_eq!(from_value::<u32>(Value::string("42")).unwrap(), 42);
        assert_eq!(from_value::<i64>(Value::string("-7")).unwrap(), -7);
        assert_eq!(from_value::<f64>(Value::string("2.5")).unwrap(), 2.5);
        assert!(from_value::<bool>(Value::string("true")).unwrap());
        assert_eq!(from_value::<char>(Value::string("x")).unwrap(), 'x');
    }

    #[test]
    fn type_mismatch_names_both_sides() {
        let err = from_value::<u32>(Value::string("hi")).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert!(err.to_string().contains("unsigned integer"));
    }

    #[test]
    fn text_block_concatenates_into_string() {
        let value = Value::text("a\nb");
        assert_eq!(from_value::<String>(value).unwrap(), "a\nb");
    }

    #[test]
    fn empty_leaf_is_none_unit_and_empty_collections() {
        let empty = || Value::string("");
        assert_eq!(from_value::<Option<u32>>(empty()).unwrap(), None);
        from_value::<()>(empty()).unwrap();
        assert!(from_value::<Vec<String>>(empty()).unwrap().is_empty());
        assert!(
            from_value::<std::collections::HashMap<String, String>>(empty())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn nonempty_leaf_is_some() {
        let value = Value::string("5");
        assert_eq!(from_value::<Option<u32>>(value).unwrap(), Some(5));
    }
}
