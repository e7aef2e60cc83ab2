use std::collections::BTreeMap;

#[cfg(feature = "json")]
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
#[cfg(feature = "json")]
use serde::{ser::SerializeMap, ser::SerializeSeq, Serialize, Serializer};
#[cfg(feature = "json")]
use std::fmt;

/// An owned, dynamically typed tree that every packer reads from and
/// writes to.
///
/// This is similar to `serde_json::Value` but restricted to the shapes the
/// game file formats can express: there are no floats or booleans, and map
/// keys are the upper case field names of the target format.
///
/// ```
/// use c2format::Value;
///
/// let mut cost = Value::new_map();
/// cost.insert("MC", 5);
/// cost.insert("T", 1);
///
/// let mut beam = Value::new_map();
/// beam.insert("NAME", "Laser");
/// beam.insert("COST", cost);
///
/// assert_eq!(beam.get("NAME").and_then(Value::as_text), Some("Laser"));
/// assert_eq!(beam.get("COST").and_then(|c| c.get("MC")).and_then(Value::as_integer), Some(5));
/// assert!(beam.get("TECH").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    Null,

    /// A signed integer value
    Integer(i64),

    /// A text value, already decoded from its character set
    Text(String),

    /// An ordered sequence of values
    Array(Vec<Value>),

    /// A map keyed by field name
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Creates an empty map
    pub fn new_map() -> Value {
        Value::Map(BTreeMap::new())
    }

    /// Returns `true` if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the integer if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(x) => Some(x.as_str()),
            _ => None,
        }
    }

    /// Returns the elements if this is an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns the entries if this is a map
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Gets a value from a map by key.
    ///
    /// Null entries are reported as missing so that a field explicitly set
    /// to null behaves like a field that was never written.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()
            .and_then(|map| map.get(key))
            .filter(|x| !x.is_null())
    }

    /// Gets a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|arr| arr.get(index))
    }

    /// Inserts a field into a map. A non-map value is replaced by a new map
    /// holding only this field.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        if !matches!(self, Value::Map(_)) {
            *self = Value::new_map();
        }

        if let Value::Map(map) = self {
            map.insert(key.into(), value.into());
        }
    }

    /// Lenient integer conversion used when packing: integers are returned
    /// as is and text is parsed as a decimal number.
    ///
    /// ```
    /// use c2format::Value;
    ///
    /// assert_eq!(Value::from(42).to_integer(), Some(42));
    /// assert_eq!(Value::from(" 17 ").to_integer(), Some(17));
    /// assert_eq!(Value::from("abc").to_integer(), None);
    /// assert_eq!(Value::Null.to_integer(), None);
    /// ```
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(x) => Some(*x),
            Value::Text(x) => x.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Lenient text conversion used when packing: integers are formatted in
    /// decimal, null is empty, and containers have no textual form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Text(x) => Some(x.clone()),
            Value::Integer(x) => Some(x.to_string()),
            Value::Null => Some(String::new()),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Integer(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Integer(i64::from(x))
    }
}

impl From<i16> for Value {
    fn from(x: i16) -> Self {
        Value::Integer(i64::from(x))
    }
}

impl From<u16> for Value {
    fn from(x: u16) -> Self {
        Value::Integer(i64::from(x))
    }
}

impl From<&str> for Value {
    fn from(x: &str) -> Self {
        Value::Text(String::from(x))
    }
}

impl From<String> for Value {
    fn from(x: String) -> Self {
        Value::Text(x)
    }
}

impl From<Vec<Value>> for Value {
    fn from(x: Vec<Value>) -> Self {
        Value::Array(x)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(x: BTreeMap<String, Value>) -> Self {
        Value::Map(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(x: Option<T>) -> Self {
        x.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "json")]
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (key, value) in obj {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(feature = "json")]
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(feature = "json")]
struct ValueVisitor;

#[cfg(feature = "json")]
impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a null, number, string, array, or map")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Value::Integer(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // `as` saturates and maps NaN to zero
        Ok(Value::Integer(v.round() as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Value::Text(String::from(v)))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut result = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            result.push(item);
        }
        Ok(Value::Array(result))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut result = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            result.insert(key, value);
        }
        Ok(Value::Map(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_treats_null_as_missing() {
        let mut v = Value::new_map();
        v.insert("A", 1);
        v.insert("B", Value::Null);
        assert_eq!(v.get("A"), Some(&Value::Integer(1)));
        assert_eq!(v.get("B"), None);
        assert_eq!(v.get("C"), None);
        assert_eq!(Value::Integer(1).get("A"), None);
    }

    #[test]
    fn insert_into_scalar_creates_map() {
        let mut v = Value::Integer(3);
        v.insert("X", "y");
        assert_eq!(v.get("X").and_then(Value::as_text), Some("y"));
    }

    #[test]
    fn to_text_conversions() {
        assert_eq!(Value::from(12).to_text().as_deref(), Some("12"));
        assert_eq!(Value::Null.to_text().as_deref(), Some(""));
        assert_eq!(Value::Array(vec![]).to_text(), None);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_round_trip() {
        let json = r#"{"ARR":[1,"two",null],"NAME":"x","NUM":-5}"#;
        let value: Value = serde_json::from_str(json).unwrap();
        assert_eq!(value.get("NUM"), Some(&Value::Integer(-5)));
        assert_eq!(
            value.get("ARR").and_then(|x| x.get_index(1)),
            Some(&Value::from("two"))
        );
        assert_eq!(serde_json::to_string(&value).unwrap(), json);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_bool_and_float_become_integers() {
        let value: Value = serde_json::from_str(r#"[true, false, 2.6, -1.4]"#).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Integer(1),
                Value::Integer(0),
                Value::Integer(3),
                Value::Integer(-1)
            ])
        );
    }
}
