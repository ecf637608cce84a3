/// Ordered key/value records used as JSON and XML payloads

use crate::error::{ManagerError, Result};
use serde_json::{Map, Number, Value};
use std::fmt;

/// A single record value
///
/// Records are flat: only scalars are accepted. Arrays, objects and null
/// are rejected when a record is built from JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text value
    Text(String),
    /// Whole number
    Integer(i64),
    /// Whole number above `i64::MAX`
    Unsigned(u64),
    /// Floating point number (must be finite)
    Float(f64),
    /// Boolean
    Boolean(bool),
}

impl Scalar {
    /// Infer a scalar from bare text, as typed in `key=value` input
    ///
    /// Integers, finite floats and `true`/`false` become typed values;
    /// anything else (including text wrapped in double quotes) stays text.
    pub fn infer(text: &str) -> Self {
        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            return Scalar::Text(text[1..text.len() - 1].to_string());
        }
        if let Ok(value) = text.parse::<i64>() {
            return Scalar::Integer(value);
        }
        if let Ok(value) = text.parse::<u64>() {
            return Scalar::Unsigned(value);
        }
        if let Ok(value) = text.parse::<f64>() {
            if value.is_finite() {
                return Scalar::Float(value);
            }
        }
        match text {
            "true" => Scalar::Boolean(true),
            "false" => Scalar::Boolean(false),
            _ => Scalar::Text(text.to_string()),
        }
    }

    /// Convert a JSON value into a scalar, rejecting non-scalar values
    pub fn from_json(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Scalar::Text(s.clone())),
            Value::Bool(b) => Ok(Scalar::Boolean(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Scalar::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Scalar::Unsigned(u))
                } else if let Some(f) = n.as_f64() {
                    Ok(Scalar::Float(f))
                } else {
                    Err(ManagerError::invalid_record(format!(
                        "value for '{}' is not a representable number",
                        key
                    )))
                }
            }
            Value::Null | Value::Array(_) | Value::Object(_) => {
                Err(ManagerError::invalid_record(format!(
                    "value for '{}' must be a string, number or boolean",
                    key
                )))
            }
        }
    }

    /// Convert this scalar into its native JSON value
    pub fn to_json(&self) -> Result<Value> {
        match self {
            Scalar::Text(s) => Ok(Value::String(s.clone())),
            Scalar::Integer(i) => Ok(Value::Number((*i).into())),
            Scalar::Unsigned(u) => Ok(Value::Number((*u).into())),
            Scalar::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
                ManagerError::invalid_record(format!("{} cannot be stored as JSON", f))
            }),
            Scalar::Boolean(b) => Ok(Value::Bool(*b)),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Unsigned(u) => write!(f, "{}", u),
            // Debug keeps the fractional part, so 2.0 stays "2.0"
            Scalar::Float(v) => write!(f, "{:?}", v),
            Scalar::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(value.into())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Scalar::Unsigned(value), Scalar::Integer)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

/// Insertion-ordered mapping from string keys to scalar values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Scalar)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, builder style
    pub fn with<K: Into<String>, V: Into<Scalar>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value
    ///
    /// Re-inserting an existing key replaces its value but keeps its
    /// original position.
    pub fn insert<K: Into<String>, V: Into<Scalar>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the record empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Parse a record from console input
    ///
    /// Accepts either a JSON object literal (`{"username": "root"}`) or
    /// whitespace separated `key=value` pairs (`username=root level=7`).
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.starts_with('{') {
            let value: Value = serde_json::from_str(input).map_err(|e| {
                ManagerError::invalid_record(format!("not a valid JSON object: {}", e))
            })?;
            return Self::from_json(&value);
        }

        let mut record = Record::new();
        for pair in input.split_whitespace() {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                ManagerError::invalid_record(format!("expected key=value, got '{}'", pair))
            })?;
            if key.is_empty() {
                return Err(ManagerError::invalid_record(format!(
                    "missing key in '{}'",
                    pair
                )));
            }
            record.insert(key, Scalar::infer(value));
        }
        Ok(record)
    }

    /// Build a record from a JSON object
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ManagerError::invalid_record("expected a JSON object"))?;

        let mut record = Record::new();
        for (key, value) in object {
            record.insert(key.as_str(), Scalar::from_json(key, value)?);
        }
        Ok(record)
    }

    /// Convert to a JSON object, keeping insertion order
    pub fn to_json(&self) -> Result<Value> {
        let mut map = Map::new();
        for (key, value) in &self.entries {
            map.insert(key.clone(), value.to_json()?);
        }
        Ok(Value::Object(map))
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let record = Record::new()
            .with("username", "root")
            .with("importance_level", 777)
            .with("active", true);

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["username", "importance_level", "active"]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut record = Record::new().with("a", 1).with("b", 2);
        record.insert("a", "one");

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&Scalar::from("one")));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_parse_json_literal() {
        let record = Record::parse(r#"{"username": "root", "importance_level": 777}"#)
            .expect("Failed to parse record");
        assert_eq!(record.get("username"), Some(&Scalar::Text("root".into())));
        assert_eq!(record.get("importance_level"), Some(&Scalar::Integer(777)));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["username", "importance_level"]);
    }

    #[test]
    fn test_parse_key_value_pairs() {
        let record = Record::parse("username=root level=7 ratio=0.5 admin=false id=\"42\"")
            .expect("Failed to parse record");
        assert_eq!(record.get("username"), Some(&Scalar::Text("root".into())));
        assert_eq!(record.get("level"), Some(&Scalar::Integer(7)));
        assert_eq!(record.get("ratio"), Some(&Scalar::Float(0.5)));
        assert_eq!(record.get("admin"), Some(&Scalar::Boolean(false)));
        assert_eq!(record.get("id"), Some(&Scalar::Text("42".into())));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Record::parse("username"),
            Err(ManagerError::InvalidRecord(_))
        ));
        assert!(matches!(
            Record::parse("=root"),
            Err(ManagerError::InvalidRecord(_))
        ));
        assert!(matches!(
            Record::parse("{\"broken\": "),
            Err(ManagerError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_nested_values_rejected() {
        let result = Record::parse(r#"{"tags": ["a", "b"]}"#);
        assert!(matches!(result, Err(ManagerError::InvalidRecord(_))));

        let result = Record::parse(r#"{"owner": {"name": "root"}}"#);
        assert!(matches!(result, Err(ManagerError::InvalidRecord(_))));

        let result = Record::parse(r#"{"missing": null}"#);
        assert!(matches!(result, Err(ManagerError::InvalidRecord(_))));
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::from("root").to_string(), "root");
        assert_eq!(Scalar::from(777).to_string(), "777");
        assert_eq!(Scalar::from(2.0).to_string(), "2.0");
        assert_eq!(Scalar::from(true).to_string(), "true");
    }

    #[test]
    fn test_large_unsigned_stays_integer() {
        let record = Record::parse(r#"{"id": 18446744073709551615}"#).expect("Failed to parse record");
        assert_eq!(record.get("id"), Some(&Scalar::Unsigned(u64::MAX)));
        assert_eq!(record.to_json().unwrap(), serde_json::json!({"id": u64::MAX}));

        let record = Record::parse("id=18446744073709551615").expect("Failed to parse record");
        assert_eq!(record.get("id"), Some(&Scalar::Unsigned(u64::MAX)));
        assert_eq!(Scalar::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Scalar::from(7u64), Scalar::Integer(7));
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let record = Record::new().with("x", f64::NAN);
        assert!(matches!(record.to_json(), Err(ManagerError::InvalidRecord(_))));
    }
}
