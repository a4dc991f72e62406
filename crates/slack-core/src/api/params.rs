//! Request parameters shared by the query-string and JSON-body encodings.

use serde_json::{Map, Value};

/// A single parameter value as the platform expects it on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Json(Value),
}

impl ParamValue {
    /// Query-string form: counts as decimal strings, flags as `true`/`false`.
    pub fn to_query_value(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::Json(v) => v.to_string(),
        }
    }

    pub fn to_json_value(&self) -> Value {
        match self {
            ParamValue::Str(s) => Value::String(s.clone()),
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Int(n) => Value::from(*n),
            ParamValue::Json(v) => v.clone(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Json(value)
    }
}

/// Ordered parameter mapping. Keys are unique; setting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn with_opt<V: Into<ParamValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Adds the parameter only when it is present and non-empty.
    /// Absent and empty both leave the key out of the request entirely.
    pub fn with_non_empty(self, key: &str, value: Option<&str>) -> Self {
        self.with_opt(key, value.filter(|v| !v.is_empty()))
    }

    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_query_value()))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json_value()))
            .collect();
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_encoding_of_scalars() {
        let params = Params::new()
            .with("channel", "C123")
            .with("limit", 100u32)
            .with("exclude_archived", true);

        assert_eq!(
            params.to_query(),
            vec![
                ("channel".to_string(), "C123".to_string()),
                ("limit".to_string(), "100".to_string()),
                ("exclude_archived".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_encoding_keeps_native_types() {
        let params = Params::new()
            .with("name", "new-channel")
            .with("is_private", false)
            .with("blocks", json!([{"type": "divider"}]));

        assert_eq!(
            params.to_json(),
            json!({
                "name": "new-channel",
                "is_private": false,
                "blocks": [{"type": "divider"}]
            })
        );
    }

    #[test]
    fn test_optional_parameters_are_omitted() {
        let params = Params::new()
            .with("channel", "C123")
            .with_opt::<&str>("oldest", None)
            .with_non_empty("thread_ts", Some(""))
            .with_non_empty("latest", None);

        assert_eq!(params.len(), 1);
        assert!(!params.contains_key("oldest"));
        assert!(!params.contains_key("thread_ts"));
        assert!(!params.contains_key("latest"));
        assert!(params.to_json().get("thread_ts").is_none());
    }

    #[test]
    fn test_set_replaces_existing_key() {
        let mut params = Params::new().with("cursor", "abc");
        params.set("cursor", "def");

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("cursor"), Some(&ParamValue::from("def")));
    }
}
