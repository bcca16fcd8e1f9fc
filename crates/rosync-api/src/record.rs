// Reply rows as the router returns them.
//
// A record is a flat map of field name to string. Field order is kept as
// received so printed output matches what the device sent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One row of a command reply.
///
/// Values are opaque text. Nothing at this layer interprets them; typed
/// conversion happens in `rosync-core` right after a fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, String>);

impl Record {
    /// Reserved field holding the device-assigned internal identifier.
    pub const ID_FIELD: &'static str = ".id";

    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// The row's internal identifier (`.id`), if the command reports one.
    pub fn id(&self) -> Option<&str> {
        self.get(Self::ID_FIELD)
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build a record from a JSON object, stringifying non-string values.
    ///
    /// RouterOS REST replies carry strings only, but numbers and booleans
    /// are accepted so a firmware change cannot break decoding.
    pub(crate) fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        object
            .into_iter()
            .map(|(k, v)| {
                let value = match v {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                };
                (k, value)
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn id_reads_reserved_field() {
        let record = Record::new().with(".id", "*1A").with("name", "u1");
        assert_eq!(record.id(), Some("*1A"));
        assert_eq!(record.get("name"), Some("u1"));
        assert_eq!(record.get("caller-id"), None);
    }

    #[test]
    fn json_object_values_are_stringified() {
        let serde_json::Value::Object(obj) = json!({
            "name": "u1",
            "disabled": false,
            "limit": 10,
            "comment": null
        }) else {
            unreachable!()
        };
        let record = Record::from_json_object(obj);
        assert_eq!(record.get("disabled"), Some("false"));
        assert_eq!(record.get("limit"), Some("10"));
        assert_eq!(record.get("comment"), Some(""));
    }

    #[test]
    fn field_order_is_preserved() {
        let record: Record = [("b", "2"), ("a", "1")].into_iter().collect();
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
