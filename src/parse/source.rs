//! Source-node helpers shared by the platform parsers.

use std::ops::Deref;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// A typed node together with the exact JSON it was read from.
///
/// `raw` is what ends up in `ParsedNode::raw_payload`: absent keys stay
/// absent and explicit `null`s stay `null`, which a re-serialized `node`
/// cannot guarantee.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub raw: Value,
    pub node: T,
}

impl<T: DeserializeOwned> Sourced<T> {
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let node = T::deserialize(&raw)?;
        Ok(Sourced { raw, node })
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Sourced<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Sourced::from_value(raw).map_err(de::Error::custom)
    }
}

impl<T> Serialize for Sourced<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<T> Deref for Sourced<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.node
    }
}

/// Source ids are numbers or non-empty strings.
pub fn id_string(id: &Value) -> Option<String> {
    match id {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Step {
        #[serde(default)]
        title: Option<String>,
    }

    #[test]
    fn keeps_source_json_untouched() {
        let raw = json!({ "title": null, "extra": [1, 2] });
        let sourced: Sourced<Step> = serde_json::from_value(raw.clone()).expect("Should parse");
        assert_eq!(sourced.raw, raw);
        assert_eq!(sourced.title, None);
        assert_eq!(serde_json::to_value(&sourced).expect("Should serialize"), raw);
    }

    #[test]
    fn typed_errors_surface() {
        let result = serde_json::from_value::<Sourced<Step>>(json!({ "title": 3 }));
        assert!(result.is_err());
    }

    #[test]
    fn ids() {
        assert_eq!(id_string(&json!(12)), Some("12".to_string()));
        assert_eq!(id_string(&json!("a")), Some("a".to_string()));
        assert_eq!(id_string(&json!("")), None);
        assert_eq!(id_string(&json!(null)), None);
    }
}
