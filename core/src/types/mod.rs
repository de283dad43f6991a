//! Domain records for the Qaiku API.
//!
//! # Design
//! Records are plain values with public, independently optional fields. They
//! move between three forms: the typed struct, a field mapping
//! (`serde_json::Map`), and a JSON string. The `Record` trait supplies those
//! conversions once for all three record types.
//!
//! Encoding follows a truthy-inclusion policy: a field is written only when
//! it holds a present, non-empty, non-zero, non-false value. An explicit
//! `false` or `0` therefore reads back as absent. Nested records are always
//! encoded through their own encoder.

mod geo;
mod message;
mod user;

pub use geo::GeoPoint;
pub use message::Message;
pub use user::User;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Conversions shared by `GeoPoint`, `User` and `Message`.
pub trait Record: Serialize + DeserializeOwned {
    /// Decode from a field mapping. Missing or `null` keys decode to absent
    /// fields and unknown keys are ignored; a present key of the wrong shape
    /// is a `Decode` error.
    fn from_map(map: Map<String, Value>) -> Result<Self, ApiError> {
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    /// Decode from a JSON document whose top level must be an object.
    fn from_json(json: &str) -> Result<Self, ApiError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => Self::from_map(map),
            other => Err(ApiError::Decode(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Encode to a field mapping holding only the present fields.
    fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Encode to a JSON string with keys in sorted order.
    fn to_json(&self) -> String {
        Value::Object(self.to_map()).to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Whether a value counts as set under the truthy-inclusion policy.
pub(crate) trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl Presence for i64 {
    fn is_present(&self) -> bool {
        *self != 0
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for (f64, f64) {
    fn is_present(&self) -> bool {
        true
    }
}

impl<T: Presence> Presence for Box<T> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

/// `skip_serializing_if` predicate for every optional record field.
pub(crate) fn omitted<T: Presence>(value: &Option<T>) -> bool {
    !value.as_ref().is_some_and(Presence::is_present)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_follows_truthiness() {
        assert!(omitted::<String>(&None));
        assert!(omitted(&Some(String::new())));
        assert!(!omitted(&Some("x".to_string())));
        assert!(omitted(&Some(false)));
        assert!(!omitted(&Some(true)));
        assert!(omitted(&Some(0i64)));
        assert!(!omitted(&Some(-3i64)));
        assert!(omitted(&Some(Vec::<String>::new())));
        assert!(!omitted(&Some((0.0, 0.0))));
    }

    #[test]
    fn from_json_rejects_non_objects() {
        let err = Message::from_json("[1, 2]").unwrap_err();
        assert_eq!(
            err,
            ApiError::Decode("expected a JSON object, found an array".to_string())
        );
        assert!(matches!(User::from_json("{not json"), Err(ApiError::Decode(_))));
        assert!(matches!(GeoPoint::from_json("null"), Err(ApiError::Decode(_))));
    }
}
