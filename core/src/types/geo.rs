use std::fmt;

use serde::{Deserialize, Serialize};

use super::{omitted, Presence, Record};

/// A geographic point attached to a message, e.g. `type: "Point"` with
/// `coordinates: (60.17, 24.94)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoPoint {
    #[serde(rename = "type", skip_serializing_if = "omitted")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub coordinates: Option<(f64, f64)>,
}

impl Record for GeoPoint {}

impl Presence for GeoPoint {
    fn is_present(&self) -> bool {
        true
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}
