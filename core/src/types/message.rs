use std::fmt;

use serde::{Deserialize, Serialize};

use super::{omitted, GeoPoint, Presence, Record, User};

/// A single Qaiku post.
///
/// `text` and `html` are rendered by the server on responses. `status` is
/// the raw text a client sends when posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(skip_serializing_if = "omitted")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub source: Option<String>,
    /// Two-letter language code.
    #[serde(skip_serializing_if = "omitted")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub external_url: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub truncated: Option<bool>,
    #[serde(skip_serializing_if = "omitted")]
    pub in_reply_to_status_id: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub in_reply_to_user_id: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub favorited: Option<bool>,
    #[serde(skip_serializing_if = "omitted")]
    pub geo: Option<GeoPoint>,
    #[serde(skip_serializing_if = "omitted")]
    pub user: Option<Box<User>>,
    #[serde(skip_serializing_if = "omitted")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub status: Option<String>,
}

impl Record for Message {}

impl Presence for Message {
    fn is_present(&self) -> bool {
        true
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}
