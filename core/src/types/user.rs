use std::fmt;

use serde::{Deserialize, Serialize};

use super::{omitted, Message, Presence, Record};

/// A Qaiku account as returned on messages and user lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "omitted")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub screen_name: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub profile_image_url: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "omitted")]
    pub geo_enabled: Option<bool>,
    #[serde(skip_serializing_if = "omitted")]
    pub protected: Option<bool>,
    #[serde(skip_serializing_if = "omitted")]
    pub followers_count: Option<i64>,
    /// The user's current status.
    #[serde(skip_serializing_if = "omitted")]
    pub status: Option<Box<Message>>,
    #[serde(skip_serializing_if = "omitted")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "omitted")]
    pub created_at: Option<String>,
}

impl Record for User {}

impl Presence for User {
    fn is_present(&self) -> bool {
        true
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}
