//! Immutable client configuration.
//!
//! Holds the values a client needs besides its credentials: where the API
//! lives, how it identifies itself, and the length limits applied to
//! outbound text.

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "http://www.qaiku.com/api";

/// Library identifier sent as `User-Agent`.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// `source` label sent with posts unless the caller supplies its own.
pub const DEFAULT_SOURCE: &str = env!("CARGO_PKG_NAME");

/// Longest status text, in characters, posted without a reply target.
pub const MESSAGE_LIMIT: usize = 139;

/// Longest attached `data` string, in characters.
pub const DATA_LIMIT: usize = 240;

/// Where requests go and how outbound updates are limited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing `/`, e.g. `http://www.qaiku.com/api`.
    pub base_url: String,
    /// Sent as the `User-Agent` header on every request.
    pub user_agent: String,
    /// Characters kept from a status text that is not a reply.
    pub message_limit: usize,
    /// Characters kept from attached `data`.
    pub data_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            message_limit: MESSAGE_LIMIT,
            data_limit: DATA_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Point the client at another API root. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}
