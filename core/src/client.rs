//! Request builder, response parser and blocking client for the Qaiku API.
//!
//! # Design
//! Each operation is split the same way: a `build_*` method produces an
//! `HttpRequest`, the `Transport` executes it, and a `parse_*` method turns
//! the `HttpResponse` into a record. The build and parse halves never touch
//! the network, so they can be driven directly by test vectors or by a host
//! that performs its own I/O.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ClientConfig, DEFAULT_SOURCE};
use crate::error::ApiError;
use crate::http::{
    encode_component, form_encode, redact, HttpMethod, HttpRequest, HttpResponse,
    FORM_CONTENT_TYPE,
};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Message, Record};

/// Arguments for posting a status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Message text. Cut to the message limit unless this is a reply.
    pub text: String,
    /// Language code, `"en"` by default.
    pub lang: String,
    /// Id of the message being replied to.
    pub in_reply_to_id: Option<String>,
    /// Link attached to the message.
    pub external_url: Option<String>,
    /// Opaque application data, cut to the data limit.
    pub data: Option<String>,
    /// Channel to post into.
    pub channel: Option<String>,
}

impl StatusUpdate {
    /// An English-language update with no reply target or attachments.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: "en".to_string(),
            in_reply_to_id: None,
            external_url: None,
            data: None,
            channel: None,
        }
    }

    /// Set the language code.
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Reply to the message with this id. Replies are never truncated.
    pub fn in_reply_to(mut self, id: impl Into<String>) -> Self {
        self.in_reply_to_id = Some(id.into());
        self
    }

    /// Attach a link.
    pub fn external_url(mut self, url: impl Into<String>) -> Self {
        self.external_url = Some(url.into());
        self
    }

    /// Attach application data.
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Post into a channel instead of the main stream.
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

/// Blocking client for the Qaiku API.
///
/// Holds only immutable state; every operation is one independent round
/// trip through `T`.
#[derive(Debug, Clone)]
pub struct QaikuClient<T = UreqTransport> {
    api_key: String,
    source: String,
    config: ClientConfig,
    transport: T,
}

impl QaikuClient<UreqTransport> {
    /// Client for the production API using the default ureq transport.
    pub fn new(api_key: &str) -> Self {
        Self::with_transport(api_key, ClientConfig::default(), UreqTransport::default())
    }
}

impl<T> QaikuClient<T> {
    /// Client with an explicit configuration and transport. A trailing `/`
    /// on the base URL is dropped.
    pub fn with_transport(api_key: &str, config: ClientConfig, transport: T) -> Self {
        let config = ClientConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };
        Self {
            api_key: api_key.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            config,
            transport,
        }
    }

    /// Name the posting application instead of the library.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Label sent as `source` with every posted update.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Configuration in effect.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The message a status update is sent as.
    ///
    /// Without a reply target the text is cut to `message_limit` characters;
    /// replies keep the full text. `data` is always cut to `data_limit`.
    pub fn outbound_message(&self, update: &StatusUpdate) -> Message {
        let in_reply_to = update.in_reply_to_id.clone().filter(|id| !id.is_empty());
        let status = if in_reply_to.is_some() {
            update.text.clone()
        } else {
            truncate_chars(&update.text, self.config.message_limit)
        };

        Message {
            status: Some(status),
            in_reply_to_status_id: in_reply_to,
            lang: Some(update.lang.clone()),
            external_url: update.external_url.clone().filter(|u| !u.is_empty()),
            data: update
                .data
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| truncate_chars(d, self.config.data_limit)),
            channel: update.channel.clone().filter(|c| !c.is_empty()),
            ..Message::default()
        }
    }

    /// `POST statuses/update.json` with the outbound message as a form body.
    pub fn build_post_update(&self, update: &StatusUpdate) -> HttpRequest {
        let mut fields: Vec<(String, String)> = self
            .outbound_message(update)
            .to_map()
            .into_iter()
            .filter_map(|(k, v)| form_value(v).map(|v| (k, v)))
            .collect();
        fields.push(("source".to_string(), self.source.clone()));

        let body = form_encode(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url("statuses/update.json", &[]),
            headers: self.headers(true),
            body: Some(body),
        }
    }

    /// `GET statuses/show/{id}.json`. The id is percent-encoded.
    pub fn build_show_message(&self, id: &str) -> Result<HttpRequest, ApiError> {
        if id.is_empty() {
            return Err(ApiError::InvalidArgument("message id must not be empty".to_string()));
        }
        let path = format!("statuses/show/{}.json", encode_component(id));
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.url(&path, &[]),
            headers: self.headers(false),
            body: None,
        })
    }

    /// Request for any other API endpoint, e.g. `statuses/user_timeline.json`
    /// with `[("page", "2")]`. GET and DELETE carry `params` in the query
    /// string; POST and PUT send them as a form body. `path` must not carry
    /// its own query; pass query values through `params`.
    pub fn build_endpoint(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Err(ApiError::InvalidArgument("endpoint path must not be empty".to_string()));
        }
        if path.contains(['?', '#']) {
            return Err(ApiError::InvalidArgument(format!(
                "endpoint path must not contain a query or fragment: {path}"
            )));
        }
        let request = match method {
            HttpMethod::Get | HttpMethod::Delete => HttpRequest {
                method,
                url: self.url(path, params),
                headers: self.headers(false),
                body: None,
            },
            HttpMethod::Post | HttpMethod::Put => HttpRequest {
                method,
                url: self.url(path, &[]),
                headers: self.headers(true),
                body: Some(form_encode(params.iter().copied())),
            },
        };
        Ok(request)
    }

    /// Decode a response carrying a single message.
    pub fn parse_message(&self, response: HttpResponse) -> Result<Message, ApiError> {
        check_status(&response)?;
        Message::from_json(&response.body)
    }

    /// Decode a response carrying an arbitrary JSON document.
    pub fn parse_document(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{}?apikey={}",
            self.config.base_url,
            path,
            encode_component(&self.api_key)
        );
        if !params.is_empty() {
            url.push('&');
            url.push_str(&form_encode(params.iter().copied()));
        }
        url
    }

    fn headers(&self, form: bool) -> Vec<(String, String)> {
        let mut headers = Vec::with_capacity(2);
        if form {
            headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
        }
        headers.push(("User-Agent".to_string(), self.config.user_agent.clone()));
        headers
    }
}

impl<T: Transport> QaikuClient<T> {
    /// Post a status update and return the message the server created.
    pub fn post_update(&self, update: &StatusUpdate) -> Result<Message, ApiError> {
        let response = self.send(self.build_post_update(update))?;
        self.parse_message(response)
    }

    /// Fetch one message by id.
    pub fn show_message(&self, id: &str) -> Result<Message, ApiError> {
        let response = self.send(self.build_show_message(id)?)?;
        self.parse_message(response)
    }

    /// Call an endpoint without a dedicated wrapper and return its JSON.
    pub fn call_endpoint(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        let response = self.send(self.build_endpoint(method, path, params)?)?;
        self.parse_document(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = redact(&request.url), "qaiku request");
        self.transport.execute(&request).map_err(|e| {
            warn!(code = e.code(), error = %e, "qaiku request failed");
            ApiError::from(e)
        })
    }
}

/// Reject non-2xx responses, keeping the status and body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "qaiku returned an error status");
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

/// Flatten an encoded field to its form value. Nested values are not sent.
fn form_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
