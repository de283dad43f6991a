//! Blocking HTTP execution behind a trait.
//!
//! `QaikuClient` is generic over `Transport` so tests can script responses
//! and failures while production code goes through `UreqTransport`.

use std::{fmt, io};

use tracing::debug;

use crate::error::TransportError;
use crate::http::{redact, HttpMethod, HttpRequest, HttpResponse};

/// Performs one blocking HTTP round trip.
///
/// Non-2xx statuses are not failures at this level; they come back as an
/// `HttpResponse` for the client to interpret.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// `Transport` backed by a ureq agent with default timeouts and redirect
/// limits.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = request.method.as_str(), url = redact(&request.url), "executing request");

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (k, v) in &request.headers {
                    builder = builder.header(k.as_str(), v.as_str());
                }
                builder.call()
            }
            HttpMethod::Delete => {
                let mut builder = self.agent.delete(&request.url);
                for (k, v) in &request.headers {
                    builder = builder.header(k.as_str(), v.as_str());
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if request.method == HttpMethod::Post {
                    self.agent.post(&request.url)
                } else {
                    self.agent.put(&request.url)
                };
                for (k, v) in &request.headers {
                    builder = builder.header(k.as_str(), v.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(classify)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response.body_mut().read_to_string().map_err(classify)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Sort ureq failures into the kinds the client reports.
fn classify(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => TransportError::HostUnreachable,
        ureq::Error::Io(e) if is_unreachable(&e) => TransportError::HostUnreachable,
        ureq::Error::TooManyRedirects => TransportError::RedirectLimit,
        ureq::Error::RedirectFailed => TransportError::RedirectMissingLocation,
        ureq::Error::Protocol(e) if e.to_string().contains("location header") => {
            TransportError::RedirectMissingLocation
        }
        ureq::Error::BadUri(uri) => TransportError::InvalidUri(uri),
        ureq::Error::Decompress(..) => TransportError::Decompression,
        other => TransportError::Other(other.to_string()),
    }
}

/// Name resolution failures and refused connections. The resolver reports
/// lookup failures as plain I/O errors, so they are recognised by message.
fn is_unreachable(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::ConnectionRefused {
        return true;
    }
    let msg = err.to_string();
    [
        "failed to lookup address information",
        "Name or service not known",
        "nodename nor servname",
        "No such host is known",
    ]
    .iter()
    .any(|needle| msg.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_ureq_failures() {
        assert_eq!(classify(ureq::Error::HostNotFound), TransportError::HostUnreachable);
        assert_eq!(classify(ureq::Error::ConnectionFailed), TransportError::HostUnreachable);
        assert_eq!(classify(ureq::Error::TooManyRedirects), TransportError::RedirectLimit);
        assert_eq!(
            classify(ureq::Error::RedirectFailed),
            TransportError::RedirectMissingLocation
        );
        assert_eq!(
            classify(ureq::Error::BadUri("statuses/show".to_string())),
            TransportError::InvalidUri("statuses/show".to_string())
        );
        assert!(matches!(
            classify(ureq::Error::StatusCode(500)),
            TransportError::Other(_)
        ));
    }

    #[test]
    fn failed_lookup_is_host_unreachable() {
        let err = io::Error::other("failed to lookup address information: Name or service not known");
        assert_eq!(classify(ureq::Error::Io(err)), TransportError::HostUnreachable);

        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert_eq!(classify(ureq::Error::Io(refused)), TransportError::HostUnreachable);
    }

    #[test]
    fn other_io_errors_stay_other() {
        let err = io::Error::from(io::ErrorKind::ConnectionReset);
        assert!(matches!(classify(ureq::Error::Io(err)), TransportError::Other(_)));
    }

    #[test]
    fn malformed_url_is_a_transport_error() {
        let transport = UreqTransport::default();
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "not a url".to_string(),
            headers: Vec::new(),
            body: None,
        };
        assert!(transport.execute(&request).is_err());
    }
}
