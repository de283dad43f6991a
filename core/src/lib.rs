//! Synchronous client for the Qaiku microblogging API.
//!
//! # Overview
//! Posts status updates and fetches messages over Qaiku's HTTP+JSON API,
//! mapping wire JSON to the typed records `Message`, `User` and `GeoPoint`.
//!
//! # Design
//! - `QaikuClient` holds only immutable state: API key, source label,
//!   `ClientConfig` and a `Transport`.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`), with one blocking round trip in
//!   between, so the I/O boundary is explicit and swappable.
//! - Records encode only present, truthy fields, and decode leniently:
//!   missing keys are absent, unknown keys are ignored.
//! - Every failure is one `ApiError` with a numeric `code()`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{QaikuClient, StatusUpdate};
pub use config::ClientConfig;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{GeoPoint, Message, Record, User};
