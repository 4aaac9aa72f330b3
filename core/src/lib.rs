//! Typed client for the Ficsit Remote Monitoring HTTP API.
//!
//! # Overview
//! `FrmClient` issues one HTTP call per method against a local FRM server,
//! re-cases the PascalCase payload to camelCase and validates it into typed
//! records (players, factory buildings, switches, chat, session info).
//!
//! # Design
//! - The client holds only immutable configuration plus a `Transport`; it
//!   is safe to share across threads when the transport is.
//! - Request building and response classification are pure functions on
//!   the client (`build_request` / `parse_response`); the transport is the
//!   only place that touches the network. `UreqTransport` is the default.
//! - The shape each endpoint must have is its serde record type in `types`;
//!   `schema::validate` reports the field path of the first mismatch.
//! - The record types are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod schema;
pub mod types;

pub use client::{below_server_error, FrmClient, RequestOptions, ResponsePredicate, AUTH_HEADER};
pub use config::ClientConfig;
pub use error::FrmError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use normalize::{normalize_key, normalize_keys};
pub use types::*;
