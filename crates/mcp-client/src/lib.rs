//! HTTP access to the DataMaker API and to user-defined endpoints.
//!
//! - [`ApiClient`]: DataMaker REST API with per-request credentials
//! - [`EndpointDispatcher`]: export/fetch against user-defined endpoints,
//!   including the SAP CSRF handshake
//! - [`flatten`]: local JSON flattening utility

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod api;
pub mod endpoint;
pub mod flatten;

pub use api::{ApiClient, NewScenario, decode_body};
pub use endpoint::{CSRF_HEADER, CsrfSession, EndpointDefinition, EndpointDispatcher};
pub use flatten::flatten;
pub use reqwest::Method;
