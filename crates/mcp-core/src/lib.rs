//! Core types, configuration, and errors for the DataMaker MCP adapter.
//!
//! This crate provides the foundational types used across all other crates
//! in the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong identifier types (`TemplateId`, `EndpointId`, ...)
//! - The template field schema (`FieldDefinition`, `FieldKind`)
//! - Per-request caller context (`RequestScope`)
//! - Error hierarchy with contextual information
//! - Environment-driven configuration

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod scope;
mod types;

pub mod field;

pub use config::{
    Config, DEFAULT_API_URL, DEFAULT_BUCKET, DEFAULT_PORT, DEFAULT_REGION,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TOKEN_THRESHOLD, StorageBackend, StorageConfig,
};
pub use error::{Error, Result};
pub use field::{FieldDefinition, FieldKind, validate_fields};
pub use scope::{AUTHORIZATION_HEADER, RequestScope, TENANT_HEADER};
pub use types::{ConnectionId, EndpointId, ScenarioId, TemplateId};
