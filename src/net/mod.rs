//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the transport-neutral request/response shapes, `api` is the
//! authenticated gateway every view goes through, `types` holds the wire DTOs
//! and `error` the failure taxonomy surfaced to pages.

pub mod api;
pub mod error;
pub mod http;
pub mod types;
