//! Instagram messaging webhook integration
//!
//! ## Submodules
//!
//! - [`handler`] - Reply logic for incoming messaging events
//! - [`routes`] - HTTP endpoints (handshake and event receiver)
//! - [`schemas`] - Incoming webhook payload structures
//! - [`outgoing_schemas`] - Payloads sent to the Graph API
//! - [`security`] - `X-Hub-Signature-256` verification

pub mod handler;
pub mod outgoing_schemas;
pub mod routes;
pub mod schemas;
pub mod security;

pub use routes::{receive, verify};
