//! Business logic behind the read-only API endpoints.

pub mod conversations;
