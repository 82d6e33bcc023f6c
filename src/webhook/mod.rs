//! Webhook handlers for Meta platform notifications
//!
//! - [`instagram`] - Instagram direct message webhooks

pub mod instagram;
pub mod routes;
