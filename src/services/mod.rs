pub mod graph;

use async_trait::async_trait;
use derive_more::{Display, Error};
use std::sync::Arc;

/// Errors raised by Graph API read operations.
#[derive(Debug, Display, Error)]
pub enum GraphError {
    #[display("graph api request failed: {_0}")]
    Transport(#[error(not(source))] String),
    #[display("graph api returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[display("{_0}")]
    Resolution(#[error(not(source))] String),
}

/// Structured failure returned by the message send endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendFailure {
    /// HTTP status, absent when no response was received
    pub status: Option<u16>,
    pub code: Option<i64>,
    pub subcode: Option<i64>,
    pub message: Option<String>,
    pub error_type: Option<String>,
}

/// Outcome of a single reply attempt.
///
/// A `Sent` acknowledgment only means the platform accepted the message; it says
/// nothing about the relationship between the sender and the business account.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyAttempt {
    Sent(serde_json::Value),
    Failed(SendFailure),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphService: Send + Sync {
    /// Resolves the Instagram business account linked to the page credential.
    async fn resolve_business_account_id(&self) -> Result<String, GraphError>;

    /// Sends a text reply to a user. Never fails: delivery problems come back as
    /// [`ReplyAttempt::Failed`].
    async fn send_reply(&self, recipient_id: String, text: String) -> ReplyAttempt;

    /// Plain GET against `path` with extra query parameters.
    async fn get(
        &self,
        path: String,
        params: Vec<(String, String)>,
    ) -> Result<serde_json::Value, GraphError>;
}

pub type ImplGraphService = Arc<dyn GraphService>;
