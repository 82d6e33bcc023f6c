//! # Graph API Client
//!
//! Thin wrapper around the Meta Graph API. Reads go through [`GraphHandler::get`]
//! with the page token as `access_token` query parameter; the message send
//! endpoint takes it as bearer credential.

use super::{GraphError, GraphService, ReplyAttempt, SendFailure};
use crate::{config::AppConfig, consts, webhook::instagram::outgoing_schemas::OutgoingTextMessage};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Clone)]
pub struct GraphHandler {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// Versioned API root, e.g. `https://graph.facebook.com/v21.0`
    api_url: String,
    /// Page access token
    access_token: String,
}

impl GraphHandler {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.graph_api_url(),
            access_token: config.page_access_token.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

/// Picks the linked business account id out of the page lookup response.
fn linked_business_account_id(page: &Value) -> Option<String> {
    consts::BUSINESS_ACCOUNT_FIELDS.iter().find_map(|field| {
        page.get(field)
            .and_then(|account| account.get("id"))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    })
}

#[async_trait]
impl GraphService for GraphHandler {
    async fn resolve_business_account_id(&self) -> Result<String, GraphError> {
        let me = self
            .get("me".into(), vec![("fields".into(), "id".into())])
            .await?;

        let page_id = me
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                GraphError::Resolution("the access token did not resolve to a page id".into())
            })?
            .to_string();

        let page = self
            .get(
                page_id.clone(),
                vec![("fields".into(), consts::BUSINESS_ACCOUNT_FIELDS.join(","))],
            )
            .await?;

        linked_business_account_id(&page).ok_or_else(|| {
            GraphError::Resolution(format!(
                "no Instagram business account is linked to page {page_id}; connect one in the page settings"
            ))
        })
    }

    async fn send_reply(&self, recipient_id: String, text: String) -> ReplyAttempt {
        let message = OutgoingTextMessage::new(recipient_id, text);

        let response = match self
            .client
            .post(self.endpoint("me/messages"))
            .bearer_auth(&self.access_token)
            .json(&message)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return ReplyAttempt::Failed(SendFailure {
                    message: Some(e.to_string()),
                    ..Default::default()
                });
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());

        if !status.is_success() {
            return ReplyAttempt::Failed(SendFailure::from_response(status.as_u16(), &body));
        }

        ReplyAttempt::Sent(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    async fn get(&self, path: String, params: Vec<(String, String)>) -> Result<Value, GraphError> {
        let response = self
            .client
            .get(self.endpoint(&path))
            .query(&params)
            .query(&[("access_token", &self.access_token)])
            .send()
            .await
            .map_err(|e| GraphError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(GraphError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GraphError::Transport(format!("invalid json body: {e}")))
    }
}
