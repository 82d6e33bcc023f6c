//! Instagram webhook endpoint handlers
//!
//! `GET` answers Meta's subscription handshake, `POST` receives messaging
//! events. Once a delivery is authenticated it is always acknowledged with 200,
//! otherwise Meta keeps redelivering it.

use super::{handler, schemas, security};
use crate::{
    consts, metric,
    server::{AppState, errors},
};
use ntex::{util::Bytes, web};
use serde::Deserialize;

/// Query parameters for webhook verification
#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    /// The mode parameter, should be "subscribe"
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    /// The verification token configured in the Meta dashboard
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    /// The challenge string to echo back
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

impl VerifyQuery {
    /// Challenge to echo back when the handshake is valid
    pub fn accepted_challenge(&self, expected_token: &str) -> Option<&str> {
        if self.mode.as_deref() != Some(consts::SUBSCRIBE_MODE) {
            return None;
        }
        if self.verify_token.as_deref() != Some(expected_token) {
            return None;
        }
        self.challenge.as_deref()
    }
}

/// Webhook verification endpoint (GET)
///
/// # Returns
/// - 200 with the challenge string, verbatim, if verification succeeds
/// - 403 otherwise
#[web::get("")]
pub async fn verify(
    query: web::types::Query<VerifyQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let Some(challenge) = query.accepted_challenge(&app_state.config.verify_token) else {
        logfire::warn!(
            "Webhook verification rejected: mode={mode}",
            mode = query.mode.clone().unwrap_or_default()
        );
        return Err(errors::WebhookError::Forbidden.into());
    };

    logfire::info!("Webhook verification successful");

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(challenge.to_string()))
}

/// Webhook receiver endpoint (POST)
///
/// The signature is checked against the raw body before anything is parsed.
/// Replies are sent synchronously; a body that fails to parse is logged and
/// still acknowledged.
#[web::post("")]
pub async fn receive(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let signature = req
        .headers()
        .get(consts::SIGNATURE_HEADER)
        .map(|v| v.to_str().unwrap_or_default());

    if !security::verify_signature(&body, signature, app_state.config.app_secret()) {
        metric::incr_signature_statds("rejected");
        return Err(errors::WebhookError::Forbidden.into());
    }

    match serde_json::from_slice::<schemas::WebhookPayload>(&body) {
        Ok(payload) => {
            logfire::info!(
                "Received webhook: object={object}, entries={entries}",
                object = payload.object.clone().unwrap_or_default(),
                entries = payload.entry.len() as i64
            );
            handler::process_webhook(&payload, app_state.graph.as_ref()).await;
        }
        Err(e) => {
            logfire::error!(
                "Failed to parse webhook payload: {error}",
                error = e.to_string()
            );
        }
    }

    Ok(web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "received"
    })))
}
