//! # Instagram Outgoing Message Schemas
//!
//! Payloads sent to the Graph API send endpoint and the error envelope it
//! answers with on rejection.

use crate::{consts, services::SendFailure};
use serde::{Deserialize, Serialize};

/// Text reply sent to an Instagram user
#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingTextMessage {
    /// Messaging product, always "instagram"
    pub messaging_product: String,
    /// Recipient, addressed by PSID
    pub recipient: Recipient,
    /// Message content
    pub message: OutgoingTextContent,
}

impl OutgoingTextMessage {
    /// Creates a new text message
    pub fn new(recipient_id: String, text: String) -> Self {
        Self {
            messaging_product: consts::MESSAGING_PRODUCT.to_string(),
            recipient: Recipient { id: recipient_id },
            message: OutgoingTextContent { text },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingTextContent {
    pub text: String,
}

/// Error envelope returned by the Graph API: `{"error": {...}}`
#[derive(Debug, Deserialize)]
pub struct GraphErrorEnvelope {
    pub error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct GraphErrorBody {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<i64>,
    pub error_subcode: Option<i64>,
}

impl SendFailure {
    /// Builds a failure from a non-2xx response, keeping whatever error fields
    /// the body carries.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<GraphErrorEnvelope>(body) {
            Ok(envelope) => Self {
                status: Some(status),
                code: envelope.error.code,
                subcode: envelope.error.error_subcode,
                message: envelope.error.message,
                error_type: envelope.error.error_type,
            },
            Err(_) => Self {
                status: Some(status),
                message: (!body.is_empty()).then(|| body.to_string()),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outgoing_text_message_shape() {
        let message = OutgoingTextMessage::new(
            "U1".into(),
            "Thanks for messaging us! You said: \"hi\"".into(),
        );

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "messaging_product": "instagram",
                "recipient": {"id": "U1"},
                "message": {"text": "Thanks for messaging us! You said: \"hi\""}
            })
        );
    }

    #[test]
    fn test_send_failure_from_graph_error() {
        let body = r#"{"error":{"message":"This message is sent outside of allowed window.","type":"OAuthException","code":10,"error_subcode":2534022,"fbtrace_id":"abc"}}"#;

        let failure = SendFailure::from_response(400, body);

        assert_eq!(failure.status, Some(400));
        assert_eq!(failure.code, Some(10));
        assert_eq!(failure.subcode, Some(2534022));
        assert_eq!(failure.error_type.as_deref(), Some("OAuthException"));
        assert!(failure.message.unwrap().contains("allowed window"));
    }

    #[test]
    fn test_send_failure_from_plain_body() {
        let failure = SendFailure::from_response(502, "Bad Gateway");
        assert_eq!(failure.status, Some(502));
        assert_eq!(failure.code, None);
        assert_eq!(failure.message.as_deref(), Some("Bad Gateway"));

        let failure = SendFailure::from_response(500, "");
        assert_eq!(failure.message, None);
    }
}
