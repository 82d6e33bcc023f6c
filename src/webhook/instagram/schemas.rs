//! # Instagram Webhook Schemas
//!
//! Payload structure sent by Meta when Instagram messaging events occur.
//! Every field is optional so that partial or unfamiliar events still parse;
//! the handler decides what is actionable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root webhook payload
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WebhookPayload {
    /// The object type, typically "instagram" or "page"
    #[serde(default)]
    pub object: Option<String>,
    /// Entries in delivery order, a missing field means nothing to process
    #[serde(default)]
    pub entry: Vec<Entry>,
}

/// Entry object for one account
///
/// Only the fields the relay acts on are modelled; ids and timestamps are left
/// to serde's unknown-field skipping so a mistyped value cannot sink the batch.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Entry {
    /// Events owned by this integration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging: Option<Vec<MessagingEvent>>,
    /// Events for conversations handed over to another app
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standby: Option<Vec<MessagingEvent>>,
}

/// Which list an entry's events were taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventChannel {
    Primary,
    Standby,
}

impl Entry {
    /// `messaging` if present, else `standby`, else nothing.
    pub fn events(&self) -> (EventChannel, &[MessagingEvent]) {
        match (&self.messaging, &self.standby) {
            (Some(events), _) => (EventChannel::Primary, events.as_slice()),
            (None, Some(events)) => (EventChannel::Standby, events.as_slice()),
            (None, None) => (EventChannel::Primary, &[]),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MessagingEvent {
    #[serde(default)]
    pub sender: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<IncomingMessage>,
}

impl MessagingEvent {
    /// Sender PSID when present and non-empty
    pub fn sender_id(&self) -> Option<&str> {
        self.sender
            .as_ref()
            .and_then(|s| s.id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Message object when present and non-empty
    pub fn message(&self) -> Option<&IncomingMessage> {
        self.message.as_ref().filter(|m| !m.is_empty())
    }
}

/// Sender reference
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Party {
    #[serde(default)]
    pub id: Option<String>,
}

/// Message body
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IncomingMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on copies of messages the account itself sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_echo: Option<bool>,
    /// Attachments, reactions, replies and anything else we do not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IncomingMessage {
    pub fn is_empty(&self) -> bool {
        self.mid.is_none() && self.text.is_none() && self.is_echo.is_none() && self.extra.is_empty()
    }

    pub fn is_echo(&self) -> bool {
        self.is_echo.unwrap_or(false)
    }
}
