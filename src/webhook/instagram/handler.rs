//! # Instagram Webhook Handler
//!
//! Walks the entries of an authenticated webhook delivery and answers each
//! incoming direct message with a templated reply.

use super::schemas::{EventChannel, MessagingEvent, WebhookPayload};
use crate::{
    consts, metric,
    services::{GraphService, ReplyAttempt},
};

/// What happened to a single messaging event
#[derive(Debug, PartialEq)]
pub enum EventOutcome {
    Replied,
    ReplyFailed,
    /// Received on the standby channel, owned by another app
    Standby,
    /// Copy of a message the account sent itself
    Echo,
    /// No sender or no message (read receipts, reactions on nothing, ...)
    Ignored,
}

impl EventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            EventOutcome::Replied => "replied",
            EventOutcome::ReplyFailed => "reply_failed",
            EventOutcome::Standby => "standby",
            EventOutcome::Echo => "echo",
            EventOutcome::Ignored => "ignored",
        }
    }
}

/// Handles one event from the primary channel.
///
/// Echoes of the account's own outbound messages are skipped on purpose even
/// though they carry a sender and a message: answering them would loop.
pub async fn handle_messaging_event(
    event: &MessagingEvent,
    client: &dyn GraphService,
) -> EventOutcome {
    let (Some(sender_id), Some(message)) = (event.sender_id(), event.message()) else {
        return EventOutcome::Ignored;
    };

    if message.is_echo() {
        return EventOutcome::Echo;
    }

    let reply = consts::reply_text(message.text.as_deref());

    match client.send_reply(sender_id.to_string(), reply).await {
        ReplyAttempt::Sent(response) => {
            logfire::info!(
                "Reply sent to {recipient}: {response}",
                recipient = sender_id.to_string(),
                response = response.to_string()
            );
            EventOutcome::Replied
        }
        ReplyAttempt::Failed(failure) => {
            logfire::error!(
                "Reply to {recipient} failed: status={status} code={code} subcode={subcode} type={error_type} message={message}",
                recipient = sender_id.to_string(),
                status = format!("{:?}", failure.status),
                code = format!("{:?}", failure.code),
                subcode = format!("{:?}", failure.subcode),
                error_type = failure.error_type.unwrap_or_default(),
                message = failure.message.unwrap_or_default()
            );
            EventOutcome::ReplyFailed
        }
    }
}

/// Main webhook processor
///
/// Events are handled strictly in delivery order, each reply awaited before
/// the next event is looked at. Standby events are logged and never answered.
#[tracing::instrument(skip_all)]
pub async fn process_webhook(payload: &WebhookPayload, client: &dyn GraphService) -> Vec<EventOutcome> {
    let mut outcomes = Vec::new();

    for entry in &payload.entry {
        let (channel, events) = entry.events();

        for event in events {
            let outcome = match channel {
                EventChannel::Primary => handle_messaging_event(event, client).await,
                EventChannel::Standby => {
                    logfire::info!(
                        "Skipping standby event from {sender}",
                        sender = event.sender_id().unwrap_or("unknown").to_string()
                    );
                    EventOutcome::Standby
                }
            };

            metric::incr_webhook_event_statds(outcome.as_str());
            outcomes.push(outcome);
        }
    }

    outcomes
}
