pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
pub const SIGNATURE_PREFIX: &str = "sha256=";
pub const SUBSCRIBE_MODE: &str = "subscribe";

pub const MESSAGING_PRODUCT: &str = "instagram";
pub const NO_TEXT_PLACEHOLDER: &str = "(no text)";

pub const DEFAULT_CONVERSATIONS_LIMIT: u32 = 25;
pub const CONVERSATION_FIELDS: &str = "id,updated_time,participants.limit(50){id,username},link";
pub const BUSINESS_ACCOUNT_FIELDS: [&str; 2] =
    ["instagram_business_account", "connected_instagram_account"];

/// Builds the automated reply for an incoming message text.
pub fn reply_text(incoming: Option<&str>) -> String {
    let said = incoming.filter(|t| !t.is_empty()).unwrap_or(NO_TEXT_PLACEHOLDER);
    format!("Thanks for messaging us! You said: \"{said}\"")
}
