use crate::bot::payload::{ChangeValue, MessageBody, WebhookPayload};
use crate::db::UserOperations;

const MESSAGES_FIELD: &str = "messages";

const GREETING_KEYWORDS: [&str; 6] = ["commander", "menu", "bonjour", "salut", "hi", "hello"];
const HELP_KEYWORDS: [&str; 2] = ["aide", "help"];

/// Walks a webhook event and feeds every message-bearing change to the
/// dispatcher. Failures never escape: the webhook acknowledgement must not
/// depend on downstream processing.
pub fn process_event(user_ops: &UserOperations, payload: WebhookPayload) {
    for entry in payload.entry {
        for change in entry.changes {
            if change.field == MESSAGES_FIELD {
                process_messages(user_ops, &change.value);
            } else {
                debug!("process_event: ignoring change for field '{}'", change.field);
            }
        }
    }
}

fn process_messages(user_ops: &UserOperations, value: &ChangeValue) {
    for message in &value.messages {
        let display_name = value.display_name_for(&message.from);
        match user_ops.get_or_create_user(&message.from, display_name) {
            Ok(user) => {
                debug!(
                    "process_messages: resolved customer {} for {}",
                    user.id, message.from
                );
            }
            Err(e) => {
                error!(
                    "BOT: process_messages(): failed to resolve user for {}: {}",
                    message.from, e
                );
                continue;
            }
        }

        match &message.body {
            MessageBody::Text { text } => handle_text_message(&message.from, &text.body),
            MessageBody::Interactive { interactive } => {
                info!(
                    "Interactive message from {}: {}",
                    message.from, interactive
                );
            }
            MessageBody::Unsupported => {
                info!(
                    "Unsupported message type from {}, ignoring",
                    message.from
                );
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum TextReply {
    Welcome,
    Help,
    Echo,
}

fn classify_text(text: &str) -> TextReply {
    let normalized = text.trim().to_lowercase();
    if GREETING_KEYWORDS.contains(&normalized.as_str()) {
        TextReply::Welcome
    } else if HELP_KEYWORDS.contains(&normalized.as_str()) {
        TextReply::Help
    } else {
        TextReply::Echo
    }
}

fn handle_text_message(phone: &str, text: &str) {
    match classify_text(text) {
        TextReply::Welcome => send_welcome_message(phone),
        TextReply::Help => send_help_message(phone),
        TextReply::Echo => send_default_response(phone, text),
    }
}

// TODO: wire the three senders below to the WhatsApp Cloud API send
// endpoint once outbound credentials are provisioned.

fn send_welcome_message(phone: &str) {
    info!("Sending welcome message to {}", phone);
}

fn send_help_message(phone: &str) {
    info!("Sending help message to {}", phone);
}

fn send_default_response(phone: &str, original_message: &str) {
    info!(
        "Sending default response to {} for: {}",
        phone, original_message
    );
}
