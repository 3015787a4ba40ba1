//! Typed view of the WhatsApp Cloud webhook event shape. Everything is
//! lenient: unknown fields are ignored and missing collections default to
//! empty, so a partially recognized event degrades to a no-op instead of
//! failing the acknowledgement.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: ChangeValue,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub messages: Vec<IncomingMessage>,
}

impl ChangeValue {
    /// Display name the platform attached for a sender, if any.
    pub fn display_name_for(&self, wa_id: &str) -> Option<&str> {
        self.contacts
            .iter()
            .find(|contact| contact.wa_id == wa_id)
            .and_then(|contact| contact.profile.name.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub wa_id: String,
    #[serde(default)]
    pub profile: Profile,
}

#[derive(Debug, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub from: String,
    #[serde(flatten)]
    pub body: MessageBody,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageBody {
    Text { text: TextContent },
    Interactive { interactive: serde_json::Value },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_text_message_event() {
        let raw = serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "1029384756",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "contacts": [{
                            "profile": {"name": "Awa"},
                            "wa_id": "237690000001"
                        }],
                        "messages": [{
                            "from": "237690000001",
                            "id": "wamid.abc",
                            "type": "text",
                            "text": {"body": "bonjour"}
                        }]
                    }
                }]
            }]
        });

        let payload: WebhookPayload = serde_json::from_value(raw).expect("parse payload");
        assert_eq!(payload.entry.len(), 1);
        let change = &payload.entry[0].changes[0];
        assert_eq!(change.field, "messages");
        assert_eq!(change.value.messages.len(), 1);
        assert_eq!(
            change.value.display_name_for("237690000001"),
            Some("Awa")
        );

        match &change.value.messages[0].body {
            MessageBody::Text { text } => assert_eq!(text.body, "bonjour"),
            other => panic!("expected a text message, got {other:?}"),
        }
    }

    #[test]
    fn unknown_message_types_parse_as_unsupported() {
        let raw = serde_json::json!({
            "from": "237690000001",
            "type": "audio",
            "audio": {"id": "media-1"}
        });

        let message: IncomingMessage = serde_json::from_value(raw).expect("parse message");
        assert!(matches!(message.body, MessageBody::Unsupported));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let payload: WebhookPayload =
            serde_json::from_value(serde_json::json!({})).expect("parse empty payload");
        assert!(payload.entry.is_empty());

        let change: Change = serde_json::from_value(serde_json::json!({"field": "statuses"}))
            .expect("parse change without value");
        assert!(change.value.messages.is_empty());
    }
}
