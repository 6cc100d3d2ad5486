use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderAction {
    MarkSeen,
    TypingOn,
    TypingOff,
}

impl SenderAction {
    /// `None` falls back to `TypingOff`.
    pub fn typing(on: Option<bool>) -> Self {
        if on == Some(true) {
            SenderAction::TypingOn
        } else {
            SenderAction::TypingOff
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessagingType {
    Response,
    Update,
    MessageTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Regular,
    SilentPush,
    NoPush,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingTag {
    pub messaging_type: MessagingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl MessagingTag {
    pub fn response() -> Self {
        Self {
            messaging_type: MessagingType::Response,
            tag: None,
        }
    }

    pub fn update() -> Self {
        Self {
            messaging_type: MessagingType::Update,
            tag: None,
        }
    }

    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            messaging_type: MessagingType::MessageTag,
            tag: Some(tag.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientMessage {
    pub recipient: Recipient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessagePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_action: Option<SenderAction>,
    #[serde(flatten)]
    pub tag: Option<MessagingTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<NotificationType>,
}

impl ClientMessage {
    pub fn message(recipient_id: &str, message: MessagePayload) -> Self {
        Self {
            recipient: Recipient {
                id: recipient_id.to_string(),
            },
            message: Some(message),
            sender_action: None,
            tag: None,
            notification_type: None,
        }
    }

    pub fn action(recipient_id: &str, action: SenderAction) -> Self {
        Self {
            recipient: Recipient {
                id: recipient_id.to_string(),
            },
            message: None,
            sender_action: Some(action),
            tag: None,
            notification_type: None,
        }
    }

    pub fn with_tag(mut self, tag: Option<MessagingTag>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_notification_type(mut self, notification_type: NotificationType) -> Self {
        self.notification_type = Some(notification_type);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<Vec<QuickReply>>,
}

impl MessagePayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn attachment(attachment: Attachment) -> Self {
        Self {
            attachment: Some(attachment),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Image,
    Audio,
    Video,
    File,
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    pub payload: Value,
}

impl Attachment {
    pub fn media(kind: AttachmentType, url_or_id: &str) -> Self {
        Self {
            kind,
            payload: MediaSource::detect(url_or_id).payload(),
        }
    }

    pub fn template(payload: Value) -> Self {
        Self {
            kind: AttachmentType::Template,
            payload,
        }
    }

    pub fn buttons(text: &str, buttons: &[Button]) -> Self {
        Self::template(json!({
            "template_type": "button",
            "text": text,
            "buttons": buttons,
        }))
    }
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(https?://)?([\da-z-]+\.)+[a-z]{2,6}(:\d+)?(/\S*)?$")
            .unwrap_or_else(|e| panic!("url pattern must compile: {e}"))
    })
}

pub fn is_url(candidate: &str) -> bool {
    url_pattern().is_match(candidate.trim())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Url(String),
    AttachmentId(String),
}

impl MediaSource {
    pub fn detect(url_or_id: &str) -> Self {
        let url_or_id = url_or_id.trim();
        if is_url(url_or_id) {
            MediaSource::Url(url_or_id.to_string())
        } else {
            MediaSource::AttachmentId(url_or_id.to_string())
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            MediaSource::Url(url) => json!({ "url": url, "is_reusable": true }),
            MediaSource::AttachmentId(id) => json!({ "attachment_id": id }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
    WebUrl { url: String, title: String },
    Postback { title: String, payload: String },
    PhoneNumber { title: String, payload: String },
    // Sent as is: account_link, game_play, web_url with webview options, ...
    #[serde(untagged)]
    Raw(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum QuickReply {
    Text {
        title: String,
        payload: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
    UserPhoneNumber,
    UserEmail,
    #[serde(untagged)]
    Raw(Value),
}

impl QuickReply {
    pub fn text(title: impl Into<String>, payload: impl Into<String>) -> Self {
        QuickReply::Text {
            title: title.into(),
            payload: payload.into(),
            image_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuickReplyContent {
    Text(String),
    Attachment(Attachment),
}

impl From<&str> for QuickReplyContent {
    fn from(text: &str) -> Self {
        QuickReplyContent::Text(text.to_string())
    }
}

impl From<String> for QuickReplyContent {
    fn from(text: String) -> Self {
        QuickReplyContent::Text(text)
    }
}

impl From<Attachment> for QuickReplyContent {
    fn from(attachment: Attachment) -> Self {
        QuickReplyContent::Attachment(attachment)
    }
}

impl QuickReplyContent {
    pub fn into_payload(self, replies: Vec<QuickReply>) -> MessagePayload {
        let mut payload = match self {
            QuickReplyContent::Text(text) => MessagePayload::text(text),
            QuickReplyContent::Attachment(attachment) => MessagePayload::attachment(attachment),
        };
        payload.quick_replies = Some(replies);
        payload
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}
