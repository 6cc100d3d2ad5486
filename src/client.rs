use crate::config::Config;
use crate::error::SendResult;
use crate::request::{RequestOptions, Requester};
use crate::types::{
    Attachment, AttachmentType, Button, ClientMessage, MessagePayload, MessagingTag, QuickReply,
    QuickReplyContent, SendResponse, SenderAction,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Method;
use serde_json::Value;

const MESSAGES_PATH: &str = "me/messages";
const DEFAULT_PROFILE_FIELD: &str = "first_name";

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone)]
pub struct MessengerClient {
    requester: Requester,
}

impl MessengerClient {
    pub fn new(requester: Requester) -> Self {
        Self { requester }
    }

    pub fn from_config(cfg: &Config) -> SendResult<Self> {
        Requester::from_config(cfg).map(Self::new)
    }

    pub fn with_api_version(&self, version: &str) -> Self {
        Self::new(self.requester.with_api_version(version))
    }

    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    pub fn request_options(&self) -> RequestOptions {
        self.requester.request_options()
    }

    pub async fn send_message(&self, message: &ClientMessage) -> SendResult<SendResponse> {
        let options = self
            .requester
            .request_options()
            .with_path(MESSAGES_PATH)
            .with_body(serde_json::to_value(message)?);
        let body = self.requester.send(options).await?;
        if body.is_object() {
            Ok(serde_json::from_value(body)?)
        } else {
            Ok(SendResponse::default())
        }
    }

    async fn send_payload(
        &self,
        recipient_id: &str,
        payload: MessagePayload,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        let message = ClientMessage::message(recipient_id, payload).with_tag(tag);
        self.send_message(&message).await
    }

    async fn send_action(
        &self,
        recipient_id: &str,
        action: SenderAction,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        let message = ClientMessage::action(recipient_id, action).with_tag(tag);
        self.send_message(&message).await
    }

    pub async fn mark_seen(
        &self,
        recipient_id: &str,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        self.send_action(recipient_id, SenderAction::MarkSeen, tag)
            .await
    }

    /// `Some(true)` turns the typing indicator on; anything else turns it off.
    pub async fn toggle_typing(
        &self,
        recipient_id: &str,
        on: Option<bool>,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        self.send_action(recipient_id, SenderAction::typing(on), tag)
            .await
    }

    pub async fn send_text_message(
        &self,
        recipient_id: &str,
        text: &str,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        self.send_payload(recipient_id, MessagePayload::text(text), tag)
            .await
    }

    pub async fn send_attachment_message(
        &self,
        recipient_id: &str,
        kind: AttachmentType,
        url_or_id: &str,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        let attachment = Attachment::media(kind, url_or_id);
        self.send_payload(recipient_id, MessagePayload::attachment(attachment), tag)
            .await
    }

    pub async fn send_image_message(
        &self,
        recipient_id: &str,
        url_or_id: &str,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        self.send_attachment_message(recipient_id, AttachmentType::Image, url_or_id, tag)
            .await
    }

    pub async fn send_audio_message(
        &self,
        recipient_id: &str,
        url_or_id: &str,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        self.send_attachment_message(recipient_id, AttachmentType::Audio, url_or_id, tag)
            .await
    }

    pub async fn send_video_message(
        &self,
        recipient_id: &str,
        url_or_id: &str,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        self.send_attachment_message(recipient_id, AttachmentType::Video, url_or_id, tag)
            .await
    }

    pub async fn send_file_message(
        &self,
        recipient_id: &str,
        url_or_id: &str,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        self.send_attachment_message(recipient_id, AttachmentType::File, url_or_id, tag)
            .await
    }

    pub async fn send_buttons_message(
        &self,
        recipient_id: &str,
        text: &str,
        buttons: &[Button],
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        let attachment = Attachment::buttons(text, buttons);
        self.send_payload(recipient_id, MessagePayload::attachment(attachment), tag)
            .await
    }

    pub async fn send_template_message(
        &self,
        recipient_id: &str,
        template: Value,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        let attachment = Attachment::template(template);
        self.send_payload(recipient_id, MessagePayload::attachment(attachment), tag)
            .await
    }

    pub async fn send_quick_reply_message(
        &self,
        recipient_id: &str,
        content: impl Into<QuickReplyContent>,
        replies: Vec<QuickReply>,
        tag: Option<MessagingTag>,
    ) -> SendResult<SendResponse> {
        let payload = content.into().into_payload(replies);
        self.send_payload(recipient_id, payload, tag).await
    }

    /// `None` or an empty list asks for `first_name` only.
    pub async fn get_user_profile(
        &self,
        user_id: &str,
        fields: Option<&[&str]>,
    ) -> SendResult<Value> {
        let fields = match fields {
            Some(list) if !list.is_empty() => list.join(","),
            _ => DEFAULT_PROFILE_FIELD.to_string(),
        };
        let segment = utf8_percent_encode(user_id, PATH_SEGMENT).to_string();
        let options = self
            .requester
            .request_options()
            .with_method(Method::GET)
            .with_path(&segment)
            .with_query("fields", fields);
        self.requester.send(options).await
    }
}
