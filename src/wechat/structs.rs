//! Public data structures for the WeChat Work client.

use serde::Serialize;
use std::fmt;

/// Identity of a WeChat Work application.
///
/// Immutable once the client is built.
#[derive(Clone, Debug, PartialEq)]
pub struct AppCredentials {
    /// Enterprise (corp) id, shown in the admin console under "My company".
    pub corp_id: String,
    /// Application id, the `AgentId` of the application.
    pub agent_id: String,
    /// Application secret exchanged for an access token.
    pub corp_secret: String,
}

impl AppCredentials {
    /// Create a new [AppCredentials].
    ///
    /// # Arguments
    ///
    /// * `corp_id` - The enterprise id.
    /// * `agent_id` - The application `AgentId`.
    /// * `corp_secret` - The application secret.
    pub fn new(corp_id: &str, agent_id: &str, corp_secret: &str) -> Self {
        AppCredentials {
            corp_id: corp_id.to_string(),
            agent_id: agent_id.to_string(),
            corp_secret: corp_secret.to_string(),
        }
    }
}

/// Kind of message, serialized as the API `msgtype`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Markdown,
    Image,
    Voice,
    Video,
    File,
}

impl MessageType {
    /// Wire name of the message type, also used as the payload key.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Markdown => "markdown",
            MessageType::Image => "image",
            MessageType::Voice => "voice",
            MessageType::Video => "video",
            MessageType::File => "file",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message about to be sent.
///
/// Built per call by [`crate::wechat::WechatWork::send`].
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundMessage {
    /// Message type.
    pub message_type: MessageType,
    /// User accounts receiving the message, in order.
    pub recipients: Vec<String>,
    /// Text content, for text and markdown messages.
    pub content: Option<String>,
    /// Media id returned by a previous upload, for media messages.
    pub media_id: Option<String>,
}

impl OutboundMessage {
    /// Recipients joined the way the API expects them: `"ZhangSan|LiSi"`.
    pub fn touser(&self) -> String {
        self.recipients.join("|")
    }
}

impl fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "msgtype={}, touser={}, media_id={:?}",
            self.message_type,
            self.touser(),
            self.media_id
        )
    }
}

/// Result of a media upload.
///
/// A rejected upload is not an error: the API answered, it just refused the file.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadOutcome {
    /// The file was stored; holds the media id to reference it in a message.
    Uploaded(String),
    /// The API refused the upload.
    Rejected { errcode: i64, errmsg: String },
}

impl UploadOutcome {
    /// Media id of a successful upload.
    pub fn media_id(&self) -> Option<&str> {
        match self {
            UploadOutcome::Uploaded(media_id) => Some(media_id),
            UploadOutcome::Rejected { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(recipients: &[&str]) -> OutboundMessage {
        OutboundMessage {
            message_type: MessageType::Text,
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            content: Some("hi".to_string()),
            media_id: None,
        }
    }

    #[test]
    fn test_touser_joins_with_pipe() {
        assert_eq!(message(&["ZhangSan", "LiSi"]).touser(), "ZhangSan|LiSi");
    }

    #[test]
    fn test_touser_single_recipient() {
        assert_eq!(message(&["A"]).touser(), "A");
    }

    #[test]
    fn test_message_type_serialization() {
        assert_eq!(
            serde_json::to_string(&MessageType::Markdown).unwrap(),
            r#""markdown""#
        );
        assert_eq!(MessageType::File.to_string(), "file");
    }

    #[test]
    fn test_upload_outcome_media_id() {
        assert_eq!(
            UploadOutcome::Uploaded("X".to_string()).media_id(),
            Some("X")
        );
        let rejected = UploadOutcome::Rejected {
            errcode: 40004,
            errmsg: "invalid file".to_string(),
        };
        assert_eq!(rejected.media_id(), None);
    }

    #[test]
    fn test_outbound_message_display() {
        let display = format!("{}", message(&["A", "B"]));
        assert!(display.contains("msgtype=text"));
        assert!(display.contains("touser=A|B"));
    }
}
