//! Request and response structures for WeChat Work API endpoints.
//!
//! Responses always carry `errcode` and `errmsg`; a missing field is decoded
//! with its default so that a failed call still deserializes.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::wechat::structs::OutboundMessage;

/// Response from `/cgi-bin/gettoken`.
#[derive(Deserialize, Debug, Default)]
pub struct TokenResponse {
    /// Error code, `0` on success.
    #[serde(default)]
    pub errcode: i64,
    /// Error message, `"ok"` on success.
    #[serde(default)]
    pub errmsg: String,
    /// Access token, absent when the credentials are refused.
    pub access_token: Option<String>,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: u64,
}

impl fmt::Display for TokenResponse {
    // The token itself is never printed
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "errcode={}, errmsg={}, has_token={}, expires_in={}",
            self.errcode,
            self.errmsg,
            self.access_token.is_some(),
            self.expires_in
        )
    }
}

/// Response from `/cgi-bin/media/upload`.
#[derive(Deserialize, Debug, Default)]
pub struct UploadResponse {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
    /// Media id of the stored file.
    pub media_id: Option<String>,
}

impl fmt::Display for UploadResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "errcode={}, errmsg={}, media_id={:?}",
            self.errcode, self.errmsg, self.media_id
        )
    }
}

/// Response from `/cgi-bin/message/send`.
#[derive(Deserialize, Debug, Default)]
pub struct SendResponse {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

impl fmt::Display for SendResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "errcode={}, errmsg={}", self.errcode, self.errmsg)
    }
}

/// Body posted to `/cgi-bin/message/send`.
///
/// Serializes to:
/// ```text
/// {
///   "touser": "ZhangSan|LiSi",
///   "msgtype": "text",
///   "agentid": "1000002",
///   "text": { "content": "hi", "media_id": null },
///   "safe": 0,
///   "enable_id_trans": 1,
///   "enable_duplicate_check": 0,
///   "duplicate_check_interval": 1800
/// }
/// ```
/// The payload object is keyed by the message type and always holds both
/// `content` and `media_id`.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageRequest {
    /// Application id sending the message.
    pub agent_id: String,
    /// The message itself.
    pub message: OutboundMessage,
}

impl MessageRequest {
    /// Confidential message flag, `0` means shareable.
    pub const SAFE: u8 = 0;
    /// Translate user ids into names in the delivered message.
    pub const ENABLE_ID_TRANS: u8 = 1;
    pub const ENABLE_DUPLICATE_CHECK: u8 = 0;
    /// Duplicate check window in seconds.
    pub const DUPLICATE_CHECK_INTERVAL: u32 = 1800;
}

#[derive(Serialize)]
struct MessagePayload<'a> {
    content: Option<&'a str>,
    media_id: Option<&'a str>,
}

impl Serialize for MessageRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let payload = MessagePayload {
            content: self.message.content.as_deref(),
            media_id: self.message.media_id.as_deref(),
        };

        let mut map = serializer.serialize_map(Some(8))?;
        map.serialize_entry("touser", &self.message.touser())?;
        map.serialize_entry("msgtype", &self.message.message_type)?;
        map.serialize_entry("agentid", &self.agent_id)?;
        map.serialize_entry(self.message.message_type.as_str(), &payload)?;
        map.serialize_entry("safe", &Self::SAFE)?;
        map.serialize_entry("enable_id_trans", &Self::ENABLE_ID_TRANS)?;
        map.serialize_entry("enable_duplicate_check", &Self::ENABLE_DUPLICATE_CHECK)?;
        map.serialize_entry("duplicate_check_interval", &Self::DUPLICATE_CHECK_INTERVAL)?;
        map.end()
    }
}
