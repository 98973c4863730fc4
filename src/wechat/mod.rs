//! WeChat Work (WeCom) messaging API client.
//!
//! This module wraps the three WeChat Work endpoints the crate needs: token
//! exchange, media upload and message send.
//!
//! # Modules
//!
//! - `api_structs` - Request and response bodies exchanged with the API
//! - `client` - The [`WechatWork`] client with its credential cache
//! - `credential` - Cached access token and its expiry
//! - `requester` - HTTP transport behind the [`Requester`] trait
//! - `structs` - Public data structures (credentials, messages, upload outcome)
//!
//! # Examples
//!
//! ```no_run
//! use wecom_notify::wechat::{AppCredentials, WechatRequester, WechatWork};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), wecom_notify::wechat::WechatError> {
//! let credentials = AppCredentials::new("corp_id", "1000002", "corp_secret");
//! let requester = WechatRequester::new("https://qyapi.weixin.qq.com");
//! let client = WechatWork::new(credentials, requester);
//! client.send_text("hello", &["ZhangSan", "LiSi"]).await?;
//! # Ok(())
//! # }
//! ```

mod api_structs;
mod client;
mod credential;
pub mod requester;
mod structs;

pub use crate::wechat::api_structs::{MessageRequest, SendResponse, TokenResponse, UploadResponse};
pub use crate::wechat::client::WechatWork;
pub use crate::wechat::requester::{DEFAULT_URL, Requester, WechatRequester};
pub use crate::wechat::structs::{AppCredentials, MessageType, OutboundMessage, UploadOutcome};

use thiserror::Error;

/// `errmsg` value the API returns when a call succeeded.
pub const SUCCESS_MESSAGE: &str = "ok";

/// Errors returned by the [`WechatWork`] client.
///
/// Provider-level rejections of an upload or a send are not errors: they are
/// reported through [`UploadOutcome::Rejected`] and a `false` send result.
#[derive(Debug, Error)]
pub enum WechatError {
    /// The token endpoint answered without an access token.
    ///
    /// Usually means the corp id or the secret is wrong.
    #[error("failed to get access token (errcode={errcode}, errmsg={errmsg})")]
    Authentication { errcode: i64, errmsg: String },

    /// Transport failure or an undecodable response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The file to upload could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The path to upload has no file name.
    #[error("invalid upload path: {0}")]
    InvalidPath(String),

    /// A message was sent without any recipient.
    #[error("a message needs at least one recipient")]
    NoRecipients,
}
