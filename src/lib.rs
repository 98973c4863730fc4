//! wecom-notify - push messages to WeChat Work (WeCom) users.
//!
//! The crate wraps a WeChat Work application: it exchanges the application
//! secret for an access token, keeps that token until it expires, uploads
//! local files and sends text, markdown, image and file messages.
//!
//! # Architecture
//!
//! - [`wechat`] - API client, token cache and request/response structures
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`utils`] - Path helpers
//!
//! # Examples
//!
//! ```no_run
//! use wecom_notify::wechat::{AppCredentials, WechatRequester, WechatWork, DEFAULT_URL};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), wecom_notify::wechat::WechatError> {
//! let credentials = AppCredentials::new("corp_id", "1000002", "corp_secret");
//! let client = WechatWork::new(credentials, WechatRequester::new(DEFAULT_URL));
//! if !client.send_text("backup finished", &["ZhangSan", "LiSi"]).await? {
//!     eprintln!("message refused");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod utils;
pub mod wechat;
