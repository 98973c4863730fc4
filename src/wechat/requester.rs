//! HTTP client for the WeChat Work API.
//!
//! This module provides the [`WechatRequester`] struct for the three endpoints
//! the client uses: token exchange, media upload and message send.

use log::{debug, info};
use mockall::automock;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Error};

use crate::wechat::api_structs::{MessageRequest, SendResponse, TokenResponse, UploadResponse};

/// Production API host.
pub const DEFAULT_URL: &str = "https://qyapi.weixin.qq.com";

/// Media category sent with every upload.
const UPLOAD_TYPE: &str = "file";

/// HTTP client for requesting the WeChat Work API.
///
/// # Examples
///
/// ```no_run
/// use wecom_notify::wechat::{Requester, WechatRequester, DEFAULT_URL};
///
/// # #[tokio::main]
/// # async fn main() {
/// let requester = WechatRequester::new(DEFAULT_URL);
/// let token = requester.get_token("corp_id", "corp_secret").await.unwrap();
/// println!("Token response: {}", token);
/// # }
/// ```
pub struct WechatRequester {
    /// API base url, without trailing slash
    url: String,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to the WeChat Work API.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
/// Implementations only decode the responses; interpreting `errmsg` is left
/// to the caller.
#[automock]
pub trait Requester {
    /// Exchanges the corp id and secret for an access token.
    async fn get_token(&self, corp_id: &str, corp_secret: &str) -> Result<TokenResponse, Error>;
    /// Uploads `content` as a file named `file_name`.
    async fn upload_media(
        &self,
        access_token: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadResponse, Error>;
    /// Sends a message.
    async fn send_message(
        &self,
        access_token: &str,
        request: &MessageRequest,
    ) -> Result<SendResponse, Error>;
}

impl WechatRequester {
    /// Create a new [WechatRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the API, [`DEFAULT_URL`] in production.
    pub fn new(url: &str) -> Self {
        let client = reqwest::Client::new();
        WechatRequester {
            url: url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

impl Requester for WechatRequester {
    /// Request `/cgi-bin/gettoken?corpid={corpId}&corpsecret={corpSecret}`.
    ///
    /// This api call returns a json object:
    /// ```text
    /// { "errcode": 0, "errmsg": "ok", "access_token": "accesstoken000001", "expires_in": 7200 }
    /// ```
    /// On failure `access_token` and `expires_in` are missing.
    async fn get_token(&self, corp_id: &str, corp_secret: &str) -> Result<TokenResponse, Error> {
        let url = format!("{}/cgi-bin/gettoken", &self.url);
        info!("request access token for corp {}", &corp_id);
        debug!("request {}?corpid={}", &url, &corp_id);

        let token_response: TokenResponse = self
            .client
            .get(&url)
            .query(&[("corpid", corp_id), ("corpsecret", corp_secret)])
            .send()
            .await?
            .json()
            .await?;

        debug!("response from {} -> {}", &url, &token_response);

        Ok(token_response)
    }

    /// Request `/cgi-bin/media/upload?access_token={token}&type=file` with a
    /// multipart body holding a single `file` field.
    ///
    /// This api call returns a json object:
    /// ```text
    /// { "errcode": 0, "errmsg": "ok", "type": "file", "media_id": "1G6nrLmr5EC3MMb_-zK1dDdzmd0p7cNliYu9V5w7o8K0", "created_at": "1380000000" }
    /// ```
    async fn upload_media(
        &self,
        access_token: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadResponse, Error> {
        let url = format!("{}/cgi-bin/media/upload", &self.url);
        info!("upload {} ({} bytes)", &file_name, content.len());

        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(mime::APPLICATION_OCTET_STREAM.as_ref())?;
        let form = Form::new().part("file", part);

        let upload_response: UploadResponse = self
            .client
            .post(&url)
            .query(&[("access_token", access_token), ("type", UPLOAD_TYPE)])
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        debug!("response from {} -> {}", &url, &upload_response);

        Ok(upload_response)
    }

    /// Request `/cgi-bin/message/send?access_token={token}` with the json
    /// body described in [`MessageRequest`].
    ///
    /// This api call returns a json object:
    /// ```text
    /// { "errcode": 0, "errmsg": "ok", "invaliduser": "", "msgid": "xxxx" }
    /// ```
    async fn send_message(
        &self,
        access_token: &str,
        request: &MessageRequest,
    ) -> Result<SendResponse, Error> {
        let url = format!("{}/cgi-bin/message/send", &self.url);
        info!("send message {}", &request.message);

        let send_response: SendResponse = self
            .client
            .post(&url)
            .query(&[("access_token", access_token)])
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        debug!("response from {} -> {}", &url, &send_response);

        Ok(send_response)
    }
}
