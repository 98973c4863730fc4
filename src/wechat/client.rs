//! WeChat Work messaging client.
//!
//! This module provides the [`WechatWork`] struct: it keeps the application
//! credentials, caches the access token and exposes the upload and send
//! operations.

use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use tokio::fs;
use tokio::sync::Mutex;

use crate::utils::file_name;
use crate::wechat::api_structs::MessageRequest;
use crate::wechat::credential::CachedCredential;
use crate::wechat::requester::Requester;
use crate::wechat::structs::{AppCredentials, MessageType, OutboundMessage, UploadOutcome};
use crate::wechat::{SUCCESS_MESSAGE, WechatError};

/// Client pushing messages through a WeChat Work application.
///
/// Every operation first makes sure a valid access token is cached, fetching
/// a new one when it is missing or expired, then performs a single API call.
/// The token cache is behind a mutex so one client can be shared between tasks.
///
/// # Examples
///
/// ```no_run
/// use wecom_notify::wechat::{AppCredentials, WechatRequester, WechatWork, DEFAULT_URL};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), wecom_notify::wechat::WechatError> {
/// let credentials = AppCredentials::new("corp_id", "1000002", "corp_secret");
/// let client = WechatWork::connect(credentials, WechatRequester::new(DEFAULT_URL)).await?;
/// client.send_markdown("**deploy done**", &["ZhangSan"]).await?;
/// client.send_file("./report.pdf", &["ZhangSan", "LiSi"]).await?;
/// # Ok(())
/// # }
/// ```
pub struct WechatWork<R: Requester> {
    /// Application identity
    credentials: AppCredentials,
    /// Requester to interact with the API
    requester: R,
    /// Last access token fetched
    credential: Mutex<CachedCredential>,
}

impl<R: Requester> WechatWork<R> {
    /// Create a new [WechatWork]. No request is made until the first operation.
    ///
    /// # Arguments
    ///
    /// * `credentials` - The application identity.
    /// * `requester` - An implementation of the [Requester] trait to interact with the API.
    pub fn new(credentials: AppCredentials, requester: R) -> Self {
        WechatWork {
            credentials,
            requester,
            credential: Mutex::new(CachedCredential::default()),
        }
    }

    /// Create a new [WechatWork] and fetch a first access token, failing early
    /// on wrong credentials.
    pub async fn connect(credentials: AppCredentials, requester: R) -> Result<Self, WechatError> {
        let client = Self::new(credentials, requester);
        client.access_token().await?;
        Ok(client)
    }

    /// Returns a valid access token.
    ///
    /// The cached token is returned while it is valid. Otherwise a new token is
    /// requested and cached until `expires_in - 60` seconds from now.
    ///
    /// # Errors
    ///
    /// [`WechatError::Authentication`] when the API answers without a token,
    /// the cache is then left untouched. Transport errors are propagated.
    pub async fn access_token(&self) -> Result<String, WechatError> {
        let mut credential = self.credential.lock().await;
        if let Some(token) = credential.valid_token(Instant::now()) {
            debug!("reuse cached access token");
            return Ok(token.to_owned());
        }

        let token_response = self
            .requester
            .get_token(&self.credentials.corp_id, &self.credentials.corp_secret)
            .await?;

        let Some(token) = token_response.access_token else {
            return Err(WechatError::Authentication {
                errcode: token_response.errcode,
                errmsg: token_response.errmsg,
            });
        };

        info!(
            "got access token valid for {} seconds",
            token_response.expires_in
        );
        credential.store(token.clone(), token_response.expires_in, Instant::now());

        Ok(token)
    }

    /// Uploads a local file and returns the media id to reference it in a message.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the local file.
    /// * `file_name` - Name the file gets on the server.
    ///
    /// # Errors
    ///
    /// Token errors, file read errors and transport errors. An upload refused
    /// by the API is reported as [`UploadOutcome::Rejected`].
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        file_name: &str,
    ) -> Result<UploadOutcome, WechatError> {
        let access_token = self.access_token().await?;
        let content = fs::read(path.as_ref()).await?;

        let upload_response = self
            .requester
            .upload_media(&access_token, file_name, content)
            .await?;

        match upload_response.media_id {
            Some(media_id) if upload_response.errmsg == SUCCESS_MESSAGE => {
                info!("uploaded {} as {}", file_name, media_id);
                Ok(UploadOutcome::Uploaded(media_id))
            }
            _ => {
                warn!("upload of {} rejected: {}", file_name, upload_response.errmsg);
                Ok(UploadOutcome::Rejected {
                    errcode: upload_response.errcode,
                    errmsg: upload_response.errmsg,
                })
            }
        }
    }

    /// Sends a message and returns whether the API accepted it.
    ///
    /// # Arguments
    ///
    /// * `message_type` - The message type.
    /// * `recipients` - User accounts receiving the message, e.g. `["ZhangSan", "LiSi"]`.
    /// * `content` - Text content, for text and markdown messages.
    /// * `media_id` - Id returned by [`Self::upload_file`], for media messages.
    ///
    /// # Errors
    ///
    /// [`WechatError::NoRecipients`] on an empty recipient list, token and
    /// transport errors. A refused message is `Ok(false)`.
    pub async fn send<S: AsRef<str>>(
        &self,
        message_type: MessageType,
        recipients: &[S],
        content: Option<&str>,
        media_id: Option<&str>,
    ) -> Result<bool, WechatError> {
        if recipients.is_empty() {
            return Err(WechatError::NoRecipients);
        }

        let request = MessageRequest {
            agent_id: self.credentials.agent_id.clone(),
            message: OutboundMessage {
                message_type,
                recipients: recipients.iter().map(|r| r.as_ref().to_string()).collect(),
                content: content.map(str::to_string),
                media_id: media_id.map(str::to_string),
            },
        };

        let access_token = self.access_token().await?;
        let send_response = self.requester.send_message(&access_token, &request).await?;

        if send_response.errmsg != SUCCESS_MESSAGE {
            warn!(
                "{} message to {} rejected: {}",
                message_type,
                request.message.touser(),
                send_response
            );
            return Ok(false);
        }

        info!("{} message sent to {}", message_type, request.message.touser());
        Ok(true)
    }

    /// Sends a text message.
    pub async fn send_text<S: AsRef<str>>(
        &self,
        content: &str,
        recipients: &[S],
    ) -> Result<bool, WechatError> {
        self.send(MessageType::Text, recipients, Some(content), None)
            .await
    }

    /// Sends a markdown message.
    pub async fn send_markdown<S: AsRef<str>>(
        &self,
        content: &str,
        recipients: &[S],
    ) -> Result<bool, WechatError> {
        self.send(MessageType::Markdown, recipients, Some(content), None)
            .await
    }

    /// Uploads a local image then sends it.
    pub async fn send_image<S: AsRef<str>>(
        &self,
        image_path: impl AsRef<Path>,
        recipients: &[S],
    ) -> Result<bool, WechatError> {
        self.send_media(MessageType::Image, image_path.as_ref(), recipients)
            .await
    }

    /// Uploads a local file then sends it.
    pub async fn send_file<S: AsRef<str>>(
        &self,
        file_path: impl AsRef<Path>,
        recipients: &[S],
    ) -> Result<bool, WechatError> {
        self.send_media(MessageType::File, file_path.as_ref(), recipients)
            .await
    }

    /// Uploads `path` under its base name and sends the resulting media.
    ///
    /// Nothing is sent when the upload is rejected.
    async fn send_media<S: AsRef<str>>(
        &self,
        message_type: MessageType,
        path: &Path,
        recipients: &[S],
    ) -> Result<bool, WechatError> {
        let name = file_name(path)
            .ok_or_else(|| WechatError::InvalidPath(path.display().to_string()))?;

        match self.upload_file(path, &name).await? {
            UploadOutcome::Uploaded(media_id) => {
                self.send(message_type, recipients, None, Some(&media_id))
                    .await
            }
            UploadOutcome::Rejected { .. } => {
                warn!("{} message not sent, upload of {} failed", message_type, name);
                Ok(false)
            }
        }
    }
}
