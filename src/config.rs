//! Configuration file structures for wecom-notify.
//!
//! The configuration is a YAML file holding the WeChat Work application
//! settings. Any value can be overridden with a `WECOM_` environment variable,
//! nested keys being separated by `__`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! wechat:
//!   # Enterprise id, "My company" page of the admin console
//!   corp_id: "ww0123456789abcdef"
//!   # AgentId of the application
//!   agent_id: 1000002
//!   # Secret of the application
//!   corp_secret: "application-secret"
//!   # Optional, defaults to https://qyapi.weixin.qq.com
//!   url: "https://qyapi.weixin.qq.com"
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export WECOM_WECHAT__CORP_SECRET="secret-from-env"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

use crate::wechat::{AppCredentials, DEFAULT_URL};

/// Prefix of the environment variables overriding the file.
const ENV_PREFIX: &str = "WECOM_";

/// Root configuration structure.
#[derive(Deserialize, Debug)]
pub struct Config {
    /// WeChat Work application configuration
    pub wechat: Wechat,
}

/// WeChat Work application configuration.
///
/// # YAML Section
///
/// ```yaml
/// wechat:
///   corp_id: "ww0123456789abcdef"
///   agent_id: 1000002
///   corp_secret: "application-secret"
/// ```
#[derive(Deserialize, Debug)]
pub struct Wechat {
    /// Enterprise id.
    pub corp_id: String,

    /// Application id (`AgentId`).
    ///
    /// Accepted as a number or a string since the admin console shows a number.
    #[serde(deserialize_with = "string_or_number")]
    pub agent_id: String,

    /// Application secret.
    pub corp_secret: String,

    /// Base URL of the API.
    ///
    /// Only worth changing to go through a proxy.
    #[serde(default = "default_url")]
    pub url: String,
}

impl Config {
    /// Loads the configuration from a YAML file, then applies the `WECOM_`
    /// environment overrides.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is malformed or a required value is
    /// missing from both the file and the environment.
    pub fn load(path: &str) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }
}

impl From<&Wechat> for AppCredentials {
    fn from(wechat: &Wechat) -> Self {
        AppCredentials::new(&wechat.corp_id, &wechat.agent_id, &wechat.corp_secret)
    }
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
