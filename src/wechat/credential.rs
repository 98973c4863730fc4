//! Cached access token.

use std::time::{Duration, Instant};

/// Subtracted from the lifetime announced by the API so a token is refreshed
/// before the server considers it expired.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Access token and the instant it stops being usable.
///
/// Only [`crate::wechat::WechatWork::access_token`] mutates it.
#[derive(Debug, Default)]
pub struct CachedCredential {
    token: Option<String>,
    expires_at: Option<Instant>,
}

impl CachedCredential {
    /// Returns the token if one is cached and `now` is strictly before its expiry.
    pub fn valid_token(&self, now: Instant) -> Option<&str> {
        match (&self.token, self.expires_at) {
            (Some(token), Some(expires_at)) if now < expires_at => Some(token),
            _ => None,
        }
    }

    /// Stores a freshly fetched token.
    ///
    /// # Arguments
    ///
    /// * `token` - The access token.
    /// * `expires_in` - Lifetime in seconds announced by the API.
    /// * `now` - The instant the token was received.
    pub fn store(&mut self, token: String, expires_in: u64, now: Instant) {
        let lifetime = Duration::from_secs(expires_in).saturating_sub(EXPIRY_MARGIN);
        self.token = Some(token);
        self.expires_at = Some(now + lifetime);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_credential_is_invalid() {
        let credential = CachedCredential::default();
        assert_eq!(credential.valid_token(Instant::now()), None);
    }

    #[test]
    fn test_token_valid_before_margin() {
        let now = Instant::now();
        let mut credential = CachedCredential::default();
        credential.store("token".to_string(), 7200, now);

        assert_eq!(credential.valid_token(now), Some("token"));
        assert_eq!(
            credential.valid_token(now + Duration::from_secs(7139)),
            Some("token")
        );
    }

    #[test]
    fn test_token_expires_at_margin() {
        let now = Instant::now();
        let mut credential = CachedCredential::default();
        credential.store("token".to_string(), 7200, now);

        assert_eq!(credential.valid_token(now + Duration::from_secs(7140)), None);
        assert_eq!(credential.valid_token(now + Duration::from_secs(7200)), None);
    }

    #[test]
    fn test_short_lifetime_is_immediately_stale() {
        let now = Instant::now();
        let mut credential = CachedCredential::default();
        credential.store("token".to_string(), 30, now);

        assert_eq!(credential.valid_token(now), None);
    }

    #[test]
    fn test_store_replaces_previous_token() {
        let now = Instant::now();
        let mut credential = CachedCredential::default();
        credential.store("old".to_string(), 7200, now);
        credential.store("new".to_string(), 7200, now);

        assert_eq!(credential.valid_token(now), Some("new"));
    }
}
