use std::fmt::{Debug, Formatter};
use xerosign_core::utils::Redact;

/// A token/secret pair issued by the provider.
///
/// The same shape covers both lifecycle stages of the OAuth 1.0a handshake:
/// the short-lived unauthorized request token and the long-lived access
/// token. The pair is owned by the caller once returned; the client never
/// caches it.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// The `oauth_token` value.
    pub token: String,
    /// The `oauth_token_secret` value.
    pub secret: String,
}

impl TokenPair {
    /// Create a new token pair.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl Debug for TokenPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("token", &self.token)
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}
