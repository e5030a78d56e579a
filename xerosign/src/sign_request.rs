use crate::credential::Credential;
use crate::signature::{sign_credential, CryptoTokenSigner, OAuthParams, TokenSign};
use crate::token::TokenPair;
use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderValue;
use std::sync::Arc;
use std::time::Duration;
use xerosign_core::{Context, Error, Result, SignRequest};

/// RequestSigner attaches an OAuth 1.0a `Authorization` header to resource
/// requests.
///
/// By default it signs with the credential's initial token pair, which is
/// how private and partner apps operate. A public app supplies the access
/// token it obtained from the handshake via [`RequestSigner::with_token`].
#[derive(Debug)]
pub struct RequestSigner {
    signer: Arc<dyn TokenSign>,
    token: Option<TokenPair>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner {
    /// Create a signer using the default cryptographic backend.
    pub fn new() -> Self {
        Self {
            signer: Arc::new(CryptoTokenSigner),
            token: None,
        }
    }

    /// Sign with this access token pair instead of the credential's initial
    /// pair.
    pub fn with_token(mut self, token: TokenPair) -> Self {
        self.token = Some(token);
        self
    }

    /// Replace the signing capability.
    pub fn with_signer(mut self, signer: impl TokenSign) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    pub(crate) fn with_shared_signer(mut self, signer: Arc<dyn TokenSign>) -> Self {
        self.signer = signer;
        self
    }

    fn token_pair<'a>(&'a self, cred: &'a Credential) -> (Option<&'a str>, Option<&'a str>) {
        match &self.token {
            Some(pair) => (Some(pair.token.as_str()), Some(pair.secret.as_str())),
            None => (cred.oauth_token.as_deref(), cred.oauth_token_secret.as_deref()),
        }
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "OAuth 1.0a header signing does not support expiring signatures",
            ));
        }

        let Some(cred) = credential else {
            return Ok(());
        };

        // Base URL excludes the query string; query parameters join the
        // signed parameter set instead (RFC 5849 Section 3.4.1).
        let authority = req
            .uri
            .authority()
            .map(|a| a.as_str())
            .ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?;
        let base_url = format!(
            "{}://{}{}",
            req.uri.scheme_str().unwrap_or("https"),
            authority,
            req.uri.path()
        );

        let query: Vec<(String, String)> = req
            .uri
            .query()
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();

        let (token, token_secret) = self.token_pair(cred);

        let mut params = OAuthParams::new(&cred.consumer_key, cred.signature_method);
        if let Some(token) = token {
            params = params.with_token(token);
        }

        let base_string = params.base_string(req.method.as_str(), &base_url, &query);
        let signature = sign_credential(self.signer.as_ref(), cred, &base_string, token_secret)?;

        let mut header_value: HeaderValue = params.authorization_header(&signature).parse()?;
        header_value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, header_value);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{SignatureMethod, SigningKeys};

    #[derive(Debug, Clone, Copy)]
    struct FixtureSigner;

    impl TokenSign for FixtureSigner {
        fn sign(
            &self,
            _method: SignatureMethod,
            _base_string: &str,
            _keys: &SigningKeys<'_>,
        ) -> Result<String> {
            Ok("fixture-signature".to_string())
        }
    }

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::get(uri)
            .body(())
            .expect("valid request")
            .into_parts()
            .0
    }

    fn hmac_credential() -> Credential {
        Credential {
            consumer_key: "myConsumerKey".to_string(),
            consumer_secret: "myConsumerSecret".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_sign_request_attaches_sensitive_header() {
        let ctx = Context::new();
        let signer = RequestSigner::new()
            .with_signer(FixtureSigner)
            .with_token(TokenPair::new("accessToken", "accessSecret"));
        let mut req = parts("https://api.xero.com/api.xro/2.0/Invoices?page=2");

        signer
            .sign_request(&ctx, &mut req, Some(&hmac_credential()), None)
            .await
            .unwrap();

        let header = req.headers.get(AUTHORIZATION).expect("header must be set");
        assert!(header.is_sensitive());

        let value = header.to_str().unwrap();
        assert!(value.starts_with("OAuth oauth_consumer_key=\"myConsumerKey\""));
        assert!(value.contains("oauth_token=\"accessToken\""));
        assert!(value.contains("oauth_signature=\"fixture-signature\""));
    }

    #[tokio::test]
    async fn test_sign_request_without_credential_is_noop() {
        let ctx = Context::new();
        let signer = RequestSigner::new().with_signer(FixtureSigner);
        let mut req = parts("https://api.xero.com/api.xro/2.0/Contacts");

        signer.sign_request(&ctx, &mut req, None, None).await.unwrap();

        assert!(req.headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_sign_request_rejects_expiry() {
        let ctx = Context::new();
        let signer = RequestSigner::new().with_signer(FixtureSigner);
        let mut req = parts("https://api.xero.com/api.xro/2.0/Contacts");

        let err = signer
            .sign_request(
                &ctx,
                &mut req,
                Some(&hmac_credential()),
                Some(Duration::from_secs(60)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), xerosign_core::ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_sign_request_rejects_missing_authority() {
        let ctx = Context::new();
        let signer = RequestSigner::new().with_signer(FixtureSigner);
        let mut req = parts("/api.xro/2.0/Contacts");

        let err = signer
            .sign_request(&ctx, &mut req, Some(&hmac_credential()), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), xerosign_core::ErrorKind::RequestInvalid);
    }
}
