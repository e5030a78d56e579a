use crate::constants::{ACCESS_TOKEN_URL, AUTHORIZE_URL, REQUEST_TOKEN_URL};
use crate::credential::Credential;
use crate::signature::{percent_encode, sign_credential, CryptoTokenSigner, OAuthParams, TokenSign};
use crate::token::TokenPair;
use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::StatusCode;
use std::collections::HashMap;
use std::sync::Arc;
use xerosign_core::{Context, Error, Result};

/// Client for the OAuth 1.0a token-exchange handshake.
///
/// The handshake walks three stages: request an unauthorized request token,
/// send the user to the authorize URL, then trade the authorized request
/// token for an access token. Each call here is stateless — the client never
/// tracks which stage a token pair is in; the caller threads pairs through
/// explicitly, so concurrent exchanges never interfere.
#[derive(Clone, Debug)]
pub struct OAuth10a {
    ctx: Context,
    credential: Credential,
    signer: Arc<dyn TokenSign>,
}

impl OAuth10a {
    /// Create a client using the default cryptographic signer.
    pub fn new(ctx: Context, credential: Credential) -> Self {
        Self::shared(ctx, credential, Arc::new(CryptoTokenSigner))
    }

    /// Create a client with a custom signing capability.
    pub fn with_signer(ctx: Context, credential: Credential, signer: impl TokenSign) -> Self {
        Self::shared(ctx, credential, Arc::new(signer))
    }

    pub(crate) fn shared(
        ctx: Context,
        credential: Credential,
        signer: Arc<dyn TokenSign>,
    ) -> Self {
        Self {
            ctx,
            credential,
            signer,
        }
    }

    /// Request an unauthorized request token from the provider.
    ///
    /// The request is signed with the consumer credentials alone; no token
    /// is in play yet.
    pub async fn request_token(&self) -> Result<TokenPair> {
        self.exchange(REQUEST_TOKEN_URL, None, None).await
    }

    /// Exchange an authorized request token for an access token.
    ///
    /// `verifier` carries the one-time code produced by the user
    /// authorization step. It may be `None` only for flows that skip the
    /// 3-legged callback, which in practice means private apps.
    pub async fn access_token(
        &self,
        request_token: &TokenPair,
        verifier: Option<&str>,
    ) -> Result<TokenPair> {
        self.exchange(ACCESS_TOKEN_URL, Some(request_token), verifier)
            .await
    }

    /// Build the URL the user must visit to authorize a request token.
    ///
    /// Pure and synchronous. The format is a compatibility contract with
    /// the provider; only the token value is percent-escaped.
    pub fn authorize_url(&self, request_token: &str) -> Result<String> {
        if request_token.is_empty() {
            return Err(Error::request_invalid("request token must not be empty"));
        }

        Ok(format!(
            "{AUTHORIZE_URL}?oauth_token={}",
            percent_encode(request_token)
        ))
    }

    async fn exchange(
        &self,
        url: &str,
        token: Option<&TokenPair>,
        verifier: Option<&str>,
    ) -> Result<TokenPair> {
        let cred = &self.credential;

        let mut params = OAuthParams::new(&cred.consumer_key, cred.signature_method);
        if let Some(pair) = token {
            params = params.with_token(&pair.token);
        }
        if let Some(v) = verifier {
            params = params.with_verifier(v);
        }

        let base_string = params.base_string("POST", url, &[]);
        let signature = sign_credential(
            self.signer.as_ref(),
            cred,
            &base_string,
            token.map(|pair| pair.secret.as_str()),
        )?;

        let req = http::Request::post(url)
            .header(AUTHORIZATION, params.authorization_header(&signature))
            .body(Bytes::new())?;

        log::debug!("requesting token from {url}");
        let resp = self.ctx.http_send_as_string(req).await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::authorization_denied(format!(
                "provider rejected the token request: {}",
                resp.body()
            )));
        }
        if !resp.status().is_success() {
            return Err(Error::protocol(format!(
                "token endpoint returned {}: {}",
                resp.status(),
                resp.body()
            )));
        }

        parse_token_response(resp.body())
    }
}

/// Parse a form-encoded token endpoint response into a [`TokenPair`].
fn parse_token_response(body: &str) -> Result<TokenPair> {
    let fields: HashMap<String, String> = form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect();

    let token = fields
        .get("oauth_token")
        .ok_or_else(|| Error::protocol("token response missing oauth_token"))?;
    let secret = fields
        .get("oauth_token_secret")
        .ok_or_else(|| Error::protocol("token response missing oauth_token_secret"))?;

    Ok(TokenPair::new(token, secret))
}
