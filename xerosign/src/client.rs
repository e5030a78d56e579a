use crate::config::Config;
use crate::credential::Credential;
use crate::oauth10a::OAuth10a;
use crate::provide_credential::{ConfigCredentialProvider, StaticCredentialProvider};
use crate::sign_request::RequestSigner;
use crate::signature::{CryptoTokenSigner, TokenSign};
use std::sync::Arc;
use xerosign_core::{Context, Error, ProvideCredential, Result, Signer};

/// Client is the composition root for a configured Xero application.
///
/// Construction eagerly resolves the configuration into a [`Credential`],
/// so a bad app type or an unreadable certificate surfaces immediately —
/// before any network call. The transport and file-reading capabilities
/// travel inside the [`Context`]; the signing capability can be overridden
/// through [`Client::with_signer`].
#[derive(Clone, Debug)]
pub struct Client {
    credential: Credential,
    oauth10a: OAuth10a,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client with the default cryptographic signer.
    pub async fn new(ctx: Context, config: Config) -> Result<Self> {
        Self::with_signer(ctx, config, CryptoTokenSigner).await
    }

    /// Create a client with a custom token signing capability.
    pub async fn with_signer(
        ctx: Context,
        config: Config,
        signer: impl TokenSign,
    ) -> Result<Self> {
        let signer: Arc<dyn TokenSign> = Arc::new(signer);

        let credential = ConfigCredentialProvider::new(config)
            .provide_credential(&ctx)
            .await?
            .ok_or_else(|| Error::config_invalid("no app type configured"))?;

        let oauth10a = OAuth10a::shared(ctx.clone(), credential.clone(), signer.clone());
        let resource_signer = Signer::new(
            ctx,
            StaticCredentialProvider::new(credential.clone()),
            RequestSigner::new().with_shared_signer(signer),
        );

        Ok(Self {
            credential,
            oauth10a,
            signer: resource_signer,
        })
    }

    /// The resolved credential, exposed read-only for inspection and
    /// testing.
    pub fn state(&self) -> &Credential {
        &self.credential
    }

    /// The OAuth 1.0a token-exchange sub-client.
    pub fn oauth10a(&self) -> &OAuth10a {
        &self.oauth10a
    }

    /// Sign a resource request in place with the application's credential.
    pub async fn sign(&self, req: &mut http::request::Parts) -> Result<()> {
        self.signer.sign(req, None).await
    }
}
