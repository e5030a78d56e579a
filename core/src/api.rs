use crate::{Context, Result};
use std::fmt::Debug;
use std::time::Duration;

/// SigningCredential is the trait used by the signer as its signing key.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is still usable for signing.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential is the trait used by the signer to load a credential
/// from its environment.
///
/// Implementations decide where the credential comes from: explicit
/// configuration, environment variables, or a file on disk.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load a credential from the current environment.
    ///
    /// Returns `Ok(None)` when this provider has nothing to offer, so a
    /// chain can move on to the next provider.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest is the trait used by the signer to sign the request.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this builder.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request in place.
    ///
    /// ## Expires In
    ///
    /// The `expires_in` parameter specifies the expiration time for the
    /// result. If the signer does not support expiration, it should return
    /// an error.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()>;
}
