use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Signer is the main struct used to sign the request.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = C>>,
    builder: Arc<dyn SignRequest<Credential = C>>,
    credential: Arc<Mutex<Option<C>>>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Self {
        Self {
            ctx,
            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Signing request.
    pub async fn sign(
        &self,
        req: &mut http::request::Parts,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let cred = self.credential.lock().expect("lock poisoned").clone();
        let cred = if cred.is_valid() {
            cred
        } else {
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        self.builder
            .sign_request(&self.ctx, req, cred.as_ref(), expires_in)
            .await
    }
}
