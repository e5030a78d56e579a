use crate::config::Config;
use crate::credential::Credential;
use async_trait::async_trait;
use xerosign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads Xero credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `XERO_APP_TYPE`: `private`, `public` or `partner`
/// - `XERO_CONSUMER_KEY`: the application's consumer key
/// - `XERO_CONSUMER_SECRET`: the application's consumer secret
/// - `XERO_PRIVATE_KEY_FILE`: path to the RSA private key certificate
///   (private and partner apps only)
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = Config::default().from_env(ctx);
        super::config::resolve(ctx, &config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::signature::SignatureMethod;
    use std::collections::HashMap;
    use xerosign_core::StaticEnv;

    #[tokio::test]
    async fn test_env_credential_provider() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (XERO_APP_TYPE.to_string(), "public".to_string()),
                (XERO_CONSUMER_KEY.to_string(), "env_consumer_key".to_string()),
                (
                    XERO_CONSUMER_SECRET.to_string(),
                    "env_consumer_secret".to_string(),
                ),
            ]),
        });

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(cred.consumer_key, "env_consumer_key");
        assert_eq!(cred.consumer_secret, "env_consumer_secret");
        assert_eq!(cred.signature_method, SignatureMethod::HmacSha1);
    }

    #[tokio::test]
    async fn test_env_credential_provider_without_env() {
        let ctx = Context::new();

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .unwrap();

        assert!(cred.is_none());
    }
}
