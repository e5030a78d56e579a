use crate::provide_credential::{ConfigCredentialProvider, EnvCredentialProvider};
use crate::Credential;
use async_trait::async_trait;
use xerosign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider is a loader that will try to load credentials
/// via the default chain.
///
/// Resolution order:
///
/// 1. Explicit configuration
/// 2. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` reading from the environment.
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create a provider that tries the explicit config before the
    /// environment.
    pub fn from_config(config: crate::Config) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(ConfigCredentialProvider::new(config))
            .push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the chain.
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
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
    async fn test_default_loader_without_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::new(),
        });

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx).await.unwrap();

        assert!(credential.is_none());
    }

    #[tokio::test]
    async fn test_default_loader_with_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (XERO_APP_TYPE.to_string(), "public".to_string()),
                (XERO_CONSUMER_KEY.to_string(), "consumer_key".to_string()),
                (XERO_CONSUMER_SECRET.to_string(), "consumer_secret".to_string()),
            ]),
        });

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx).await.unwrap().unwrap();

        assert_eq!("consumer_key", credential.consumer_key);
        assert_eq!("consumer_secret", credential.consumer_secret);
        assert_eq!(SignatureMethod::HmacSha1, credential.signature_method);
    }

    #[tokio::test]
    async fn test_config_wins_over_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (XERO_APP_TYPE.to_string(), "public".to_string()),
                (XERO_CONSUMER_KEY.to_string(), "env_key".to_string()),
                (XERO_CONSUMER_SECRET.to_string(), "env_secret".to_string()),
            ]),
        });

        let config = crate::Config {
            app_type: Some("public".to_string()),
            consumer_key: Some("config_key".to_string()),
            consumer_secret: Some("config_secret".to_string()),
            ..Default::default()
        };

        let loader = DefaultCredentialProvider::from_config(config);
        let credential = loader.provide_credential(&ctx).await.unwrap().unwrap();

        assert_eq!("config_key", credential.consumer_key);
    }
}
