use crate::{Context, ProvideCredential, Result};
use async_trait::async_trait;
use std::fmt::{self, Debug};

/// A chain of credential providers that will be tried in order.
///
/// The first provider that returns a credential wins. Providers that fail
/// are logged and skipped rather than aborting the chain.
pub struct ProvideCredentialChain<C> {
    providers: Vec<Box<dyn ProvideCredential<Credential = C>>>,
}

impl<C: Send + Sync + Unpin + 'static> ProvideCredentialChain<C> {
    /// Create a new empty credential provider chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a credential provider to the end of the chain.
    pub fn push(mut self, provider: impl ProvideCredential<Credential = C> + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Add a credential provider to the front of the chain.
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = C> + 'static,
    ) -> Self {
        self.providers.insert(0, Box::new(provider));
        self
    }

    /// Create a credential provider chain from a vector of providers.
    pub fn from_vec(providers: Vec<Box<dyn ProvideCredential<Credential = C>>>) -> Self {
        Self { providers }
    }
}

impl<C: Send + Sync + Unpin + 'static> Default for ProvideCredentialChain<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Debug for ProvideCredentialChain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideCredentialChain")
            .field("providers_count", &self.providers.len())
            .finish()
    }
}

#[async_trait]
impl<C: Send + Sync + Unpin + 'static> ProvideCredential for ProvideCredentialChain<C> {
    type Credential = C;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        for provider in &self.providers {
            log::debug!("trying credential provider: {provider:?}");

            match provider.provide_credential(ctx).await {
                Ok(Some(cred)) => {
                    log::debug!("loaded credential from provider: {provider:?}");
                    return Ok(Some(cred));
                }
                Ok(None) => {
                    log::debug!("no credential found in provider: {provider:?}");
                    continue;
                }
                Err(e) => {
                    log::warn!("credential provider {provider:?} failed: {e:?}");
                    continue;
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Clone, Debug)]
    struct TestCredential {
        value: String,
    }

    struct MockSuccessProvider {
        value: String,
    }

    #[async_trait]
    impl ProvideCredential for MockSuccessProvider {
        type Credential = TestCredential;

        async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
            Ok(Some(TestCredential {
                value: self.value.clone(),
            }))
        }
    }

    impl Debug for MockSuccessProvider {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("MockSuccessProvider").finish()
        }
    }

    struct MockFailProvider;

    #[async_trait]
    impl ProvideCredential for MockFailProvider {
        type Credential = TestCredential;

        async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
            Err(Error::unexpected("mock provider failed"))
        }
    }

    impl Debug for MockFailProvider {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("MockFailProvider").finish()
        }
    }

    struct MockEmptyProvider;

    #[async_trait]
    impl ProvideCredential for MockEmptyProvider {
        type Credential = TestCredential;

        async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
            Ok(None)
        }
    }

    impl Debug for MockEmptyProvider {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("MockEmptyProvider").finish()
        }
    }

    #[tokio::test]
    async fn test_chain_returns_first_success() {
        let ctx = Context::new();

        let chain = ProvideCredentialChain::new()
            .push(MockFailProvider)
            .push(MockEmptyProvider)
            .push(MockSuccessProvider {
                value: "first".to_string(),
            })
            .push(MockSuccessProvider {
                value: "should_not_be_used".to_string(),
            });

        let result = chain.provide_credential(&ctx).await.unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().value, "first");
    }

    #[tokio::test]
    async fn test_chain_returns_none_when_all_fail() {
        let ctx = Context::new();

        let chain = ProvideCredentialChain::new()
            .push(MockFailProvider)
            .push(MockEmptyProvider)
            .push(MockFailProvider);

        let result = chain.provide_credential(&ctx).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_empty_chain_returns_none() {
        let ctx = Context::new();

        let chain: ProvideCredentialChain<TestCredential> = ProvideCredentialChain::new();

        let result = chain.provide_credential(&ctx).await.unwrap();
        assert!(result.is_none());
    }
}
