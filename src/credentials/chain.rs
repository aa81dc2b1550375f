//! Try several credential providers in order.

use super::{AwsCredentials, CredentialProvider};
use crate::credentials::error::CredentialError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Returns the credentials of the first provider that succeeds.
///
/// When every provider fails, the last provider's error is returned.
///
/// # Example
///
/// ```no_run
/// use integrations_aws_ses_classic::credentials::{
///     ChainCredentialProvider, CredentialProvider, EnvironmentCredentialProvider,
///     ProfileCredentialProvider,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let chain = ChainCredentialProvider::new()
///     .with_provider(EnvironmentCredentialProvider::new())
///     .with_provider(ProfileCredentialProvider::with_profile("ses"));
/// assert_eq!(chain.provider_count(), 2);
///
/// let credentials = chain.credentials().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct ChainCredentialProvider {
    providers: Vec<Arc<dyn CredentialProvider + Send + Sync>>,
}

impl ChainCredentialProvider {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider.
    ///
    /// # Arguments
    ///
    /// * `provider` - Tried after every provider already in the chain
    pub fn with_provider<P>(mut self, provider: P) -> Self
    where
        P: CredentialProvider + Send + Sync + 'static,
    {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Append a shared provider.
    pub fn with_arc_provider(mut self, provider: Arc<dyn CredentialProvider + Send + Sync>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Number of providers in the chain.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}

#[async_trait]
impl CredentialProvider for ChainCredentialProvider {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
        let mut last_error = None;

        for (index, provider) in self.providers.iter().enumerate() {
            match provider.credentials().await {
                Ok(credentials) => {
                    debug!(provider = index, "resolved credentials from chain");
                    return Ok(credentials);
                }
                Err(e) => {
                    debug!(provider = index, error = %e, "credential provider failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CredentialError::Missing {
            message: "No credential providers configured in chain".to_string(),
        }))
    }

    fn is_expired(&self) -> bool {
        !self.providers.is_empty() && self.providers.iter().all(|p| p.is_expired())
    }
}

impl fmt::Debug for ChainCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainCredentialProvider")
            .field("provider_count", &self.providers.len())
            .finish()
    }
}
