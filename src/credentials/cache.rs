//! Memoize another credential provider.

use super::{AwsCredentials, CredentialProvider};
use crate::credentials::error::CredentialError;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(900);

const DEFAULT_REFRESH_BUFFER_SECS: i64 = 300;

#[derive(Clone)]
struct CachedEntry {
    credentials: AwsCredentials,
    cache_expiration: DateTime<Utc>,
}

impl CachedEntry {
    fn is_fresh(&self, buffer: ChronoDuration) -> bool {
        Utc::now() < self.cache_expiration && !self.credentials.expires_within(buffer)
    }
}

/// Caches credentials for a TTL, refreshing early when the underlying
/// credentials are about to expire.
///
/// # Example
///
/// ```no_run
/// use integrations_aws_ses_classic::credentials::{
///     CachedCredentialProvider, CredentialProvider, EnvironmentCredentialProvider,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let cached = CachedCredentialProvider::new(EnvironmentCredentialProvider::new());
///
/// // Fetched from the environment.
/// let first = cached.credentials().await?;
/// // Served from the cache until the TTL runs out.
/// let second = cached.credentials().await?;
/// # Ok(())
/// # }
/// ```
pub struct CachedCredentialProvider<P>
where
    P: CredentialProvider,
{
    inner: P,
    cache: Arc<RwLock<Option<CachedEntry>>>,
    cache_ttl: Duration,
    refresh_buffer: ChronoDuration,
}

impl<P> CachedCredentialProvider<P>
where
    P: CredentialProvider,
{
    /// Cache with the default 15 minute TTL.
    pub fn new(provider: P) -> Self {
        Self::with_ttl(provider, DEFAULT_CACHE_TTL)
    }

    /// Cache with a custom TTL.
    ///
    /// # Arguments
    ///
    /// * `provider` - The provider to memoize
    /// * `ttl` - How long a fetched credential set is reused
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_aws_ses_classic::credentials::{CachedCredentialProvider, EnvironmentCredentialProvider};
    /// use std::time::Duration;
    ///
    /// let cached = CachedCredentialProvider::with_ttl(
    ///     EnvironmentCredentialProvider::new(),
    ///     Duration::from_secs(600),
    /// );
    /// ```
    pub fn with_ttl(provider: P, ttl: Duration) -> Self {
        Self {
            inner: provider,
            cache: Arc::new(RwLock::new(None)),
            cache_ttl: ttl,
            refresh_buffer: ChronoDuration::seconds(DEFAULT_REFRESH_BUFFER_SECS),
        }
    }

    /// Refresh credentials this long before they expire.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Margin before the credentials' own expiration time
    pub fn with_refresh_buffer(mut self, buffer: ChronoDuration) -> Self {
        self.refresh_buffer = buffer;
        self
    }

    /// Drop any cached credentials.
    pub async fn clear_cache(&self) {
        *self.cache.write().await = None;
    }

    async fn fetch_and_cache(&self) -> Result<AwsCredentials, CredentialError> {
        let credentials = self.inner.credentials().await?;

        let ttl = ChronoDuration::from_std(self.cache_ttl)
            .unwrap_or_else(|_| ChronoDuration::seconds(DEFAULT_CACHE_TTL.as_secs() as i64));
        let ttl_expiration = Utc::now() + ttl;
        let cache_expiration = match credentials.expiration() {
            Some(expiration) => (*expiration).min(ttl_expiration),
            None => ttl_expiration,
        };

        debug!(expires = %cache_expiration, "caching credentials");
        *self.cache.write().await = Some(CachedEntry {
            credentials: credentials.clone(),
            cache_expiration,
        });

        Ok(credentials)
    }
}

impl<P> Clone for CachedCredentialProvider<P>
where
    P: CredentialProvider + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            cache: Arc::clone(&self.cache),
            cache_ttl: self.cache_ttl,
            refresh_buffer: self.refresh_buffer,
        }
    }
}

#[async_trait]
impl<P> CredentialProvider for CachedCredentialProvider<P>
where
    P: CredentialProvider,
{
    async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
        if let Some(entry) = self.cache.read().await.as_ref() {
            if entry.is_fresh(self.refresh_buffer) {
                return Ok(entry.credentials.clone());
            }
        }

        self.fetch_and_cache().await
    }

    fn is_expired(&self) -> bool {
        match self.cache.try_read() {
            Ok(cache) => cache
                .as_ref()
                .map_or(false, |entry| !entry.is_fresh(self.refresh_buffer)),
            Err(_) => false,
        }
    }
}

impl<P> fmt::Debug for CachedCredentialProvider<P>
where
    P: CredentialProvider + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedCredentialProvider")
            .field("inner", &self.inner)
            .field("cache_ttl", &self.cache_ttl)
            .field("refresh_buffer", &self.refresh_buffer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
        lifetime: Option<ChronoDuration>,
    }

    #[async_trait]
    impl CredentialProvider for CountingProvider {
        async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let creds = AwsCredentials::new(format!("AKID{}", n), "SECRET");
            Ok(match self.lifetime {
                Some(lifetime) => creds.with_expiration(Utc::now() + lifetime),
                None => creds,
            })
        }
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let cached = CachedCredentialProvider::new(CountingProvider::default());

        assert_eq!(cached.credentials().await.unwrap().access_key_id(), "AKID0");
        assert_eq!(cached.credentials().await.unwrap().access_key_id(), "AKID0");
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ttl_expiry_refetches() {
        let cached =
            CachedCredentialProvider::with_ttl(CountingProvider::default(), Duration::from_millis(50));

        cached.credentials().await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(cached.credentials().await.unwrap().access_key_id(), "AKID1");
    }

    #[tokio::test]
    async fn test_soon_expiring_credentials_are_refreshed() {
        let provider = CountingProvider {
            lifetime: Some(ChronoDuration::seconds(60)),
            ..Default::default()
        };
        // 60s lifetime is inside the default 300s refresh buffer.
        let cached = CachedCredentialProvider::new(provider);

        cached.credentials().await.unwrap();
        cached.credentials().await.unwrap();
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let cached = CachedCredentialProvider::new(CountingProvider::default());
        cached.credentials().await.unwrap();
        cached.clear_cache().await;
        assert_eq!(cached.credentials().await.unwrap().access_key_id(), "AKID1");
    }
}
