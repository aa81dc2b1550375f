//! AWS credential resolution.
//!
//! A [`CredentialProvider`] produces [`AwsCredentials`] for request signing.
//! Providers are composable:
//!
//! - [`StaticCredentialProvider`]: fixed keys
//! - [`EnvironmentCredentialProvider`]: `AWS_ACCESS_KEY_ID` and friends
//! - [`ProfileCredentialProvider`]: `~/.aws/credentials` and `~/.aws/config`
//! - [`IMDSCredentialProvider`]: EC2 instance metadata
//! - [`ChainCredentialProvider`]: first provider that succeeds
//! - [`CachedCredentialProvider`]: memoizes another provider
//!
//! [`DefaultCredentialProvider`] is a cached chain of environment, profile
//! and IMDS, in that order.
//!
//! # Example
//!
//! ```no_run
//! use integrations_aws_ses_classic::credentials::{CredentialProvider, DefaultCredentialProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = DefaultCredentialProvider::new();
//! let credentials = provider.credentials().await?;
//! println!("Access Key: {}", credentials.access_key_id());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use zeroize::Zeroize;

pub mod cache;
pub mod chain;
pub mod env;
pub mod error;
pub mod imds;
pub mod profile;
pub mod static_creds;

pub use cache::CachedCredentialProvider;
pub use chain::ChainCredentialProvider;
pub use env::EnvironmentCredentialProvider;
pub use error::CredentialError;
pub use imds::IMDSCredentialProvider;
pub use profile::ProfileCredentialProvider;
pub use static_creds::StaticCredentialProvider;

/// A set of AWS credentials.
///
/// The secret key is held in a [`SecretString`]; the access key and session
/// token are zeroed on drop. `Debug` output redacts both secrets.
#[derive(Clone)]
pub struct AwsCredentials {
    access_key_id: String,
    secret_access_key: SecretString,
    session_token: Option<String>,
    expiration: Option<DateTime<Utc>>,
}

impl AwsCredentials {
    /// Create long-term credentials.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: SecretString::new(secret_access_key.into()),
            session_token: None,
            expiration: None,
        }
    }

    /// Attach an STS session token.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Attach an expiration time.
    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// The access key ID.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// The secret access key.
    pub fn secret_access_key(&self) -> &str {
        self.secret_access_key.expose_secret()
    }

    /// The session token, for temporary credentials.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// When these credentials stop being valid.
    pub fn expiration(&self) -> Option<&DateTime<Utc>> {
        self.expiration.as_ref()
    }

    /// Whether the expiration time has passed.
    pub fn is_expired(&self) -> bool {
        self.expiration.map_or(false, |exp| Utc::now() >= exp)
    }

    /// Whether the credentials expire within `within` from now.
    pub fn expires_within(&self, within: chrono::Duration) -> bool {
        self.expiration.map_or(false, |exp| Utc::now() + within >= exp)
    }
}

impl Drop for AwsCredentials {
    fn drop(&mut self) {
        self.access_key_id.zeroize();
        if let Some(token) = self.session_token.as_mut() {
            token.zeroize();
        }
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Source of AWS credentials.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Resolve credentials.
    async fn credentials(&self) -> Result<AwsCredentials, CredentialError>;

    /// Whether previously returned credentials are known to be stale.
    fn is_expired(&self) -> bool {
        false
    }
}

/// Environment, then profile files, then IMDS; results are cached.
#[derive(Debug, Clone)]
pub struct DefaultCredentialProvider {
    inner: CachedCredentialProvider<ChainCredentialProvider>,
}

impl DefaultCredentialProvider {
    /// Create the default chain with the default cache TTL.
    pub fn new() -> Self {
        Self {
            inner: CachedCredentialProvider::new(Self::chain()),
        }
    }

    /// Create the default chain with a custom cache TTL.
    pub fn with_cache_ttl(ttl: std::time::Duration) -> Self {
        Self {
            inner: CachedCredentialProvider::with_ttl(Self::chain(), ttl),
        }
    }

    fn chain() -> ChainCredentialProvider {
        ChainCredentialProvider::new()
            .with_provider(EnvironmentCredentialProvider::new())
            .with_provider(ProfileCredentialProvider::new())
            .with_provider(IMDSCredentialProvider::new())
    }
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for DefaultCredentialProvider {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
        self.inner.credentials().await
    }

    fn is_expired(&self) -> bool {
        self.inner.is_expired()
    }
}
