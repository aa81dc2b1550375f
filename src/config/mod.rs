//! Client configuration.
//!
//! [`SesConfig`] carries everything the clients need: region and endpoint,
//! the credential provider, HTTP timeouts, retry and rate limiting policy,
//! and the connection/executor sizing used by the asynchronous client.

use std::sync::Arc;
use std::time::Duration;

pub mod error;
pub mod rate_limit;
pub mod retry;

pub use error::ConfigError;
pub use rate_limit::{RateLimitConfig, RateLimiter};
pub use retry::RetryConfig;

use crate::credentials::{CredentialProvider, DefaultCredentialProvider, StaticCredentialProvider};

/// Default number of concurrent connections, which also sizes the
/// asynchronous client's worker pool.
pub const DEFAULT_MAX_CONNECTIONS: usize = 10;

/// Query API version sent with every request.
pub const API_VERSION: &str = "2010-12-01";

/// Service name used in the SigV4 credential scope.
pub const SIGNING_SERVICE: &str = "ses";

/// Configuration for the SES clients.
#[derive(Clone)]
pub struct SesConfig {
    /// AWS region (e.g., "us-east-1").
    pub region: String,

    /// Custom endpoint URL, e.g. a local SES emulator.
    pub endpoint: Option<String>,

    /// Credential provider for AWS authentication.
    pub credentials_provider: Arc<dyn CredentialProvider + Send + Sync>,

    /// Timeout for the entire request.
    pub timeout: Duration,

    /// Timeout for establishing connections.
    pub connect_timeout: Duration,

    /// Maximum number of retry attempts.
    pub max_retries: u32,

    /// Backoff policy between retries.
    pub retry_config: RetryConfig,

    /// Client-side rate limiting, disabled when `None`.
    pub rate_limit: Option<RateLimitConfig>,

    /// Custom user agent string.
    pub user_agent: Option<String>,

    /// Maximum number of HTTP exchanges in flight at once.
    pub max_connections: usize,

    /// Worker threads for the asynchronous client's executor.
    pub executor_threads: usize,
}

impl std::fmt::Debug for SesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_retries", &self.max_retries)
            .field("rate_limit", &self.rate_limit)
            .field("max_connections", &self.max_connections)
            .field("executor_threads", &self.executor_threads)
            .finish_non_exhaustive()
    }
}

impl SesConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_aws_ses_classic::config::SesConfig;
    ///
    /// let config = SesConfig::builder()
    ///     .region("us-east-1")
    ///     .credentials("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.executor_threads, 10);
    /// ```
    pub fn builder() -> SesConfigBuilder {
        SesConfigBuilder::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads `AWS_REGION` (or `AWS_DEFAULT_REGION`), an optional
    /// `AWS_SES_ENDPOINT` override, and resolves credentials through the
    /// default provider chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use integrations_aws_ses_classic::config::SesConfig;
    ///
    /// // AWS_REGION=us-west-2 AWS_SES_ENDPOINT=http://localhost:4579
    /// let config = SesConfig::from_env().unwrap();
    /// println!("sending through {}", config.ses_endpoint());
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        let region = std::env::var("AWS_REGION")
            .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
            .map_err(|_| ConfigError::Environment {
                message: "AWS_REGION or AWS_DEFAULT_REGION must be set".to_string(),
            })?;

        let mut builder = Self::builder()
            .region(region)
            .credentials_provider(DefaultCredentialProvider::new());

        if let Ok(endpoint) = std::env::var("AWS_SES_ENDPOINT") {
            builder = builder.endpoint(endpoint);
        }

        builder.build()
    }

    /// The SES endpoint URL for this configuration.
    ///
    /// ```
    /// use integrations_aws_ses_classic::config::SesConfig;
    ///
    /// let config = SesConfig::builder()
    ///     .region("eu-west-1")
    ///     .credentials("AKIDEXAMPLE", "secret")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.ses_endpoint(), "https://email.eu-west-1.amazonaws.com");
    /// ```
    pub fn ses_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://email.{}.amazonaws.com", self.region))
    }
}

/// Builder for [`SesConfig`].
#[derive(Default)]
pub struct SesConfigBuilder {
    region: Option<String>,
    endpoint: Option<String>,
    credentials_provider: Option<Arc<dyn CredentialProvider + Send + Sync>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_config: Option<RetryConfig>,
    rate_limit: Option<RateLimitConfig>,
    user_agent: Option<String>,
    max_connections: Option<usize>,
    executor_threads: Option<usize>,
}

impl SesConfigBuilder {
    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Override the endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set a custom credential provider.
    ///
    /// # Arguments
    ///
    /// * `provider` - Resolves credentials before each signed request
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_aws_ses_classic::config::SesConfig;
    /// use integrations_aws_ses_classic::credentials::ProfileCredentialProvider;
    ///
    /// let config = SesConfig::builder()
    ///     .region("us-east-1")
    ///     .credentials_provider(ProfileCredentialProvider::with_profile("mailer"))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn credentials_provider(
        mut self,
        provider: impl CredentialProvider + Send + Sync + 'static,
    ) -> Self {
        self.credentials_provider = Some(Arc::new(provider));
        self
    }

    /// Set a shared credential provider.
    pub fn shared_credentials_provider(
        mut self,
        provider: Arc<dyn CredentialProvider + Send + Sync>,
    ) -> Self {
        self.credentials_provider = Some(provider);
        self
    }

    /// Use static credentials.
    pub fn credentials(self, access_key: &str, secret_key: &str) -> Self {
        self.credentials_provider(StaticCredentialProvider::new(
            access_key.to_string(),
            secret_key.to_string(),
            None,
        ))
    }

    /// Set the request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Set the maximum number of retry attempts.
    ///
    /// Takes precedence over the `max_attempts` of a
    /// [`retry_config`](Self::retry_config), whichever is called first.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the backoff policy.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_aws_ses_classic::config::{RetryConfig, SesConfig};
    ///
    /// let config = SesConfig::builder()
    ///     .region("us-east-1")
    ///     .credentials("AKIDEXAMPLE", "secret")
    ///     .retry_config(RetryConfig::disabled())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.retry_config.max_attempts, 0);
    /// ```
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = Some(config);
        self
    }

    /// Enable client-side rate limiting.
    ///
    /// # Arguments
    ///
    /// * `config` - Token bucket shared by every request from this client
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = Some(config);
        self
    }

    /// Set a custom user agent string.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Cap the number of concurrent HTTP exchanges.
    ///
    /// Unless [`executor_threads`](Self::executor_threads) is set, the
    /// asynchronous client's worker pool is sized to the same value.
    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Size the asynchronous client's worker pool explicitly.
    pub fn executor_threads(mut self, threads: usize) -> Self {
        self.executor_threads = Some(threads);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if the region or credential
    /// provider is not set, and [`ConfigError::Invalid`] for a malformed
    /// endpoint or a zero-sized pool.
    pub fn build(self) -> Result<SesConfig, ConfigError> {
        let region = self.region.ok_or_else(|| ConfigError::MissingField {
            field: "region".to_string(),
        })?;

        let credentials_provider =
            self.credentials_provider
                .ok_or_else(|| ConfigError::MissingField {
                    field: "credentials_provider".to_string(),
                })?;

        if let Some(endpoint) = &self.endpoint {
            url::Url::parse(endpoint).map_err(|e| ConfigError::Invalid {
                message: format!("endpoint '{}' is not a valid URL: {}", endpoint, e),
            })?;
        }

        let max_connections = self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                message: "max_connections must be at least 1".to_string(),
            });
        }

        let executor_threads = self.executor_threads.unwrap_or(max_connections);
        if executor_threads == 0 {
            return Err(ConfigError::Invalid {
                message: "executor_threads must be at least 1".to_string(),
            });
        }

        let mut retry_config = self.retry_config.unwrap_or_default();
        if let Some(max_retries) = self.max_retries {
            retry_config.max_attempts = max_retries;
        }
        let max_retries = retry_config.max_attempts;

        Ok(SesConfig {
            region,
            endpoint: self.endpoint,
            credentials_provider,
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(10)),
            max_retries,
            retry_config,
            rate_limit: self.rate_limit,
            user_agent: self.user_agent,
            max_connections,
            executor_threads,
        })
    }
}
