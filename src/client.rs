//! The direct SES client.
//!
//! [`SesClient`] serializes a request, performs one signed HTTP exchange and
//! returns the typed result. Every operation is available twice: as a flat
//! method on the client and through the service accessors that group related
//! operations.
//!
//! # Example
//!
//! ```rust,no_run
//! use integrations_aws_ses_classic::builders::EmailBuilder;
//! use integrations_aws_ses_classic::SesClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SesClient::builder()
//!     .region("us-east-1")
//!     .credentials("AKID", "SECRET")
//!     .build()?;
//!
//! let request = EmailBuilder::new()
//!     .from("sender@example.com")
//!     .to("recipient@example.com")
//!     .subject("Hello")
//!     .text("Email body")
//!     .build()?;
//!
//! let result = client.send_email(request).await?;
//! println!("sent {}", result.message_id);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::config::{SesConfig, SesConfigBuilder};
use crate::credentials::CredentialProvider;
use crate::error::SesResult;
use crate::http::{HttpClient, SesHttpClient};
use crate::operations::*;
use crate::protocol::SesOperation;
use crate::services::{
    ConfigurationSetService, EmailService, IdentityService, PolicyService, ReceiptService,
    TemplateService,
};

/// Declares one flat `async fn` per operation on [`SesClient`].
macro_rules! direct_methods {
    ($( $(#[$meta:meta])* $direct:ident, $async_name:ident, $with_handler:ident: $request:ty; )+) => {
        $(
            $(#[$meta])*
            pub async fn $direct(
                &self,
                request: $request,
            ) -> SesResult<<$request as SesOperation>::Output> {
                self.execute(&request).await
            }
        )+
    };
}

/// Client for the SES Query API.
///
/// Cloning is cheap: clones share the HTTP client, its connection pool, the
/// signing-key cache and the credential cache.
///
/// # Example
///
/// ```rust,no_run
/// use integrations_aws_ses_classic::operations::GetSendQuotaRequest;
/// use integrations_aws_ses_classic::SesClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SesClient::from_env()?;
///
/// let quota = client.get_send_quota(GetSendQuotaRequest).await?;
/// println!("{} of {} sent today", quota.sent_last_24_hours, quota.max_24_hour_send);
///
/// // Same call through a service accessor
/// let quota = client.emails().get_send_quota(GetSendQuotaRequest).await?;
/// # let _ = quota;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SesClient {
    config: Arc<SesConfig>,
    http_client: Arc<dyn HttpClient>,
    services: Arc<Services>,
}

#[derive(Default)]
struct Services {
    emails: OnceCell<EmailService>,
    identities: OnceCell<IdentityService>,
    policies: OnceCell<PolicyService>,
    receipt: OnceCell<ReceiptService>,
    templates: OnceCell<TemplateService>,
    configuration_sets: OnceCell<ConfigurationSetService>,
}

impl SesClient {
    /// Create a client over the default HTTPS transport.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Configuration`](crate::error::SesError::Configuration)
    /// if the HTTP client cannot be initialized.
    pub fn new(config: SesConfig) -> SesResult<Self> {
        let http_client = Arc::new(SesHttpClient::new(config.clone())?);
        Ok(Self::with_http_client(config, http_client))
    }

    /// Create a client over a caller-supplied [`HttpClient`].
    pub fn with_http_client(config: SesConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config: Arc::new(config),
            http_client,
            services: Arc::new(Services::default()),
        }
    }

    /// Create a client from `AWS_REGION` and the default credential chain.
    pub fn from_env() -> SesResult<Self> {
        Self::new(SesConfig::from_env()?)
    }

    /// Start building a client.
    pub fn builder() -> SesClientBuilder {
        SesClientBuilder::new()
    }

    /// The client configuration.
    pub fn config(&self) -> &SesConfig {
        &self.config
    }

    /// The HTTP client shared by every service.
    pub fn http_client(&self) -> &Arc<dyn HttpClient> {
        &self.http_client
    }

    /// Run any operation.
    ///
    /// Validates the request, sends it and parses the typed result. All
    /// other methods on this client funnel through here.
    pub async fn execute<O: SesOperation>(&self, operation: &O) -> SesResult<O::Output> {
        crate::protocol::execute(self.http_client.as_ref(), operation).await
    }

    /// Sending, bounces, quota and statistics.
    pub fn emails(&self) -> &EmailService {
        self.services
            .emails
            .get_or_init(|| EmailService::new(self.http_client.clone()))
    }

    /// Identity verification and attributes.
    pub fn identities(&self) -> &IdentityService {
        self.services
            .identities
            .get_or_init(|| IdentityService::new(self.http_client.clone()))
    }

    /// Sending authorization policies.
    pub fn policies(&self) -> &PolicyService {
        self.services
            .policies
            .get_or_init(|| PolicyService::new(self.http_client.clone()))
    }

    /// Receipt filters, rule sets and rules.
    pub fn receipt(&self) -> &ReceiptService {
        self.services
            .receipt
            .get_or_init(|| ReceiptService::new(self.http_client.clone()))
    }

    /// Stored templates.
    pub fn templates(&self) -> &TemplateService {
        self.services
            .templates
            .get_or_init(|| TemplateService::new(self.http_client.clone()))
    }

    /// Configuration sets.
    pub fn configuration_sets(&self) -> &ConfigurationSetService {
        self.services
            .configuration_sets
            .get_or_init(|| ConfigurationSetService::new(self.http_client.clone()))
    }

    crate::operations::for_each_operation!(direct_methods);
}

impl std::fmt::Debug for SesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesClient")
            .field("region", &self.config.region)
            .field("endpoint", &self.config.ses_endpoint())
            .finish_non_exhaustive()
    }
}

/// Builder for [`SesClient`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use integrations_aws_ses_classic::SesClient;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SesClient::builder()
///     .region("eu-west-1")
///     .credentials("AKID", "SECRET")
///     .timeout(Duration::from_secs(10))
///     .max_connections(25)
///     .build()?;
/// # let _ = client;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SesClientBuilder {
    config: Option<SesConfig>,
    config_builder: SesConfigBuilder,
    from_env: bool,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl SesClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a complete configuration. Overrides every other setting.
    pub fn config(mut self, config: SesConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the configuration from the environment at build time.
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.region(region);
        self
    }

    /// Override the endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.endpoint(endpoint);
        self
    }

    /// Use static credentials.
    pub fn credentials(mut self, access_key: &str, secret_key: &str) -> Self {
        self.config_builder = self.config_builder.credentials(access_key, secret_key);
        self
    }

    /// Use a custom credential provider.
    pub fn credentials_provider(
        mut self,
        provider: impl CredentialProvider + Send + Sync + 'static,
    ) -> Self {
        self.config_builder = self.config_builder.credentials_provider(provider);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(duration);
        self
    }

    /// Set the maximum number of retry attempts.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config_builder = self.config_builder.max_retries(retries);
        self
    }

    /// Cap concurrent HTTP exchanges.
    pub fn max_connections(mut self, max: usize) -> Self {
        self.config_builder = self.config_builder.max_connections(max);
        self
    }

    /// Size the asynchronous client's worker pool.
    pub fn executor_threads(mut self, threads: usize) -> Self {
        self.config_builder = self.config_builder.executor_threads(threads);
        self
    }

    /// Send requests through a custom [`HttpClient`].
    pub fn http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Resolve the configuration without creating a client.
    pub fn build_config(self) -> SesResult<SesConfig> {
        if let Some(config) = self.config {
            return Ok(config);
        }
        if self.from_env {
            return Ok(SesConfig::from_env()?);
        }
        Ok(self.config_builder.build()?)
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Configuration`](crate::error::SesError::Configuration)
    /// when the region or credentials are missing, or a value is invalid.
    pub fn build(mut self) -> SesResult<SesClient> {
        let http_client = self.http_client.take();
        let config = self.build_config()?;
        match http_client {
            Some(http_client) => Ok(SesClient::with_http_client(config, http_client)),
            None => SesClient::new(config),
        }
    }
}

impl std::fmt::Debug for SesClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesClientBuilder")
            .field("config", &self.config)
            .field("from_env", &self.from_env)
            .field("custom_http_client", &self.http_client.is_some())
            .finish_non_exhaustive()
    }
}
