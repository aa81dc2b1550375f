//! EC2 instance metadata (IMDS) credentials.
//!
//! Uses IMDSv2 session tokens when the service hands one out and falls back
//! to IMDSv1 requests otherwise. Setting `AWS_EC2_METADATA_DISABLED=true`
//! turns the provider off.

use super::{AwsCredentials, CredentialProvider};
use crate::credentials::error::CredentialError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

const IMDS_ENDPOINT: &str = "http://169.254.169.254";
const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";
const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";
const TOKEN_TTL_SECS: i64 = 21_600;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Disables the provider when set to `true`.
pub const AWS_EC2_METADATA_DISABLED: &str = "AWS_EC2_METADATA_DISABLED";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ImdsCredentials {
    access_key_id: String,
    secret_access_key: String,
    token: String,
    expiration: String,
}

#[derive(Clone)]
struct ImdsToken {
    value: String,
    expiration: DateTime<Utc>,
}

/// Fetches role credentials from the instance metadata service.
#[derive(Clone)]
pub struct IMDSCredentialProvider {
    client: Client,
    endpoint: String,
    token_cache: Arc<RwLock<Option<ImdsToken>>>,
}

impl IMDSCredentialProvider {
    /// Use the standard link-local endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(IMDS_ENDPOINT)
    }

    /// Use a custom endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL of the metadata service, without the `/latest` path
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_aws_ses_classic::credentials::IMDSCredentialProvider;
    /// use std::time::Duration;
    ///
    /// let provider = IMDSCredentialProvider::with_endpoint("http://[fd00:ec2::254]")
    ///     .with_timeout(Duration::from_millis(500));
    /// ```
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Self::http_client(DEFAULT_TIMEOUT),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Self::http_client(timeout);
        self
    }

    fn http_client(timeout: Duration) -> Client {
        Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/latest/{}", self.endpoint, path)
    }

    /// IMDSv2 session token, or `None` to fall back to IMDSv1.
    async fn session_token(&self) -> Option<String> {
        if let Some(token) = self.token_cache.read().await.as_ref() {
            if Utc::now() + chrono::Duration::seconds(60) < token.expiration {
                return Some(token.value.clone());
            }
        }

        let response = self
            .client
            .put(self.url("api/token"))
            .header(TOKEN_TTL_HEADER, TOKEN_TTL_SECS.to_string())
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            debug!(status = %response.status(), "IMDSv2 token unavailable, using IMDSv1");
            return None;
        }
        let value = response.text().await.ok()?;

        *self.token_cache.write().await = Some(ImdsToken {
            value: value.clone(),
            expiration: Utc::now() + chrono::Duration::seconds(TOKEN_TTL_SECS),
        });
        Some(value)
    }

    async fn get(&self, path: &str, token: Option<&str>) -> Result<reqwest::Response, CredentialError> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().await.map_err(|e| CredentialError::ImdsError {
            message: format!("request to {} failed: {}", path, e),
        })?;

        if !response.status().is_success() {
            return Err(CredentialError::ImdsError {
                message: format!("IMDS returned status {} for {}", response.status(), path),
            });
        }
        Ok(response)
    }

    async fn role_name(&self, token: Option<&str>) -> Result<String, CredentialError> {
        let body = self
            .get("meta-data/iam/security-credentials/", token)
            .await?
            .text()
            .await
            .map_err(|e| CredentialError::ImdsError {
                message: format!("failed to read IAM role: {}", e),
            })?;

        body.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| CredentialError::ImdsError {
                message: "no IAM role attached to instance".to_string(),
            })
    }

    async fn role_credentials(&self, role: &str, token: Option<&str>) -> Result<AwsCredentials, CredentialError> {
        let path = format!("meta-data/iam/security-credentials/{}", role);
        let creds: ImdsCredentials = self
            .get(&path, token)
            .await?
            .json()
            .await
            .map_err(|e| CredentialError::ImdsError {
                message: format!("malformed credentials document: {}", e),
            })?;

        let expiration = DateTime::parse_from_rfc3339(&creds.expiration)
            .map_err(|e| CredentialError::ImdsError {
                message: format!("invalid expiration '{}': {}", creds.expiration, e),
            })?
            .with_timezone(&Utc);

        Ok(AwsCredentials::new(creds.access_key_id, creds.secret_access_key)
            .with_session_token(creds.token)
            .with_expiration(expiration))
    }
}

impl Default for IMDSCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IMDSCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IMDSCredentialProvider")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl CredentialProvider for IMDSCredentialProvider {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
        if std::env::var(AWS_EC2_METADATA_DISABLED)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
        {
            return Err(CredentialError::Missing {
                message: format!("IMDS disabled by {}", AWS_EC2_METADATA_DISABLED),
            });
        }

        let token = self.session_token().await;
        let result = async {
            let role = self.role_name(token.as_deref()).await?;
            self.role_credentials(&role, token.as_deref()).await
        }
        .await;

        if let Err(e) = &result {
            warn!(error = %e, "failed to load credentials from IMDS");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CREDS_JSON: &str = r#"{
        "Code": "Success",
        "AccessKeyId": "ASIAIMDS",
        "SecretAccessKey": "imds-secret",
        "Token": "imds-session",
        "Expiration": "2099-01-01T00:00:00Z"
    }"#;

    #[tokio::test]
    async fn test_imdsv2_flow() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/latest/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("tok"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/latest/meta-data/iam/security-credentials/"))
            .and(header(TOKEN_HEADER, "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("mail-sender\n"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/latest/meta-data/iam/security-credentials/mail-sender"))
            .and(header(TOKEN_HEADER, "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CREDS_JSON))
            .mount(&server)
            .await;

        let provider = IMDSCredentialProvider::with_endpoint(server.uri());
        let creds = provider.credentials().await.unwrap();

        assert_eq!(creds.access_key_id(), "ASIAIMDS");
        assert_eq!(creds.session_token(), Some("imds-session"));
        assert!(creds.expiration().is_some());
    }

    #[tokio::test]
    async fn test_falls_back_to_imdsv1() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/latest/api/token"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/latest/meta-data/iam/security-credentials/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("role"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/latest/meta-data/iam/security-credentials/role"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CREDS_JSON))
            .mount(&server)
            .await;

        let provider = IMDSCredentialProvider::with_endpoint(server.uri());
        assert_eq!(provider.credentials().await.unwrap().access_key_id(), "ASIAIMDS");
    }

    #[tokio::test]
    async fn test_missing_role_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest/meta-data/iam/security-credentials/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = IMDSCredentialProvider::with_endpoint(server.uri());
        assert!(matches!(
            provider.credentials().await,
            Err(CredentialError::ImdsError { .. })
        ));
    }
}
