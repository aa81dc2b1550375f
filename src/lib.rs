//! Amazon SES client for the classic Query API (version 2010-12-01).
//!
//! Type-safe access to sending, identity verification, sending authorization,
//! inbound receipt rules, templates and configuration sets.
//!
//! # Features
//!
//! - **Direct client**: [`SesClient`] sends one signed request and returns a typed result
//! - **Async client**: [`SesAsyncClient`] runs operations on a fixed worker pool with
//!   optional completion handlers
//! - **AWS Signature V4**: request signing with a cached signing key
//! - **Resilience**: retry with exponential backoff, optional client-side rate limiting
//! - **Credential chain**: environment, profile and IMDS credential providers
//! - **Error mapping**: SES error codes become typed [`SesError`] variants
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use integrations_aws_ses_classic::{EmailBuilder, SesClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SesClient::from_env()?;
//!
//!     let request = EmailBuilder::new()
//!         .from("sender@example.com")
//!         .to("recipient@example.com")
//!         .subject("Hello from SES")
//!         .text("This is a test email.")
//!         .build()?;
//!
//!     let result = client.send_email(request).await?;
//!     println!("Message sent! ID: {}", result.message_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! SesAsyncClient ──▶ executor ──▶ SesClient::execute(op)
//!                                    │
//!                                    ├─ SesOperation::validate / serialize  (operations, protocol)
//!                                    ├─ HttpClient::send_request            (http, signing, credentials)
//!                                    └─ FromXml                             (protocol)
//! ```
//!
//! Every operation is a request struct in [`operations`]. The clients and
//! the [`services`] expose one method per operation, all of which go through
//! [`SesClient::execute`].
//!
//! # Asynchronous use
//!
//! ```rust,no_run
//! use integrations_aws_ses_classic::operations::GetSendQuotaRequest;
//! use integrations_aws_ses_classic::{SesAsyncClient, SesConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SesConfig::builder()
//!     .region("us-east-1")
//!     .credentials("AKID", "SECRET")
//!     .max_connections(20)
//!     .build()?;
//! let client = SesAsyncClient::new(config)?;
//!
//! let quota = client.get_send_quota_async(GetSendQuotaRequest).wait()?;
//! println!("{} sends left today", quota.max_24_hour_send - quota.sent_last_24_hours);
//!
//! client.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! ```rust,no_run
//! use integrations_aws_ses_classic::operations::GetTemplateRequest;
//! use integrations_aws_ses_classic::{SesClient, SesError};
//!
//! # async fn example(client: &SesClient) {
//! match client.get_template(GetTemplateRequest::new("welcome")).await {
//!     Ok(result) => println!("{:?}", result.template),
//!     Err(SesError::TemplateNotFound { name, .. }) => println!("no template {}", name),
//!     Err(e) if e.is_retryable() => println!("try again later: {}", e),
//!     Err(e) => println!("failed: {}", e),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod async_client;
pub mod builders;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod operations;
pub mod protocol;
pub mod services;
pub mod signing;
pub mod types;

pub use async_client::{AsyncHandler, CallbackHandler, OperationFuture, SesAsyncClient};
pub use client::{SesClient, SesClientBuilder};

pub use config::{RateLimitConfig, RetryConfig, SesConfig, SesConfigBuilder};

pub use credentials::{
    AwsCredentials, CachedCredentialProvider, ChainCredentialProvider, CredentialError,
    CredentialProvider, DefaultCredentialProvider, EnvironmentCredentialProvider,
    IMDSCredentialProvider, ProfileCredentialProvider, StaticCredentialProvider,
};

pub use error::{SesError, SesResult};

pub use http::{HttpClient, SesHttpClient};

pub use protocol::SesOperation;

pub use builders::{BuilderError, BulkEmailBuilder, EmailBuilder, TemplateBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_exports() {
        let _ = std::any::type_name::<SesError>();
        let _ = std::any::type_name::<SesConfig>();
        let _ = std::any::type_name::<AwsCredentials>();
        let _ = std::any::type_name::<SesAsyncClient>();
        let _ = std::any::type_name::<OperationFuture<operations::SendEmailResult>>();
        let _ = std::any::type_name::<types::ReceiptRule>();
    }

    #[test]
    fn test_clients_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SesClient>();
        assert_send_sync::<SesAsyncClient>();
    }
}
