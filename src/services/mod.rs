//! Operation groups over a shared [`HttpClient`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        SesClient                          │
//! └──────────────────────────┬───────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │              Services (this module)                       │
//! │  - emails: sending, bounces, quota and statistics         │
//! │  - identities: verification, DKIM, MAIL FROM, feedback    │
//! │  - policies: sending authorization                        │
//! │  - receipt: IP filters, rule sets and rules               │
//! │  - templates: stored templates                            │
//! │  - configuration_sets: configuration sets                 │
//! └──────────────────────────┬───────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                      HttpClient                           │
//! │  (signing, retry, rate limiting)                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use integrations_aws_ses_classic::config::SesConfig;
//! use integrations_aws_ses_classic::http::SesHttpClient;
//! use integrations_aws_ses_classic::operations::ListIdentitiesRequest;
//! use integrations_aws_ses_classic::services::IdentityService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SesConfig::builder()
//!     .region("us-east-1")
//!     .credentials("access_key", "secret_key")
//!     .build()?;
//!
//! let identities = IdentityService::new(Arc::new(SesHttpClient::new(config)?));
//! let page = identities.list_identities(ListIdentitiesRequest::new()).await?;
//! println!("{:?}", page.identities);
//! # Ok(())
//! # }
//! ```

/// Declares one `async fn` per operation, each running through
/// [`crate::protocol::execute`].
macro_rules! service_operations {
    ($( $(#[$meta:meta])* $method:ident($request:ty); )+) => {
        $(
            $(#[$meta])*
            pub async fn $method(
                &self,
                request: $request,
            ) -> crate::error::SesResult<<$request as crate::protocol::SesOperation>::Output> {
                crate::protocol::execute(self.http_client.as_ref(), &request).await
            }
        )+
    };
}

/// Declares a service struct holding the shared HTTP client.
macro_rules! service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            http_client: std::sync::Arc<dyn crate::http::HttpClient>,
        }

        impl $name {
            /// Create the service over `http_client`.
            pub fn new(http_client: std::sync::Arc<dyn crate::http::HttpClient>) -> Self {
                Self { http_client }
            }
        }

        impl crate::services::SesService for $name {
            fn http_client(&self) -> &std::sync::Arc<dyn crate::http::HttpClient> {
                &self.http_client
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

pub mod configuration_sets;
pub mod emails;
pub mod identities;
pub mod policies;
pub mod receipt;
pub mod templates;

pub use configuration_sets::ConfigurationSetService;
pub use emails::EmailService;
pub use identities::IdentityService;
pub use policies::PolicyService;
pub use receipt::ReceiptService;
pub use templates::TemplateService;

use std::sync::Arc;

use crate::http::HttpClient;

/// Common access to the HTTP client behind a service.
pub trait SesService: Send + Sync {
    /// The shared HTTP client.
    fn http_client(&self) -> &Arc<dyn HttpClient>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_share_client() {
        let http = test_support::unused();
        let emails = EmailService::new(http.clone());
        let receipt = ReceiptService::new(http.clone());
        assert!(Arc::ptr_eq(emails.http_client(), receipt.http_client()));
        assert_eq!(Arc::strong_count(&http), 3);
    }
}
