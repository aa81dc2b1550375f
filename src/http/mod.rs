//! HTTP layer for the SES Query API.
//!
//! ```text
//! ┌─────────────────┐
//! │  SesHttpClient  │  rate limit, credentials, SigV4, retry
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │ ReqwestTransport│  ConnectionPool caps in-flight requests
//! └────────┬────────┘
//!          ▼
//!       reqwest
//! ```

mod client;
mod pool;
mod request;
mod response;
mod transport;

pub use client::SesHttpClient;
pub use pool::{ConnectionPool, PoolConfig, PoolSlot, PoolStats};
pub use request::{SesRequest, FORM_CONTENT_TYPE, INVOCATION_ID_HEADER};
pub use response::SesResponse;
pub use transport::{ReqwestTransport, Transport};

use crate::error::SesResult;
use async_trait::async_trait;

/// Sends SES requests and returns successful responses.
///
/// Implementations turn non-2xx answers into [`crate::error::SesError`]s, so
/// callers only ever see success bodies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send one request, retrying as configured.
    async fn send_request(&self, request: SesRequest) -> SesResult<SesResponse>;
}
