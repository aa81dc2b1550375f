//! Wire transport.

use async_trait::async_trait;
use reqwest::{Client, Request};
use std::sync::Arc;
use std::time::Duration;

use super::pool::{ConnectionPool, PoolConfig};
use super::response::SesResponse;
use crate::error::{SesError, SesResult};

/// Sends fully built requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and read the response to the end.
    async fn send(&self, request: Request) -> SesResult<SesResponse>;
}

/// reqwest transport bounded by a [`ConnectionPool`].
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    pool: Arc<ConnectionPool>,
}

impl ReqwestTransport {
    /// Transport with the default pool.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> SesResult<Self> {
        Self::with_pool_config(timeout, connect_timeout, PoolConfig::default())
    }

    /// Transport with an explicit pool configuration.
    pub fn with_pool_config(
        timeout: Duration,
        connect_timeout: Duration,
        pool_config: PoolConfig,
    ) -> SesResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .pool_idle_timeout(pool_config.idle_timeout)
            .pool_max_idle_per_host(pool_config.max_connections)
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .build()
            .map_err(|e| SesError::Transport {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
                retryable: false,
            })?;

        Ok(Self {
            client,
            pool: Arc::new(ConnectionPool::new(pool_config)),
        })
    }

    /// The slot pool.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> SesResult<SesResponse> {
        // The slot covers the body as well as the headers.
        let _slot = self.pool.acquire().await?;
        let response = self.client.execute(request).await?;
        SesResponse::from_reqwest(response).await
    }
}
