//! Caps concurrent HTTP exchanges.
//!
//! reqwest keeps its own keep-alive pool; [`ConnectionPool`] adds a semaphore
//! so no more than `max_connections` requests are on the wire at once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::DEFAULT_MAX_CONNECTIONS;
use crate::error::{SesError, SesResult};

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum concurrent requests, also the idle connections kept per host.
    pub max_connections: usize,

    /// How long an idle connection may stay open.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            idle_timeout: Duration::from_secs(90),
        }
    }
}

/// Semaphore-bounded slot pool.
///
/// ```rust
/// use integrations_aws_ses_classic::http::{ConnectionPool, PoolConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = ConnectionPool::new(PoolConfig { max_connections: 2, ..Default::default() });
/// let slot = pool.acquire().await?;
/// assert_eq!(pool.active_connections(), 1);
/// drop(slot);
/// assert_eq!(pool.active_connections(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConnectionPool {
    config: PoolConfig,
    semaphore: Arc<Semaphore>,
    active: Arc<AtomicUsize>,
    total_acquired: AtomicUsize,
}

/// A held slot. Released on drop.
#[derive(Debug)]
pub struct PoolSlot {
    _permit: OwnedSemaphorePermit,
    active: Arc<AtomicUsize>,
}

impl Drop for PoolSlot {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Point-in-time pool counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Configured maximum.
    pub max_connections: usize,
    /// Slots currently held.
    pub active: usize,
    /// Slots free right now.
    pub available: usize,
    /// Slots handed out since creation.
    pub total_acquired: usize,
}

impl PoolStats {
    /// Fraction of slots in use.
    pub fn utilization(&self) -> f64 {
        if self.max_connections == 0 {
            0.0
        } else {
            self.active as f64 / self.max_connections as f64
        }
    }
}

impl ConnectionPool {
    /// Create a pool. A zero maximum is raised to one.
    pub fn new(config: PoolConfig) -> Self {
        let max = config.max_connections.max(1);
        Self {
            config: PoolConfig {
                max_connections: max,
                ..config
            },
            semaphore: Arc::new(Semaphore::new(max)),
            active: Arc::new(AtomicUsize::new(0)),
            total_acquired: AtomicUsize::new(0),
        }
    }

    /// Wait for a free slot.
    pub async fn acquire(&self) -> SesResult<PoolSlot> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| SesError::Transport {
                message: format!("Connection pool closed: {}", e),
                source: None,
                retryable: false,
            })?;

        self.active.fetch_add(1, Ordering::Relaxed);
        self.total_acquired.fetch_add(1, Ordering::Relaxed);

        Ok(PoolSlot {
            _permit: permit,
            active: Arc::clone(&self.active),
        })
    }

    /// Pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Slots currently held.
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }

    /// Counters snapshot.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            max_connections: self.config.max_connections,
            active: self.active_connections(),
            available: self.semaphore.available_permits(),
            total_acquired: self.total_acquired.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_slots_are_bounded() {
        let pool = Arc::new(ConnectionPool::new(PoolConfig {
            max_connections: 1,
            ..Default::default()
        }));

        let first = pool.acquire().await.unwrap();
        assert_eq!(pool.stats().available, 0);

        let waiter = {
            let pool = Arc::clone(&pool);
            tokio::spawn(async move { pool.acquire().await.map(|_| ()) })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(first);
        waiter.await.unwrap().unwrap();

        let stats = pool.stats();
        assert_eq!(stats.active, 0);
        assert_eq!(stats.total_acquired, 2);
    }

    #[test]
    fn test_zero_max_is_raised() {
        let pool = ConnectionPool::new(PoolConfig {
            max_connections: 0,
            ..Default::default()
        });
        assert_eq!(pool.config().max_connections, 1);
        assert_eq!(pool.stats().utilization(), 0.0);
    }
}
