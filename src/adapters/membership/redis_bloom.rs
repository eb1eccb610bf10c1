//! RedisBloom-backed membership backend for production deployments.
//!
//! Revoked keys live in a single Bloom filter (`BF.ADD` / `BF.EXISTS`)
//! shared by every replica and queried by the API gateway.
//!
//! # Concurrency
//!
//! One `MultiplexedConnection` is opened at startup and shared by all request
//! handlers. The connection is designed for concurrent use: each call clones
//! the handle and commands are pipelined over the same socket, so no lock is
//! held across a round-trip.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::BackendConfig;
use crate::domain::revocation::RevocationKey;
use crate::ports::{BackendError, MembershipBackend};

/// RedisBloom membership backend.
pub struct RedisBloomBackend {
    conn: RwLock<Option<MultiplexedConnection>>,
    filter: String,
    timeout: Duration,
}

impl RedisBloomBackend {
    /// Connects to the backend and makes sure the filter exists.
    ///
    /// The filter is reserved with the configured capacity and error rate;
    /// if another replica created it first the existing filter is used.
    ///
    /// # Errors
    ///
    /// - `ConnectionFailed` if the backend is unreachable within the timeout
    /// - `RequestFailed` if the backend rejects the reservation
    pub async fn connect(config: &BackendConfig) -> Result<Self, BackendError> {
        let timeout = config.timeout();
        let client = redis::Client::open(config.redis_url())
            .map_err(|e| BackendError::connection_failed(e.to_string()))?;

        let conn = with_timeout(timeout, async {
            client
                .get_multiplexed_tokio_connection()
                .await
                .map_err(classify)
        })
        .await?;

        let backend = Self {
            conn: RwLock::new(Some(conn)),
            filter: config.filter_name.clone(),
            timeout,
        };
        backend.reserve(config.capacity, config.error_rate).await?;

        tracing::info!(
            address = %config.address(),
            filter = %backend.filter,
            "Connected to membership backend"
        );

        Ok(backend)
    }

    async fn reserve(&self, capacity: u64, error_rate: f64) -> Result<(), BackendError> {
        let mut conn = self.connection().await?;
        let result = with_timeout(self.timeout, async {
            redis::cmd("BF.RESERVE")
                .arg(&self.filter)
                .arg(error_rate)
                .arg(capacity)
                .query_async::<_, ()>(&mut conn)
                .await
                .map_err(classify)
        })
        .await;

        match result {
            Err(BackendError::RequestFailed(msg)) if is_existing_filter(&msg) => {
                tracing::debug!(filter = %self.filter, "Bloom filter already reserved");
                Ok(())
            }
            other => other,
        }
    }

    async fn connection(&self) -> Result<MultiplexedConnection, BackendError> {
        self.conn
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or_else(BackendError::closed)
    }
}

#[async_trait]
impl MembershipBackend for RedisBloomBackend {
    async fn add(&self, key: &RevocationKey) -> Result<(), BackendError> {
        let mut conn = self.connection().await?;
        // 0 means the key was already present.
        let inserted = with_timeout(self.timeout, async {
            redis::cmd("BF.ADD")
                .arg(&self.filter)
                .arg(key.as_bytes())
                .query_async::<_, i64>(&mut conn)
                .await
                .map_err(classify)
        })
        .await?;

        tracing::trace!(key = %key, inserted = inserted == 1, "BF.ADD");
        Ok(())
    }

    async fn check(&self, key: &RevocationKey) -> Result<bool, BackendError> {
        let mut conn = self.connection().await?;
        let present = with_timeout(self.timeout, async {
            redis::cmd("BF.EXISTS")
                .arg(&self.filter)
                .arg(key.as_bytes())
                .query_async::<_, i64>(&mut conn)
                .await
                .map_err(classify)
        })
        .await?;

        Ok(present == 1)
    }

    async fn close(&self) -> Result<(), BackendError> {
        if self.conn.write().await.take().is_some() {
            tracing::info!(filter = %self.filter, "Closed membership backend connection");
        }
        Ok(())
    }
}

impl std::fmt::Debug for RedisBloomBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBloomBackend")
            .field("filter", &self.filter)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

async fn with_timeout<T, F>(timeout: Duration, fut: F) -> Result<T, BackendError>
where
    F: Future<Output = Result<T, BackendError>>,
{
    tokio::time::timeout(timeout, fut).await.map_err(|_| {
        BackendError::connection_failed(format!("timed out after {}ms", timeout.as_millis()))
    })?
}

/// Maps transport failures to `ConnectionFailed` and server replies to
/// `RequestFailed`.
fn classify(err: redis::RedisError) -> BackendError {
    if err.is_io_error()
        || err.is_timeout()
        || err.is_connection_dropped()
        || err.is_connection_refusal()
    {
        BackendError::connection_failed(err.to_string())
    } else {
        BackendError::request_failed(err.to_string())
    }
}

fn is_existing_filter(message: &str) -> bool {
    message.to_ascii_lowercase().contains("item exists")
}
