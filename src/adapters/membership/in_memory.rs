//! In-memory Bloom filter backend for development and tests.
//!
//! Keeps the filter inside the process, so revocations are not shared
//! between replicas or with the API gateway. Not suitable for production.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::f64::consts::LN_2;
use tokio::sync::RwLock;

use crate::domain::revocation::RevocationKey;
use crate::ports::{BackendError, MembershipBackend};

/// Fixed-size Bloom filter.
///
/// Positions come from double hashing over a SHA-256 digest:
/// `h(i) = h1 + i * h2 (mod m)`. No false negatives: a key that was inserted
/// always tests positive.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    bits: Vec<u64>,
    m: u64,
    k: u32,
}

impl BloomFilter {
    /// Sizes the filter for `capacity` keys at `error_rate` false positives.
    ///
    /// - m = -n * ln(p) / ln(2)^2
    /// - k = (m / n) * ln(2)
    pub fn with_rate(capacity: u64, error_rate: f64) -> Self {
        let n = capacity.max(1) as f64;
        let m = (-n * error_rate.ln() / (LN_2 * LN_2)).ceil().max(64.0) as u64;
        let k = ((m as f64 / n) * LN_2).round().clamp(1.0, 32.0) as u32;
        Self::new(m, k)
    }

    pub fn new(m: u64, k: u32) -> Self {
        let m = m.max(1);
        let words = m.div_ceil(64) as usize;
        Self {
            bits: vec![0; words],
            m,
            k: k.max(1),
        }
    }

    pub fn insert(&mut self, element: &[u8]) {
        for pos in self.positions(element) {
            self.bits[(pos / 64) as usize] |= 1u64 << (pos % 64);
        }
    }

    pub fn contains(&self, element: &[u8]) -> bool {
        self.positions(element)
            .all(|pos| self.bits[(pos / 64) as usize] & (1u64 << (pos % 64)) != 0)
    }

    /// Size in bits.
    pub fn size_bits(&self) -> u64 {
        self.m
    }

    pub fn hash_count(&self) -> u32 {
        self.k
    }

    fn positions(&self, element: &[u8]) -> impl Iterator<Item = u64> {
        let digest = Sha256::digest(element);
        let mut h1 = [0u8; 8];
        let mut h2 = [0u8; 8];
        h1.copy_from_slice(&digest[..8]);
        h2.copy_from_slice(&digest[8..16]);
        let h1 = u64::from_le_bytes(h1);
        // Odd step so successive probes never collapse onto one bit.
        let h2 = u64::from_le_bytes(h2) | 1;
        let m = self.m;

        (0..self.k as u64).map(move |i| h1.wrapping_add(i.wrapping_mul(h2)) % m)
    }
}

/// Process-local membership backend.
#[derive(Debug)]
pub struct InMemoryBloomBackend {
    filter: RwLock<Option<BloomFilter>>,
}

impl InMemoryBloomBackend {
    pub fn new(capacity: u64, error_rate: f64) -> Self {
        Self::from_filter(BloomFilter::with_rate(capacity, error_rate))
    }

    pub fn from_filter(filter: BloomFilter) -> Self {
        Self {
            filter: RwLock::new(Some(filter)),
        }
    }

    /// Small filter suitable for unit tests.
    pub fn with_defaults() -> Self {
        Self::new(10_000, 0.001)
    }
}

#[async_trait]
impl MembershipBackend for InMemoryBloomBackend {
    async fn add(&self, key: &RevocationKey) -> Result<(), BackendError> {
        let mut guard = self.filter.write().await;
        let filter = guard.as_mut().ok_or_else(BackendError::closed)?;
        filter.insert(key.as_bytes());
        Ok(())
    }

    async fn check(&self, key: &RevocationKey) -> Result<bool, BackendError> {
        let guard = self.filter.read().await;
        let filter = guard.as_ref().ok_or_else(BackendError::closed)?;
        Ok(filter.contains(key.as_bytes()))
    }

    async fn close(&self) -> Result<(), BackendError> {
        self.filter.write().await.take();
        Ok(())
    }
}
