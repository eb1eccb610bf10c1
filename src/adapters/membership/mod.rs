//! Membership backend adapters.
//!
//! Implementations of the `MembershipBackend` port for different backends.
//!
//! ## Available Adapters
//!
//! - `RedisBloomBackend` - Shared RedisBloom filter for production
//! - `InMemoryBloomBackend` - Process-local Bloom filter for development and tests
//!
//! ## Usage
//!
//! ```ignore
//! use jwt_revoker::adapters::membership::{InMemoryBloomBackend, RedisBloomBackend};
//!
//! // For testing
//! let backend = InMemoryBloomBackend::with_defaults();
//!
//! // For production
//! let backend = RedisBloomBackend::connect(&config.backend).await?;
//! ```

mod in_memory;
mod redis_bloom;

pub use in_memory::{BloomFilter, InMemoryBloomBackend};
pub use redis_bloom::RedisBloomBackend;
