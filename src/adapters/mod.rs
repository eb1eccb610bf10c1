//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes for the add/check endpoints
//! - `jwt` - Logout token decoding
//! - `membership` - Revocation set backends (RedisBloom, in-memory)

pub mod http;
pub mod jwt;
pub mod membership;

pub use http::build_router;
pub use jwt::UnverifiedClaimsDecoder;
pub use membership::{InMemoryBloomBackend, RedisBloomBackend};
