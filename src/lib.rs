//! JWT Revoker - Back-channel logout revocation service
//!
//! Receives OpenID Connect back-channel logout notifications, records the
//! token subject in a shared probabilistic set, and answers per-request
//! revocation checks from the API gateway.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
