//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client identification (rate-limit keys from request headers)
//! - Rate limiting infrastructure (fixed-window counting)

pub mod client;
pub mod rate_limit;
