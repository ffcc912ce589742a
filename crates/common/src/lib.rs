//! Shared building blocks for the site: logging setup, runtime checks,
//! wire types, the service catalog and the request rate limiter.

pub mod types;
pub mod utils;
pub mod env;
pub mod catalog;
pub mod rate_limit;
