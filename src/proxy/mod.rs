//! Proxy Module
//!
//! In-memory deduplication cache for upstream requests plus the bounded
//! upstream fetch client.

mod cache;
mod upstream;

pub use cache::{cache_key, category_ttl, ProxyCache, DEFAULT_TTL};
pub use upstream::{UpstreamClient, USER_AGENT};
