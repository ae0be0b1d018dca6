//! Content Relay - adaptive cache and proxy for a headless CMS frontend
//!
//! Mirrors articles, categories and media from an upstream content API
//! behind two caches: a persistent store whose TTLs derive from the age of
//! the content itself, and an in-memory proxy cache that deduplicates
//! identical upstream fetches.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStore, CacheStats};
pub use config::Config;
pub use proxy::{ProxyCache, UpstreamClient};
pub use tasks::Sweeper;
