//! Response DTOs for the relay's own API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of persistent entries
    pub entries: usize,
    /// Approximate total payload size in bytes
    pub approx_bytes: usize,
    /// Permanent entries (never swept)
    pub permanent: usize,
    /// Temporary entries
    pub temporary: usize,
    /// Proxy cache hits
    pub proxy_hits: u64,
    /// Proxy cache misses
    pub proxy_misses: u64,
    /// Resident proxy cache entries
    pub proxy_entries: usize,
    /// Proxy hit rate (hits / (hits + misses))
    pub proxy_hit_rate: f64,
}

impl StatsResponse {
    /// Combines store and proxy statistics into one response.
    pub fn new(store: CacheStats, proxy_hits: u64, proxy_misses: u64, proxy_entries: usize) -> Self {
        let lookups = proxy_hits + proxy_misses;
        let proxy_hit_rate = if lookups > 0 {
            proxy_hits as f64 / lookups as f64
        } else {
            0.0
        };
        Self {
            entries: store.entries,
            approx_bytes: store.approx_bytes,
            permanent: store.permanent,
            temporary: store.temporary,
            proxy_hits,
            proxy_misses,
            proxy_entries,
            proxy_hit_rate,
        }
    }
}

/// Response body for DELETE /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted", key),
            key,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// The substring pattern that was applied, if any
    pub pattern: Option<String>,
}

impl ClearResponse {
    pub fn new(pattern: Option<&str>) -> Self {
        let message = match pattern {
            Some(pattern) => format!("Cleared entries matching '{}'", pattern),
            None => "Cleared all entries".to_string(),
        };
        Self {
            message,
            pattern: pattern.map(str::to_string),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_hit_rate() {
        let resp = StatsResponse::new(CacheStats::new(), 80, 20, 5);
        assert!((resp.proxy_hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_stats_response_zero_lookups() {
        let resp = StatsResponse::new(CacheStats::new(), 0, 0, 0);
        assert_eq!(resp.proxy_hit_rate, 0.0);
    }

    #[test]
    fn test_stats_response_serialize() {
        let resp = StatsResponse::new(CacheStats::new(), 1, 1, 1);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("proxy_hits"));
        assert!(json.contains("approx_bytes"));
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new("article:gone");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("article:gone"));
        assert!(json.contains("deleted"));
    }

    #[test]
    fn test_clear_response_messages() {
        assert!(ClearResponse::new(Some("article:"))
            .message
            .contains("article:"));
        assert_eq!(ClearResponse::new(None).message, "Cleared all entries");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
