//! API Handlers
//!
//! HTTP request handlers for the content proxy and cache admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::cache::CacheStore;
use crate::models::{ClearParams, ClearResponse, DeleteResponse, HealthResponse, StatsResponse};
use crate::proxy::{cache_key, category_ttl, ProxyCache, UpstreamClient};

/// Passthrough caching directives attached to every proxy response.
const CACHE_CONTROL_VALUE: &str = "public, s-maxage=300, stale-while-revalidate=600";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Durable cross-request cache
    pub store: Arc<CacheStore>,
    /// In-memory upstream request cache
    pub proxy: Arc<ProxyCache>,
    /// Bounded upstream fetch client
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(store: Arc<CacheStore>, proxy: Arc<ProxyCache>, upstream: UpstreamClient) -> Self {
        Self {
            store,
            proxy,
            upstream: Arc::new(upstream),
        }
    }
}

/// Handler for GET /api/*path
///
/// Serves the upstream content API through the proxy cache: a fresh cached
/// response is returned directly, otherwise the upstream is fetched and
/// the response cached with a category-specific TTL. Upstream failures map
/// to their HTTP outcomes (timeout 504, non-2xx passthrough, other 500);
/// nothing is cached on failure.
pub async fn proxy_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let key = cache_key(&path, query.as_deref());

    if let Some(data) = state.proxy.get(&key) {
        debug!("Proxy cache hit for {}", path);
        return decorate(Json(data).into_response(), "HIT");
    }

    match state.upstream.fetch(&path, query.as_deref()).await {
        Ok(data) => {
            state.proxy.set(&key, data.clone(), category_ttl(&path));
            decorate(Json(data).into_response(), "MISS")
        }
        Err(err) => decorate(err.into_response(), "MISS"),
    }
}

fn decorate(mut response: Response, outcome: &'static str) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_VALUE),
    );
    headers.insert("x-cache", HeaderValue::from_static(outcome));
    response
}

/// Handler for GET /cache/stats
///
/// Returns persistent-store statistics (from a live scan) combined with
/// proxy cache telemetry.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let store_stats = state.store.stats().await;

    Json(StatsResponse::new(
        store_stats,
        state.proxy.hits(),
        state.proxy.misses(),
        state.proxy.len(),
    ))
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.store.delete(&key).await;
    Json(DeleteResponse::new(key))
}

/// Handler for DELETE /cache
///
/// Clears entries whose key contains `?pattern=`, or everything when no
/// pattern is given.
pub async fn clear_handler(
    State(state): State<AppState>,
    Query(params): Query<ClearParams>,
) -> Json<ClearResponse> {
    state.store.clear(params.pattern.as_deref()).await;
    Json(ClearResponse::new(params.pattern.as_deref()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::policy::TTL_FRESH;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::tempdir;

    async fn test_state(dir: &tempfile::TempDir) -> AppState {
        let store = Arc::new(CacheStore::open(dir.path()).await.unwrap());
        let upstream =
            UpstreamClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        AppState::new(store, Arc::new(ProxyCache::new()), upstream)
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir).await;
        state.store.set("k", &json!(1), TTL_FRESH).await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.entries, 1);
        assert_eq!(response.proxy_hits, 0);
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir).await;
        state.store.set("article:x", &json!(1), TTL_FRESH).await;

        delete_handler(State(state.clone()), Path("article:x".to_string())).await;

        assert!(state.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_handler_with_pattern() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir).await;
        state.store.set("a:1", &json!(1), TTL_FRESH).await;
        state.store.set("b:1", &json!(2), TTL_FRESH).await;

        let params = ClearParams {
            pattern: Some("a:".to_string()),
        };
        clear_handler(State(state.clone()), Query(params)).await;

        assert_eq!(state.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_proxy_handler_serves_cached_entry() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir).await;
        let key = cache_key("posts", None);
        state.proxy.set(&key, json!([{"id": 1}]), TTL_FRESH);

        let response = proxy_handler(
            State(state),
            Path("posts".to_string()),
            RawQuery(None),
        )
        .await;

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(response.headers()["x-cache"], "HIT");
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            CACHE_CONTROL_VALUE
        );
    }

    #[tokio::test]
    async fn test_proxy_handler_unreachable_upstream_is_500() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir).await;

        let response = proxy_handler(
            State(state.clone()),
            Path("posts".to_string()),
            RawQuery(None),
        )
        .await;

        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(response.headers()["x-cache"], "MISS");
        // Failures are never written to the proxy cache.
        assert!(state.proxy.is_empty());
    }
}
