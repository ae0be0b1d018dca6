//! API Module
//!
//! HTTP handlers and routing for the content relay.
//!
//! # Endpoints
//! - `GET /api/*path` - Proxy a content request to the upstream API
//! - `GET /cache/stats` - Cache and proxy statistics
//! - `DELETE /cache/:key` - Delete a persistent cache entry
//! - `DELETE /cache` - Clear entries (optional `?pattern=` substring)
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
