//! Models Module
//!
//! Request and response DTOs for the relay's own HTTP surface.

pub mod requests;
pub mod responses;

pub use requests::ClearParams;
pub use responses::{ClearResponse, DeleteResponse, HealthResponse, StatsResponse};
