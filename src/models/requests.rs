//! Request DTOs for the relay's own API

use serde::Deserialize;

/// Query parameters for DELETE /cache
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearParams {
    /// Substring pattern; when absent, everything is cleared
    pub pattern: Option<String>,
}
