pub mod audit_handler;
pub mod triage_handler;

use serde::{Deserialize, Serialize};

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
