//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response with component status.
///
/// `status` is the numeric HTTP status, like every other response body;
/// the overall verdict is in `health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: u16,
    pub health: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Health status for each system component.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub storage: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
