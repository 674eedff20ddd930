//! Envelope for responses that carry only a message.

use serde::Serialize;

/// `{ "status": 200, "message": "..." }`, used by delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: u16,
    pub message: &'static str,
}
