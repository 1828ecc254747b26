//! Response envelope types shared by API handlers.
//!
//! The mobile client expects a numeric `status` and a human-readable
//! `message` next to the payload, so envelopes carry both.

use serde::Serialize;

/// `{ "status": 200, "message": "..." }` with no payload.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: u16,
    pub message: String,
}

impl StatusMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: 200,
            message: message.into(),
        }
    }
}

/// Token envelope returned by login and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub status: u16,
    pub message: String,
}

/// Payload fields flattened next to `status` and `message`.
///
/// ```ignore
/// Ok(Json(Envelope::new(NotePayload { note }, "Note created")))
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    #[serde(flatten)]
    pub payload: T,
    pub status: u16,
    pub message: String,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(payload: T, message: impl Into<String>) -> Self {
        Self {
            payload,
            status: 200,
            message: message.into(),
        }
    }
}
