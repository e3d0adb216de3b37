//! Invocation response envelope.

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

/// Outcome of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Invocation succeeded
    Ok,
    /// Invocation failed; see the message
    Error,
}

impl Status {
    /// Numeric status code carried on the wire
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Error => 500,
        }
    }
}

/// Response envelope returned for every invocation.
///
/// Success carries a byte payload (possibly empty); failure carries a
/// human-readable message and no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Outcome
    pub status: Status,
    /// Error message, empty on success
    pub message: String,
    /// Result bytes, empty on failure
    pub payload: Vec<u8>,
}

impl Response {
    /// Successful response carrying `payload`
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
            payload,
        }
    }

    /// Failed response carrying `message`
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    /// Map a component result into the envelope
    pub fn from_result(result: Result<Vec<u8>, RegistryError>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(err) => Self::error(err.to_string()),
        }
    }

    /// Whether the invocation succeeded
    pub fn is_success(&self) -> bool {
        self.status == Status::Ok
    }
}
