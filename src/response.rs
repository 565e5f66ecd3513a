//! The JSON envelope used for responses that report success or failure to the client.

use serde::{Deserialize, Serialize};

/// A success flag with a human readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Whether the request succeeded.
    pub success: bool,
    /// A message that can be shown to the customer.
    pub message: String,
}

impl ApiMessage {
    /// A message reporting a failed request.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
