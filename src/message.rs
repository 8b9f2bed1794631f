//! The acknowledgement body returned by endpoints that change data.

use serde::{Deserialize, Serialize};

/// A JSON body with a human readable `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The acknowledgement text shown to the user.
    pub message: String,
}

impl MessageResponse {
    /// Create a response with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
