use serde::{Deserialize, Serialize};

/// Error payload the backend attaches to rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionBody {
    pub error: String,
}

impl RejectionBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
