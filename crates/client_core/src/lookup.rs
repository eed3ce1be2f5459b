use std::sync::Arc;

use reqwest::StatusCode;
use shared::domain::WireRecord;
use tracing::warn;

use crate::{error::LookupError, ApiTransport};

/// Fetches a single record by sequence number.
pub struct RecordLookup {
    transport: Arc<ApiTransport>,
}

impl RecordLookup {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn fetch(&self, seq: i64) -> Result<Option<WireRecord>, LookupError> {
        let response = self
            .transport
            .http()
            .get(self.transport.url(&format!("/wire-messages/{seq}")))
            .send()
            .await
            .map_err(|err| {
                warn!(seq, "record lookup failed: {err}");
                LookupError::Transport
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(LookupError::Unauthorized),
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<WireRecord>()
                .await
                .map(Some)
                .map_err(|_| LookupError::Malformed),
            status => {
                warn!(seq, %status, "record lookup returned unexpected status");
                Err(LookupError::Transport)
            }
        }
    }
}
