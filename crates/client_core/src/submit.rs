use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use shared::{domain::WireRecordDraft, error::RejectionBody};
use tracing::{debug, info, warn};

use crate::{error::SubmitError, list::ListController, ApiTransport};

/// Serializes a draft into the wire line the backend parses. Field order and
/// the `;` separator are part of the contract and must match exactly.
pub fn encode_draft(draft: &WireRecordDraft) -> String {
    format!(
        "seq={};sender_rtn={};sender_an={};receiver_rtn={};receiver_an={};amount={}",
        draft.seq,
        draft.sender_rtn,
        draft.sender_an,
        draft.receiver_rtn,
        draft.receiver_an,
        draft.amount
    )
}

/// Posts new wire records and asks the list controller for an authoritative
/// refresh once the backend has accepted one.
pub struct MutationSubmitter {
    transport: Arc<ApiTransport>,
    list: Arc<ListController>,
}

impl MutationSubmitter {
    pub fn new(transport: Arc<ApiTransport>, list: Arc<ListController>) -> Self {
        Self { transport, list }
    }

    /// Submits the draft. Presence is the only client-side check; numeric and
    /// format validation belongs to the backend. On success the draft is
    /// reset and exactly one list refresh is issued.
    pub async fn submit(&self, draft: &mut WireRecordDraft) -> Result<(), SubmitError> {
        if let Some(field) = draft.first_missing_field() {
            return Err(SubmitError::Rejected(format!("{field} is required")));
        }

        let line = encode_draft(draft);
        debug!(%line, "submitting wire record");
        let response = self
            .transport
            .http()
            .post(self.transport.url("/wire-messages"))
            .header(CONTENT_TYPE, "text/plain")
            .body(line)
            .send()
            .await
            .map_err(|err| {
                warn!("submit request failed: {err}");
                SubmitError::Unreachable
            })?;

        let status = response.status();
        if status.is_success() {
            info!("wire record accepted");
            *draft = WireRecordDraft::default();
            self.list.refresh().await;
            return Ok(());
        }

        let reason = match response.json::<RejectionBody>().await {
            Ok(body) => body.error,
            Err(_) => "Failed to submit message".to_string(),
        };
        info!(%status, %reason, "wire record rejected");
        Err(SubmitError::Rejected(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_draft_matches_wire_contract_exactly() {
        let draft = WireRecordDraft {
            seq: "10".into(),
            sender_rtn: "021000021".into(),
            sender_an: "12345".into(),
            receiver_rtn: "121000248".into(),
            receiver_an: "67890".into(),
            amount: "250.00".into(),
        };
        assert_eq!(
            encode_draft(&draft),
            "seq=10;sender_rtn=021000021;sender_an=12345;receiver_rtn=121000248;receiver_an=67890;amount=250.00"
        );
    }
}
