use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Records per list page; part of the backend contract, not a tuning knob.
pub const PAGE_SIZE: u32 = 5;

/// A wire transfer as the backend stores it. Instances are created
/// server-side and only ever read by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    pub id: i64,
    pub seq: i64,
    pub sender_rtn: String,
    pub sender_an: String,
    pub receiver_rtn: String,
    pub receiver_an: String,
    pub amount: Decimal,
    /// Server-populated raw submission text; absent on older rows.
    #[serde(default)]
    pub message: String,
}

/// Form state for a not-yet-submitted record. All fields are raw strings;
/// numeric and format validation belongs to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireRecordDraft {
    pub seq: String,
    pub sender_rtn: String,
    pub sender_an: String,
    pub receiver_rtn: String,
    pub receiver_an: String,
    pub amount: String,
}

impl WireRecordDraft {
    /// Name of the first empty field, in wire order, if any.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("seq", &self.seq),
            ("sender_rtn", &self.sender_rtn),
            ("sender_an", &self.sender_an),
            ("receiver_rtn", &self.receiver_rtn),
            ("receiver_an", &self.receiver_an),
            ("amount", &self.amount),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Columns the list endpoint accepts for `sort`. Anything outside this set is
/// unrepresentable on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Seq,
    SenderRtn,
    SenderAn,
    ReceiverRtn,
    ReceiverAn,
    Amount,
}

impl SortColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Seq => "seq",
            SortColumn::SenderRtn => "sender_rtn",
            SortColumn::SenderAn => "sender_an",
            SortColumn::ReceiverRtn => "receiver_rtn",
            SortColumn::ReceiverAn => "receiver_an",
            SortColumn::Amount => "amount",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "seq" => Some(SortColumn::Seq),
            "sender_rtn" => Some(SortColumn::SenderRtn),
            "sender_an" => Some(SortColumn::SenderAn),
            "receiver_rtn" => Some(SortColumn::ReceiverRtn),
            "receiver_an" => Some(SortColumn::ReceiverAn),
            "amount" => Some(SortColumn::Amount),
            _ => None,
        }
    }
}

impl Default for SortColumn {
    fn default() -> Self {
        SortColumn::Seq
    }
}

/// Query for one list fetch. `page` starts at 1; the limit is fixed by the
/// contract at [`PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub sort: SortColumn,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE,
            sort: SortColumn::default(),
        }
    }
}

/// Login form values. Transient; dropped after the login request.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_column_round_trips_through_wire_names() {
        for column in [
            SortColumn::Seq,
            SortColumn::SenderRtn,
            SortColumn::SenderAn,
            SortColumn::ReceiverRtn,
            SortColumn::ReceiverAn,
            SortColumn::Amount,
        ] {
            assert_eq!(SortColumn::parse(column.as_str()), Some(column));
        }
        assert_eq!(SortColumn::parse("created_at"), None);
        assert_eq!(SortColumn::parse(""), None);
    }

    #[test]
    fn draft_reports_first_missing_field_in_wire_order() {
        let mut draft = WireRecordDraft::default();
        assert_eq!(draft.first_missing_field(), Some("seq"));

        draft.seq = "10".into();
        draft.sender_rtn = "021000021".into();
        assert_eq!(draft.first_missing_field(), Some("sender_an"));

        draft.sender_an = "12345".into();
        draft.receiver_rtn = "121000248".into();
        draft.receiver_an = "67890".into();
        draft.amount = "   ".into();
        assert_eq!(draft.first_missing_field(), Some("amount"));

        draft.amount = "250.00".into();
        assert_eq!(draft.first_missing_field(), None);
    }

    #[test]
    fn wire_record_decodes_backend_row() {
        let record: WireRecord = serde_json::from_str(
            r#"{
                "id": 3,
                "seq": 10,
                "sender_rtn": "021000021",
                "sender_an": "12345",
                "receiver_rtn": "121000248",
                "receiver_an": "67890",
                "amount": 250.00,
                "message": "seq=10;sender_rtn=021000021;sender_an=12345;receiver_rtn=121000248;receiver_an=67890;amount=250.00"
            }"#,
        )
        .expect("decode");
        assert_eq!(record.seq, 10);
        assert_eq!(record.amount, Decimal::new(25000, 2));
    }

    #[test]
    fn wire_record_tolerates_missing_message_field() {
        let record: WireRecord = serde_json::from_str(
            r#"{
                "id": 1,
                "seq": 2,
                "sender_rtn": "021000021",
                "sender_an": "1",
                "receiver_rtn": "121000248",
                "receiver_an": "2",
                "amount": "19.99"
            }"#,
        )
        .expect("decode");
        assert_eq!(record.message, "");
    }
}
