use reqwest::StatusCode;
use serde_json::Value;
use shared::domain::WireRecord;

/// The sentinel object the backend returns instead of an empty array.
const NO_RECORDS_MESSAGE: &str = "No wire messages found";

/// Every way a list fetch can resolve. The controller matches on this and
/// never inspects raw payload shape itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Items(Vec<WireRecord>),
    Empty,
    Unauthorized,
    Malformed,
    TransportFailure,
}

/// Collapse a raw list-fetch response into a [`ListOutcome`].
///
/// The backend is duck-typed: a JSON array of records, a sentinel object for
/// "no records", or garbage. This is the only place that distinction is made.
/// Transport-level failures never reach this function; the caller maps them
/// to [`ListOutcome::TransportFailure`] directly.
pub fn classify(status: StatusCode, body: &str) -> ListOutcome {
    if status == StatusCode::UNAUTHORIZED {
        return ListOutcome::Unauthorized;
    }
    if !status.is_success() {
        return ListOutcome::TransportFailure;
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return ListOutcome::Malformed,
    };

    if value.is_array() {
        return match serde_json::from_value::<Vec<WireRecord>>(value) {
            Ok(records) => ListOutcome::Items(records),
            Err(_) => ListOutcome::Malformed,
        };
    }
    if let Value::Object(map) = value {
        if map.get("message").and_then(Value::as_str) == Some(NO_RECORDS_MESSAGE) {
            return ListOutcome::Empty;
        }
    }
    ListOutcome::Malformed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(seq: i64) -> String {
        format!(
            r#"{{"id":{seq},"seq":{seq},"sender_rtn":"021000021","sender_an":"1","receiver_rtn":"121000248","receiver_an":"2","amount":10.5,"message":""}}"#
        )
    }

    #[test]
    fn array_of_records_classifies_as_items() {
        let body = format!("[{},{}]", record_json(1), record_json(2));
        match classify(StatusCode::OK, &body) {
            ListOutcome::Items(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].seq, 1);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn empty_array_is_items_not_empty_sentinel() {
        assert_eq!(classify(StatusCode::OK, "[]"), ListOutcome::Items(Vec::new()));
    }

    #[test]
    fn sentinel_object_classifies_as_empty() {
        assert_eq!(
            classify(StatusCode::OK, r#"{"message": "No wire messages found"}"#),
            ListOutcome::Empty
        );
    }

    #[test]
    fn object_with_other_message_is_malformed() {
        assert_eq!(
            classify(StatusCode::OK, r#"{"message": "something else"}"#),
            ListOutcome::Malformed
        );
        assert_eq!(
            classify(StatusCode::OK, r#"{"records": []}"#),
            ListOutcome::Malformed
        );
    }

    #[test]
    fn array_with_undecodable_element_is_malformed() {
        let body = format!("[{},{}]", record_json(1), r#"{"id":"not-a-number"}"#);
        assert_eq!(classify(StatusCode::OK, &body), ListOutcome::Malformed);
    }

    #[test]
    fn scalar_and_garbage_bodies_are_malformed() {
        assert_eq!(classify(StatusCode::OK, "42"), ListOutcome::Malformed);
        assert_eq!(classify(StatusCode::OK, "\"hello\""), ListOutcome::Malformed);
        assert_eq!(classify(StatusCode::OK, "not json at all"), ListOutcome::Malformed);
    }

    #[test]
    fn status_401_wins_regardless_of_body() {
        assert_eq!(
            classify(StatusCode::UNAUTHORIZED, "[]"),
            ListOutcome::Unauthorized
        );
    }

    #[test]
    fn non_success_status_is_transport_failure() {
        assert_eq!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ListOutcome::TransportFailure
        );
        assert_eq!(
            classify(StatusCode::BAD_GATEWAY, "[]"),
            ListOutcome::TransportFailure
        );
    }
}
