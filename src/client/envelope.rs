//! Wire types for the upstream reference-data API

use serde::Deserialize;

/// One ticker entry as returned by the reference-data endpoint
///
/// Every field is optional in the source payload. Absent fields are
/// defaulted at write time, not here, so a record round-trips without
/// inventing data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TickerRecord {
    pub ticker: Option<String>,
    pub name: Option<String>,
    pub market: Option<String>,
    pub locale: Option<String>,
    pub primary_exchange: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub active: Option<bool>,
    pub currency_name: Option<String>,
    pub cik: Option<String>,
    pub composite_figi: Option<String>,
    pub share_class_figi: Option<String>,
    pub last_updated_utc: Option<String>,
}

/// One page of the paginated catalog response
///
/// Invariant: absence of `next_url` is the sole termination signal. An empty
/// `results` array with `next_url` present means more data follows.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope {
    pub status: Option<String>,
    pub message: Option<String>,
    pub results: Option<Vec<TickerRecord>>,
    pub next_url: Option<String>,
    pub count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "ticker": "ZWS",
            "name": "Zurn Elkay Water Solutions Corporation",
            "market": "stocks",
            "locale": "us",
            "primary_exchange": "XNYS",
            "type": "CS",
            "active": true,
            "currency_name": "usd",
            "cik": "0001439288",
            "composite_figi": "BBG000H8R0N8",
            "share_class_figi": "BBG001T36GB5",
            "last_updated_utc": "2025-09-11T06:11:10.586204443Z"
        }"#;

        let record: TickerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.ticker.as_deref(), Some("ZWS"));
        assert_eq!(record.kind.as_deref(), Some("CS"));
        assert_eq!(record.active, Some(true));
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let record: TickerRecord = serde_json::from_str(r#"{"ticker": "AAA"}"#).unwrap();
        assert_eq!(record.ticker.as_deref(), Some("AAA"));
        assert_eq!(record.name, None);
        assert_eq!(record.active, None);
    }

    #[test]
    fn test_deserialize_envelope_with_cursor() {
        let json = r#"{
            "status": "OK",
            "count": 1,
            "results": [{"ticker": "AAA"}],
            "next_url": "https://api.example.com/v3/reference/tickers?cursor=abc"
        }"#;

        let envelope: PageEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status.as_deref(), Some("OK"));
        assert_eq!(envelope.results.unwrap().len(), 1);
        assert!(envelope.next_url.is_some());
    }

    #[test]
    fn test_deserialize_envelope_without_results() {
        let envelope: PageEnvelope = serde_json::from_str(r#"{"status": "OK"}"#).unwrap();
        assert!(envelope.results.is_none());
        assert!(envelope.next_url.is_none());
        assert!(envelope.count.is_none());
    }
}
