//! JSON-RPC codec for the historical-volatility endpoint.
//!
//! Request:
//! `{"jsonrpc":"2.0","id":<n>,"method":"public/get_historical_volatility","params":{"currency":<ASSET>}}`
//!
//! Responses carry either `result: [[timestamp_ms, value_percent], ...]` in
//! ascending time order, or `error: {code, message}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::FeedError;

/// JSON-RPC method returning a historical volatility series.
pub const HISTORICAL_VOLATILITY_METHOD: &str = "public/get_historical_volatility";

/// One live volatility observation.
///
/// `value` is in percent, truncated (not rounded) to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySample {
    /// Annualised volatility in percent, e.g. 54.78
    pub value: f64,
    /// Timestamp of the observation
    pub observed_at: DateTime<Utc>,
}

impl VolatilitySample {
    /// Builds a sample from a raw series entry.
    ///
    /// A timestamp outside chrono's range falls back to the current time.
    pub fn from_observation(timestamp_ms: f64, raw_percent: f64) -> Self {
        let observed_at =
            DateTime::from_timestamp_millis(timestamp_ms as i64).unwrap_or_else(Utc::now);
        Self {
            value: truncate_2dp(raw_percent),
            observed_at,
        }
    }

    /// Volatility as the decimal pricing input (54.78 → 0.5478).
    pub fn as_decimal(&self) -> f64 {
        self.value / 100.0
    }
}

/// Encodes the volatility request for one asset.
///
/// # Examples
/// ```
/// use adapter_feeds::protocol::encode_request;
///
/// let text = encode_request(7, "ETH");
/// let value: serde_json::Value = serde_json::from_str(&text).unwrap();
/// assert_eq!(value["params"]["currency"], "ETH");
/// assert_eq!(value["id"], 7);
/// ```
pub fn encode_request(id: u64, currency: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": HISTORICAL_VOLATILITY_METHOD,
        "params": {
            "currency": currency
        }
    })
    .to_string()
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

/// Decodes one text frame received while awaiting `request_id`.
///
/// Returns `Ok(None)` for a well-formed response addressed to another
/// request id, so the caller keeps waiting.
///
/// # Errors
/// - `FeedError::Malformed` if the frame is not a JSON-RPC response or the
///   result is not a list of `[timestamp, value]` pairs
/// - `FeedError::Remote` for an `error` payload
/// - `FeedError::EmptyResult` for an empty series
pub fn decode_response(text: &str, request_id: u64) -> Result<Option<VolatilitySample>, FeedError> {
    let response: RpcResponse =
        serde_json::from_str(text).map_err(|e| FeedError::Malformed(e.to_string()))?;

    if matches!(response.id, Some(id) if id != request_id) {
        return Ok(None);
    }

    if let Some(error) = response.error {
        return Err(FeedError::Remote {
            code: error.code,
            message: error.message,
        });
    }

    let result = response
        .result
        .ok_or_else(|| FeedError::Malformed("neither result nor error present".to_string()))?;
    let series: Vec<(f64, f64)> = serde_json::from_value(result)
        .map_err(|e| FeedError::Malformed(format!("result is not a [timestamp, value] list: {e}")))?;

    let (timestamp, value) = series.last().copied().ok_or(FeedError::EmptyResult)?;
    if !value.is_finite() || value < 0.0 {
        return Err(FeedError::Malformed(format!("volatility out of range: {value}")));
    }
    Ok(Some(VolatilitySample::from_observation(timestamp, value)))
}

/// Truncates a percentage toward zero at two decimals.
///
/// Values whose scaled form sits within float noise of an integer keep
/// that integer, so 45.67 stays 45.67 rather than becoming 45.66.
fn truncate_2dp(value: f64) -> f64 {
    let scaled = value * 100.0;
    let nearest = scaled.round();
    let kept = if (scaled - nearest).abs() < 1e-9 {
        nearest
    } else {
        scaled.trunc()
    };
    kept / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_encode_request_shape() {
        let value: Value = serde_json::from_str(&encode_request(3, "BTC")).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "public/get_historical_volatility",
                "params": { "currency": "BTC" }
            })
        );
    }

    #[test]
    fn test_decode_takes_last_observation() {
        let text = r#"{"jsonrpc":"2.0","id":1,"result":[[1700000000000,48.2],[1700003600000,51.456]]}"#;
        let sample = decode_response(text, 1).unwrap().unwrap();
        assert_eq!(sample.value, 51.45);
        assert_eq!(sample.observed_at.timestamp_millis(), 1_700_003_600_000);
    }

    #[test]
    fn test_truncation_not_rounding() {
        assert_eq!(truncate_2dp(54.789), 54.78);
        assert_eq!(truncate_2dp(45.67), 45.67);
        assert_eq!(truncate_2dp(60.0), 60.0);
        assert_eq!(truncate_2dp(0.019), 0.01);
    }

    #[test]
    fn test_as_decimal() {
        let sample = VolatilitySample::from_observation(0.0, 62.5);
        assert_relative_eq!(sample.as_decimal(), 0.625, epsilon = 1e-15);
    }

    #[test]
    fn test_decode_remote_error() {
        let text = r#"{"jsonrpc":"2.0","id":4,"error":{"code":10028,"message":"too_many_requests"}}"#;
        assert_eq!(
            decode_response(text, 4),
            Err(FeedError::Remote {
                code: Some(10_028),
                message: "too_many_requests".to_string()
            })
        );
    }

    #[test]
    fn test_decode_empty_result() {
        let text = r#"{"jsonrpc":"2.0","id":2,"result":[]}"#;
        assert_eq!(decode_response(text, 2), Err(FeedError::EmptyResult));
    }

    #[test]
    fn test_decode_malformed() {
        let cases = [
            "not json",
            r#"{"jsonrpc":"2.0","id":2}"#,
            r#"{"jsonrpc":"2.0","id":2,"result":{"vol":50}}"#,
            r#"{"jsonrpc":"2.0","id":2,"result":[[1700000000000,"fifty"]]}"#,
            r#"{"jsonrpc":"2.0","id":2,"result":[[1700000000000]]}"#,
            r#"{"jsonrpc":"2.0","id":2,"result":[[1700000000000,-1.0]]}"#,
        ];
        for text in cases {
            assert!(
                matches!(decode_response(text, 2), Err(FeedError::Malformed(_))),
                "expected Malformed for {text}"
            );
        }
    }

    #[test]
    fn test_decode_ignores_other_request_ids() {
        let text = r#"{"jsonrpc":"2.0","id":9,"result":[[1700000000000,50.0]]}"#;
        assert_eq!(decode_response(text, 1), Ok(None));
    }

    #[test]
    fn test_decode_accepts_missing_id() {
        let text = r#"{"result":[[1700000000000,50.0]]}"#;
        assert_eq!(decode_response(text, 1).unwrap().unwrap().value, 50.0);
    }
}
