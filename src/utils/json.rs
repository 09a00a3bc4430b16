//! JSON segment encoding
//!
//! A token segment is compact JSON wrapped in Base64URL.

use crate::error::{Error, Result};
use crate::utils::base64url;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize a value to compact JSON and Base64URL-encode it
pub(crate) fn encode_segment<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value).map_err(|e| Error::Encoding(e.to_string()))?;
    Ok(base64url::encode_bytes(&json))
}

/// Base64URL-decode a segment and parse its JSON
///
/// `part` names the segment in error messages ("header", "payload").
pub(crate) fn decode_segment<T: DeserializeOwned>(
    segment: &str,
    max_size: usize,
    part: &str,
) -> Result<T> {
    let json = base64url::decode_bytes(segment, max_size)?;
    serde_json::from_slice(&json)
        .map_err(|e| Error::MalformedToken(format!("Failed to parse {part}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_encode_segment_is_compact() {
        let segment = encode_segment(&json!({"alg": "HS256"})).unwrap();
        assert_eq!(segment, base64url::encode(r#"{"alg":"HS256"}"#));
    }

    #[test]
    fn test_decode_segment() {
        let segment = base64url::encode(r#"{"id":"alice"}"#);
        let value: Value = decode_segment(&segment, 1024, "payload").unwrap();
        assert_eq!(value, json!({"id": "alice"}));
    }

    #[test]
    fn test_decode_segment_invalid_json() {
        let segment = base64url::encode("not json");
        let result: Result<Value> = decode_segment(&segment, 1024, "header");
        match result {
            Err(Error::MalformedToken(msg)) => assert!(msg.contains("header")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
