use crate::algorithm::AlgorithmId;
use crate::error::Result;
use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token header
///
/// Only `alg` is processed; unknown header fields are ignored when parsing and
/// never emitted when encoding. The header must be a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenHeader {
    #[serde(rename = "alg")]
    pub(crate) algorithm: String,
}

impl TokenHeader {
    pub(crate) fn new(algorithm: AlgorithmId) -> Self {
        Self {
            algorithm: algorithm.as_str().to_string(),
        }
    }

    /// Parse algorithm from header
    pub fn parse_algorithm(&self) -> Result<AlgorithmId> {
        self.algorithm.parse()
    }

    /// Get algorithm as string
    pub fn algorithm_str(&self) -> &str {
        &self.algorithm
    }
}

impl<'de> Deserialize<'de> for TokenHeader {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = match Value::deserialize(deserializer)? {
            Value::Object(fields) => fields,
            other => {
                return Err(de::Error::invalid_type(unexpected(&other), &"a JSON object"));
            }
        };

        match fields.remove("alg") {
            Some(Value::String(algorithm)) => Ok(Self { algorithm }),
            Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"a string")),
            None => Err(de::Error::missing_field("alg")),
        }
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_header_serializes_alg_only() {
        let header = TokenHeader::new(AlgorithmId::HS256);
        assert_eq!(serde_json::to_string(&header).unwrap(), r#"{"alg":"HS256"}"#);
    }

    #[test]
    fn test_header_ignores_unknown_fields() {
        let header: TokenHeader =
            serde_json::from_str(r#"{"alg":"HS384","typ":"JWT","kid":"k1"}"#).unwrap();
        assert_eq!(header.parse_algorithm().unwrap(), AlgorithmId::HS384);
    }

    #[test]
    fn test_header_requires_string_alg() {
        assert!(serde_json::from_str::<TokenHeader>(r#"{"typ":"JWT"}"#).is_err());
        assert!(serde_json::from_str::<TokenHeader>(r#"{"alg":256}"#).is_err());
        assert!(serde_json::from_str::<TokenHeader>(r#"{"alg":null}"#).is_err());
    }

    #[test]
    fn test_header_must_be_object() {
        for input in [r#"["HS256"]"#, "[]", "null", r#""HS256""#, "42"] {
            assert!(
                serde_json::from_str::<TokenHeader>(input).is_err(),
                "{input} parsed as a header"
            );
        }
    }

    #[test]
    fn test_unknown_algorithm() {
        let header: TokenHeader = serde_json::from_str(r#"{"alg":"none"}"#).unwrap();
        assert!(matches!(
            header.parse_algorithm(),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }
}
