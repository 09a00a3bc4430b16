use crate::algorithm::AlgorithmId;
use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::limits::{MAX_ALG_LENGTH, MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_TOKEN_LENGTH};
use crate::token::TokenHeader;
use crate::utils::json::decode_segment;

/// A token that has been split and whose header has been parsed
///
/// Nothing here is trusted yet. The payload is decoded on demand so that the
/// algorithm can be resolved before any claim is looked at.
#[derive(Debug)]
pub struct ParsedToken<'a> {
    header: TokenHeader,
    header_b64: &'a str,
    payload_b64: &'a str,
    signature_b64: &'a str,
}

impl<'a> ParsedToken<'a> {
    /// Split a token into its three segments and parse the header
    ///
    /// # Example
    /// ```
    /// use jwtseal::ParsedToken;
    ///
    /// let parsed = ParsedToken::from_string("eyJhbGciOiJIUzI1NiJ9.e30.c2ln").unwrap();
    /// assert_eq!(parsed.header().algorithm_str(), "HS256");
    /// ```
    pub fn from_string(token: &'a str) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::MalformedToken("token is empty".into()));
        }

        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::MalformedToken(format!(
                "token too large: {} bytes (maximum: {MAX_TOKEN_LENGTH} bytes)",
                token.len()
            )));
        }

        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::MalformedToken(
                "expected three segments separated by '.'".into(),
            ));
        };

        let header: TokenHeader = decode_segment(header_b64, MAX_DECODED_HEADER_SIZE, "header")?;

        // No supported name is this long; the value itself is not echoed
        if header.algorithm.len() > MAX_ALG_LENGTH {
            return Err(Error::UnsupportedAlgorithm(format!(
                "<{} bytes, maximum {MAX_ALG_LENGTH}>",
                header.algorithm.len()
            )));
        }

        Ok(Self {
            header,
            header_b64,
            payload_b64,
            signature_b64,
        })
    }

    /// Get the token header
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Get the algorithm from the header
    pub fn algorithm(&self) -> Result<AlgorithmId> {
        self.header.parse_algorithm()
    }

    /// Decode and parse the payload
    ///
    /// Note: the claims are not trusted until the signature is verified.
    pub fn claims(&self) -> Result<ClaimSet> {
        decode_segment(self.payload_b64, MAX_DECODED_PAYLOAD_SIZE, "payload")
    }

    /// Get the signing input (header.payload)
    pub(crate) fn signing_input(&self) -> String {
        format!("{}.{}", self.header_b64, self.payload_b64)
    }

    /// Get the Base64URL signature segment
    pub(crate) fn signature(&self) -> &'a str {
        self.signature_b64
    }
}
