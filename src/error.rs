//! Errors for jwtseal
//!
//! Verification reports exactly one failure: the first check that fails in the
//! fixed verification order. Lower-level errors (Base64URL, JSON) are folded into
//! these variants at the boundary where they occur.

use thiserror::Error;

/// jwtseal Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    Config(String),

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    UnsupportedAlgorithm(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Token expired at {expired_at} (now: {now}, leeway: {leeway}ms)")]
    TokenExpired {
        expired_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token issuer mismatch: expected '{expected}', found '{found}'")]
    IssuerMismatch { expected: String, found: String },

    #[error("Token audience mismatch: expected '{expected}', found {found:?}")]
    AudienceMismatch {
        expected: String,
        found: Vec<String>,
    },

    #[error("Invalid claim '{claim}': {reason}")]
    InvalidClaim { claim: String, reason: String },

    // ============================================================================
    // Encoding Errors
    // ============================================================================
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl Error {
    /// Short, stable name of the failure kind, suitable for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::MalformedToken(_) => "malformed_token",
            Error::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            Error::SignatureInvalid => "signature_invalid",
            Error::TokenExpired { .. } => "token_expired",
            Error::IssuerMismatch { .. } => "issuer_mismatch",
            Error::AudienceMismatch { .. } => "audience_mismatch",
            Error::InvalidClaim { .. } => "invalid_claim",
            Error::Encoding(_) => "encoding",
        }
    }
}

/// Result type alias for jwtseal operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::SignatureInvalid.to_string(),
            "Signature verification failed"
        );
        assert_eq!(
            Error::UnsupportedAlgorithm("RS256".into()).to_string(),
            "Algorithm 'RS256' is not supported"
        );
        let err = Error::IssuerMismatch {
            expected: "svc-b".into(),
            found: "svc-a".into(),
        };
        assert_eq!(
            err.to_string(),
            "Token issuer mismatch: expected 'svc-b', found 'svc-a'"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(Error::MalformedToken("x".into()).kind(), "malformed_token");
        assert_eq!(
            Error::TokenExpired {
                expired_at: 1,
                now: 2,
                leeway: 0
            }
            .kind(),
            "token_expired"
        );
    }
}
