//! Token verification
//!
//! The verifier runs a fixed sequence of checks and stops at the first
//! failure:
//!
//! ```text
//! split into 3 segments, parse header      -> MalformedToken
//!     │
//! resolve `alg` against the policy         -> UnsupportedAlgorithm
//!     │
//! parse payload into a ClaimSet            -> MalformedToken
//!     │
//! recompute and compare HMAC               -> SignatureInvalid
//!     │
//! exp, then iss, then aud                  -> TokenExpired / IssuerMismatch / AudienceMismatch
//!     ▼
//! ClaimSet
//! ```

use crate::algorithm::{get_algorithm, AlgorithmPolicy};
use crate::claims::{validate_claims, ClaimSet, ClaimsValidation};
use crate::error::Result;
use crate::keys::SecretKey;
use crate::token::ParsedToken;
use crate::utils::time::now_millis;
use std::time::Duration;

/// Token verifier
///
/// Configured once and reusable across threads; every call is a pure function
/// of the token, the configuration, and the current time.
#[derive(Debug, Clone)]
pub struct Verifier {
    key: SecretKey,
    algorithms: AlgorithmPolicy,
    claims: ClaimsValidation,
}

impl Verifier {
    /// Create a verifier accepting any HMAC algorithm with no issuer or
    /// audience expectations
    pub fn new(key: SecretKey) -> Self {
        Self {
            key,
            algorithms: AlgorithmPolicy::default(),
            claims: ClaimsValidation::default(),
        }
    }

    /// Reject tokens whose `iss` claim is present and differs from `issuer`
    pub fn expected_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.claims = self.claims.expect_issuer(issuer);
        self
    }

    /// Reject tokens whose `aud` claim is present and does not include `audience`
    pub fn expected_audience(mut self, audience: impl Into<String>) -> Self {
        self.claims = self.claims.expect_audience(audience);
        self
    }

    /// Restrict the accepted algorithms
    pub fn algorithms(mut self, policy: AlgorithmPolicy) -> Self {
        self.algorithms = policy;
        self
    }

    /// Tolerate clock skew on `exp`, at most 5 minutes
    pub fn leeway(mut self, leeway: Duration) -> Result<Self> {
        self.claims = self.claims.leeway(leeway)?;
        Ok(self)
    }

    /// Replace the claims validation configuration
    pub fn with_claims_validation(mut self, config: ClaimsValidation) -> Self {
        self.claims = config;
        self
    }

    pub fn claims_validation(&self) -> &ClaimsValidation {
        &self.claims
    }

    pub fn algorithm_policy(&self) -> &AlgorithmPolicy {
        &self.algorithms
    }

    /// Verify a token and return its claims
    ///
    /// # Example
    /// ```
    /// use jwtseal::{ClaimSet, Encoder, Error, SecretKey, Verifier};
    ///
    /// let key = SecretKey::new(b"secret").unwrap();
    /// let token = Encoder::new(key.clone())
    ///     .encode(&ClaimSet::new().with("iss", "svc-a").unwrap(), None)
    ///     .unwrap();
    ///
    /// let verifier = Verifier::new(key).expected_issuer("svc-b");
    /// assert!(matches!(verifier.verify(&token), Err(Error::IssuerMismatch { .. })));
    /// ```
    pub fn verify(&self, token: &str) -> Result<ClaimSet> {
        self.verify_at(token, now_millis())
    }

    /// Verify a token as of `now` (milliseconds since the Unix epoch)
    pub(crate) fn verify_at(&self, token: &str, now: i64) -> Result<ClaimSet> {
        self.run(token, now).inspect_err(|e| {
            tracing::debug!(kind = e.kind(), error = %e, "token rejected");
        })
    }

    fn run(&self, token: &str, now: i64) -> Result<ClaimSet> {
        let parsed = ParsedToken::from_string(token)?;

        let algorithm_id = parsed.algorithm()?;
        self.algorithms.validate(&algorithm_id)?;
        let algorithm = get_algorithm(algorithm_id)?;

        let claims = parsed.claims()?;

        algorithm.verify(&parsed.signing_input(), parsed.signature(), &self.key)?;

        validate_claims(&claims, &self.claims, now)?;

        Ok(claims)
    }
}
