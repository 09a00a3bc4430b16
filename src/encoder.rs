//! Token encoding
//!
//! Builds `header.payload.signature` from a claim set and a secret.

use crate::algorithm::{get_algorithm, AlgorithmId};
use crate::claims::ClaimSet;
use crate::error::Result;
use crate::keys::SecretKey;
use crate::token::TokenHeader;
use crate::utils::base64url;
use crate::utils::json::encode_segment;
use crate::utils::time::{expiration_from, now_millis};
use std::time::Duration;

/// Token encoder
///
/// Configured once with a secret and an algorithm, then reusable for any
/// number of tokens. Cloning is cheap; the secret is shared.
#[derive(Debug, Clone)]
pub struct Encoder {
    key: SecretKey,
    algorithm: AlgorithmId,
}

impl Encoder {
    /// Create an HS256 encoder
    pub fn new(key: SecretKey) -> Self {
        Self {
            key,
            algorithm: AlgorithmId::HS256,
        }
    }

    /// Use another default algorithm
    ///
    /// Fails with [`Error::UnsupportedAlgorithm`](crate::Error::UnsupportedAlgorithm)
    /// for algorithms without a signing implementation.
    pub fn with_algorithm(mut self, algorithm: AlgorithmId) -> Result<Self> {
        get_algorithm(algorithm)?;
        self.algorithm = algorithm;
        Ok(self)
    }

    /// The algorithm written to every header
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Encode claims into a signed token
    ///
    /// When `ttl` is given, `exp` is set to now + ttl (in milliseconds),
    /// replacing any `exp` already present in `claims`.
    ///
    /// # Example
    /// ```
    /// use jwtseal::{ClaimSet, Encoder, SecretKey, TimeUnit};
    ///
    /// let encoder = Encoder::new(SecretKey::new(b"secret").unwrap());
    /// let claims = ClaimSet::new().with("id", "alice").unwrap();
    /// let token = encoder.encode(&claims, Some(TimeUnit::Minutes.duration(5))).unwrap();
    /// assert_eq!(token.split('.').count(), 3);
    /// ```
    pub fn encode(&self, claims: &ClaimSet, ttl: Option<Duration>) -> Result<String> {
        match ttl {
            Some(ttl) => {
                let mut claims = claims.clone();
                claims.set_expiration(expiration_from(now_millis(), ttl)?);
                self.sign(&claims)
            }
            None => self.sign(claims),
        }
    }

    fn sign(&self, claims: &ClaimSet) -> Result<String> {
        let algorithm = get_algorithm(self.algorithm)?;

        let header_b64 = encode_segment(&TokenHeader::new(self.algorithm))?;
        let payload_b64 = encode_segment(claims)?;
        let signing_input = format!("{header_b64}.{payload_b64}");

        let signature = algorithm.sign(&signing_input, &self.key)?;
        tracing::trace!(alg = %self.algorithm, claims = claims.len(), "encoded token");

        Ok(format!("{signing_input}.{}", base64url::encode_bytes(&signature)))
    }
}
