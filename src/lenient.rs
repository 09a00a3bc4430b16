//! Lossy decoding for call sites that only care whether claims are present
//!
//! [`LenientDecoder::decode_or_empty`] turns every verification failure into an
//! empty [`ClaimSet`]. Callers cannot tell a missing token from an expired or
//! forged one; use [`Verifier::verify`] wherever that difference matters.

use crate::claims::ClaimSet;
use crate::verifier::Verifier;

/// Adapter over [`Verifier`] that never fails
#[derive(Debug, Clone)]
pub struct LenientDecoder {
    verifier: Verifier,
}

impl LenientDecoder {
    pub fn new(verifier: Verifier) -> Self {
        Self { verifier }
    }

    /// Verify `token`, returning its claims or an empty claim set
    ///
    /// An absent token yields an empty claim set. Failures are logged at
    /// `debug` level and otherwise discarded.
    ///
    /// # Example
    /// ```
    /// use jwtseal::{LenientDecoder, SecretKey, Verifier};
    ///
    /// let decoder = LenientDecoder::new(Verifier::new(SecretKey::new(b"secret").unwrap()));
    /// assert!(decoder.decode_or_empty(Some("a.b")).is_empty());
    /// assert!(decoder.decode_or_empty(None).is_empty());
    /// ```
    pub fn decode_or_empty(&self, token: Option<&str>) -> ClaimSet {
        let Some(token) = token else {
            return ClaimSet::new();
        };

        match self.verifier.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(kind = e.kind(), "token discarded, returning empty claims");
                ClaimSet::new()
            }
        }
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }
}

impl From<Verifier> for LenientDecoder {
    fn from(verifier: Verifier) -> Self {
        Self::new(verifier)
    }
}
