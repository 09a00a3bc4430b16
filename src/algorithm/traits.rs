use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};
use crate::keys::SecretKey;

/// Core algorithm trait that all token signature algorithms implement
///
/// This is the signing-strategy seam: HMAC is the only family implemented,
/// asymmetric families would plug in here.
pub trait Algorithm {
    /// The algorithm identifier
    fn id(&self) -> AlgorithmId;

    /// Compute the raw signature bytes over `signing_input` (header.payload)
    fn sign(&self, signing_input: &str, key: &SecretKey) -> Result<Vec<u8>>;

    /// Verify a signature
    ///
    /// # Arguments
    /// * `signing_input` - The data that was signed (header.payload)
    /// * `signature` - The Base64URL-encoded signature
    /// * `key` - The key to use for verification
    fn verify(&self, signing_input: &str, signature: &str, key: &SecretKey) -> Result<()>;
}

/// Type alias for boxed algorithm trait objects
pub type SignatureAlgorithm = Box<dyn Algorithm + Send + Sync>;

/// Get the signing strategy for the given algorithm ID
///
/// RSA identifiers are recognized but have no strategy and fail with
/// [`Error::UnsupportedAlgorithm`].
pub fn get_algorithm(algorithm: AlgorithmId) -> Result<SignatureAlgorithm> {
    match algorithm {
        AlgorithmId::HS256 => Ok(Box::new(super::hmac::HS256)),
        AlgorithmId::HS384 => Ok(Box::new(super::hmac::HS384)),
        AlgorithmId::HS512 => Ok(Box::new(super::hmac::HS512)),
        AlgorithmId::RS256 | AlgorithmId::RS384 | AlgorithmId::RS512 => Err(
            Error::UnsupportedAlgorithm(format!("{algorithm} (no signing implementation)")),
        ),
    }
}
