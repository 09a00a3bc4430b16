use crate::algorithm::{Algorithm, AlgorithmId};
use crate::error::{Error, Result};
use crate::keys::SecretKey;
use crate::limits::MAX_DECODED_SIGNATURE_SIZE;
use crate::utils::base64url;

use constant_time_eq::constant_time_eq;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
pub struct HS512;

impl Algorithm for HS256 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::HS256
    }

    fn sign(&self, signing_input: &str, key: &SecretKey) -> Result<Vec<u8>> {
        compute_mac::<HmacSha256>(signing_input, key.as_bytes())
    }

    fn verify(&self, signing_input: &str, signature: &str, key: &SecretKey) -> Result<()> {
        verify_mac::<HmacSha256>(signing_input, signature, key.as_bytes())
    }
}

impl Algorithm for HS384 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::HS384
    }

    fn sign(&self, signing_input: &str, key: &SecretKey) -> Result<Vec<u8>> {
        compute_mac::<HmacSha384>(signing_input, key.as_bytes())
    }

    fn verify(&self, signing_input: &str, signature: &str, key: &SecretKey) -> Result<()> {
        verify_mac::<HmacSha384>(signing_input, signature, key.as_bytes())
    }
}

impl Algorithm for HS512 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::HS512
    }

    fn sign(&self, signing_input: &str, key: &SecretKey) -> Result<Vec<u8>> {
        compute_mac::<HmacSha512>(signing_input, key.as_bytes())
    }

    fn verify(&self, signing_input: &str, signature: &str, key: &SecretKey) -> Result<()> {
        verify_mac::<HmacSha512>(signing_input, signature, key.as_bytes())
    }
}

/// Compute the HMAC digest of `signing_input`
fn compute_mac<M: Mac + KeyInit>(signing_input: &str, secret: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| Error::Config("invalid HMAC key length".into()))?;
    mac.update(signing_input.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Verify an HMAC signature with constant-time comparison
///
/// An undecodable signature segment cannot match any digest and is reported as
/// [`Error::SignatureInvalid`].
fn verify_mac<M: Mac + KeyInit>(signing_input: &str, signature: &str, secret: &[u8]) -> Result<()> {
    let provided_signature = base64url::decode_bytes(signature, MAX_DECODED_SIGNATURE_SIZE)
        .map_err(|_| Error::SignatureInvalid)?;
    let expected_signature = compute_mac::<M>(signing_input, secret)?;

    if provided_signature.len() != expected_signature.len() {
        return Err(Error::SignatureInvalid);
    }

    if constant_time_eq(&provided_signature, &expected_signature) {
        Ok(())
    } else {
        Err(Error::SignatureInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNING_INPUT: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

    fn key(secret: &str) -> SecretKey {
        SecretKey::new(secret).unwrap()
    }

    #[test]
    fn test_digest_lengths() {
        let key = key("your-256-bit-secret");
        assert_eq!(HS256.sign(SIGNING_INPUT, &key).unwrap().len(), 32);
        assert_eq!(HS384.sign(SIGNING_INPUT, &key).unwrap().len(), 48);
        assert_eq!(HS512.sign(SIGNING_INPUT, &key).unwrap().len(), 64);
    }

    #[test]
    fn test_hs256_known_vector() {
        // RFC 4231 test case 2
        let key = key("Jefe");
        let digest = compute_mac::<HmacSha256>("what do ya want for nothing?", key.as_bytes())
            .unwrap();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(
            hex,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hs256_valid_signature() {
        let key = key("your-256-bit-secret");
        let signature = base64url::encode_bytes(&HS256.sign(SIGNING_INPUT, &key).unwrap());
        assert!(HS256.verify(SIGNING_INPUT, &signature, &key).is_ok());
    }

    #[test]
    fn test_hs384_valid_signature() {
        let key = key("your-384-bit-secret-needs-to-be-longer");
        let signature = base64url::encode_bytes(&HS384.sign(SIGNING_INPUT, &key).unwrap());
        assert!(HS384.verify(SIGNING_INPUT, &signature, &key).is_ok());
    }

    #[test]
    fn test_hs512_valid_signature() {
        let key = key("your-512-bit-secret-needs-to-be-even-longer-than-384-bit");
        let signature = base64url::encode_bytes(&HS512.sign(SIGNING_INPUT, &key).unwrap());
        assert!(HS512.verify(SIGNING_INPUT, &signature, &key).is_ok());
    }

    #[test]
    fn test_wrong_secret() {
        let signature =
            base64url::encode_bytes(&HS256.sign(SIGNING_INPUT, &key("secret")).unwrap());
        let result = HS256.verify(SIGNING_INPUT, &signature, &key("wrong-secret"));
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_wrong_length_signature() {
        let key = key("secret");
        let short = base64url::encode("wrong");
        assert!(matches!(
            HS256.verify(SIGNING_INPUT, &short, &key),
            Err(Error::SignatureInvalid)
        ));
        // HS256 digest presented to HS512
        let hs256 = base64url::encode_bytes(&HS256.sign(SIGNING_INPUT, &key).unwrap());
        assert!(matches!(
            HS512.verify(SIGNING_INPUT, &hs256, &key),
            Err(Error::SignatureInvalid)
        ));
    }

    #[test]
    fn test_undecodable_signature() {
        let key = key("secret");
        assert!(matches!(
            HS256.verify(SIGNING_INPUT, "!!!", &key),
            Err(Error::SignatureInvalid)
        ));
    }

    #[test]
    fn test_tampered_input() {
        let key = key("secret");
        let signature = base64url::encode_bytes(&HS256.sign(SIGNING_INPUT, &key).unwrap());
        let tampered = format!("{SIGNING_INPUT}x");
        assert!(matches!(
            HS256.verify(&tampered, &signature, &key),
            Err(Error::SignatureInvalid)
        ));
    }
}
