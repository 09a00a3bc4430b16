//! Shared secret for HMAC signing and verification
//!
//! A `SecretKey` is validated once at construction (it must not be empty) and is
//! immutable afterwards. Clones share the same bytes, so an encoder and a verifier
//! built from one key never copy it. Rotating a key means building a new key.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Symmetric key for HMAC algorithms
#[derive(Clone)]
pub struct SecretKey {
    secret: Arc<[u8]>,
}

impl SecretKey {
    /// Create a secret key from bytes
    ///
    /// Fails with [`Error::Config`] when `secret` is empty.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(Error::Config("secret key must not be empty".into()));
        }
        Ok(Self {
            secret: secret.into(),
        })
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = Error;

    fn try_from(secret: &[u8]) -> Result<Self> {
        Self::new(secret)
    }
}

impl TryFrom<Vec<u8>> for SecretKey {
    type Error = Error;

    fn try_from(secret: Vec<u8>) -> Result<Self> {
        Self::new(secret)
    }
}

impl TryFrom<&str> for SecretKey {
    type Error = Error;

    fn try_from(secret: &str) -> Result<Self> {
        Self::new(secret)
    }
}

impl TryFrom<String> for SecretKey {
    type Error = Error;

    fn try_from(secret: String) -> Result<Self> {
        Self::new(secret)
    }
}
