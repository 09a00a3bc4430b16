mod traits;

pub mod hmac;

pub use traits::{get_algorithm, Algorithm, SignatureAlgorithm};

use crate::error::{Error, Result};
use std::str::FromStr;

/// Algorithm identifier from a token header
///
/// Only the HMAC variants have a signing strategy. The RSA variants are
/// recognized so that tokens declaring them are rejected as unsupported
/// rather than malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// HMAC with SHA-256
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,

    /// RSA with SHA-256 (recognized, not implemented)
    RS256,

    /// RSA with SHA-384 (recognized, not implemented)
    RS384,

    /// RSA with SHA-512 (recognized, not implemented)
    RS512,
}

impl AlgorithmId {
    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",
            AlgorithmId::RS256 => "RS256",
            AlgorithmId::RS384 => "RS384",
            AlgorithmId::RS512 => "RS512",
        }
    }

    /// Check if algorithm is HMAC-based (symmetric)
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            AlgorithmId::HS256 | AlgorithmId::HS384 | AlgorithmId::HS512
        )
    }

    /// Check if a signing strategy exists for this algorithm
    pub fn is_implemented(&self) -> bool {
        self.is_symmetric()
    }
}

impl FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "HS256" => Ok(AlgorithmId::HS256),
            "HS384" => Ok(AlgorithmId::HS384),
            "HS512" => Ok(AlgorithmId::HS512),
            "RS256" => Ok(AlgorithmId::RS256),
            "RS384" => Ok(AlgorithmId::RS384),
            "RS512" => Ok(AlgorithmId::RS512),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy for allowed algorithms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmPolicy {
    allowed: Vec<AlgorithmId>,
}

impl AlgorithmPolicy {
    /// Create a policy that allows only specific algorithms
    ///
    /// Identifiers without a signing strategy are accepted here but can never
    /// verify; an empty list rejects every token.
    pub fn allow_only(algorithms: Vec<AlgorithmId>) -> Self {
        Self {
            allowed: algorithms,
        }
    }

    /// Policy that allows only HS256
    pub fn hs256_only() -> Self {
        Self::allow_only(vec![AlgorithmId::HS256])
    }

    /// Policy that allows only HS384
    pub fn hs384_only() -> Self {
        Self::allow_only(vec![AlgorithmId::HS384])
    }

    /// Policy that allows only HS512
    pub fn hs512_only() -> Self {
        Self::allow_only(vec![AlgorithmId::HS512])
    }

    /// Policy that allows any HMAC algorithm (HS256, HS384, HS512)
    pub fn hmac_any() -> Self {
        Self::allow_only(vec![
            AlgorithmId::HS256,
            AlgorithmId::HS384,
            AlgorithmId::HS512,
        ])
    }

    /// Check if an algorithm is allowed
    pub fn is_allowed(&self, algorithm: &AlgorithmId) -> bool {
        self.allowed.contains(algorithm)
    }

    /// Validate algorithm against policy
    pub fn validate(&self, algorithm: &AlgorithmId) -> Result<()> {
        if self.is_allowed(algorithm) {
            Ok(())
        } else {
            Err(Error::UnsupportedAlgorithm(format!(
                "{algorithm} (allowed: {:?})",
                self.allowed.iter().map(AlgorithmId::as_str).collect::<Vec<_>>()
            )))
        }
    }

    /// Get list of allowed algorithms
    pub fn allowed_algorithms(&self) -> &[AlgorithmId] {
        &self.allowed
    }
}

impl Default for AlgorithmPolicy {
    fn default() -> Self {
        Self::hmac_any()
    }
}
