//! # jwtseal - Compact HMAC-signed JSON Web Tokens
//!
//! **jwtseal** issues and verifies compact `header.payload.signature` tokens
//! signed with a shared secret. Each segment is Base64URL without padding; the
//! header and payload are JSON objects.
//!
//! ## Quick Start
//!
//! ```
//! use jwtseal::{ClaimSet, JwtEngine, TimeUnit};
//!
//! let engine = JwtEngine::new(b"secret").unwrap();
//!
//! let claims = ClaimSet::new()
//!     .with("id", "alice")
//!     .unwrap()
//!     .with("time", 1234)
//!     .unwrap();
//!
//! let token = engine
//!     .encode(&claims, Some(TimeUnit::Minutes.duration(10)))
//!     .unwrap();
//!
//! let verified = engine.verify(&token).unwrap();
//! assert_eq!(verified.get("id"), claims.get("id"));
//! ```
//!
//! ## Verification Order
//!
//! [`Verifier::verify`] reports the first failing check only:
//!
//! ```text
//! structure and header        MalformedToken
//!     │
//! header `alg`                UnsupportedAlgorithm
//!     │
//! payload JSON                MalformedToken
//!     │
//! HMAC signature              SignatureInvalid
//!     │
//! exp                         TokenExpired
//!     │
//! iss                         IssuerMismatch
//!     │
//! aud                         AudienceMismatch
//!     ▼
//! ClaimSet
//! ```
//!
//! Signatures are compared in constant time. The header's `alg` is checked
//! against an [`AlgorithmPolicy`] before any key material is used; `none` and
//! algorithms without a signing implementation are always rejected.
//!
//! ## Time
//!
//! `exp` is an integer number of **milliseconds** since the Unix epoch. A token
//! is expired once `now >= exp`. An absent `exp`, or `exp` equal to `0`, means
//! the token never expires.
//!
//! ## Algorithm Support
//!
//! - **HMAC**: HS256, HS384, HS512
//! - **RSA**: RS256, RS384, RS512 are recognised by name and reported as
//!   [`Error::UnsupportedAlgorithm`]
//!
//! ## Logging
//!
//! Rejections are emitted as `tracing` events at `debug` level with the error
//! kind. Secrets and token contents are never logged.

// Core modules
pub mod error;
pub mod utils;
pub(crate) mod limits;

// Cryptography
pub mod algorithm;
pub mod keys;

// Token model
pub mod claims;
pub mod token;

// Encoding and verification
pub mod encoder;
pub mod verifier;
pub mod lenient;

// Configuration
pub mod config;
pub mod engine;

pub use algorithm::{AlgorithmId, AlgorithmPolicy};
pub use claims::{Audience, ClaimSet, ClaimsValidation};
pub use config::EngineConfig;
pub use encoder::Encoder;
pub use engine::{EngineBuilder, JwtEngine};
pub use error::{Error, Result};
pub use keys::SecretKey;
pub use lenient::LenientDecoder;
pub use token::{ParsedToken, TokenHeader};
pub use utils::time::TimeUnit;
pub use verifier::Verifier;
