//! One secret, one encoder, one verifier
//!
//! [`JwtEngine`] is the usual entry point for services that both issue and
//! accept tokens. It is configured once and then shared; all operations take
//! `&self`.

use crate::algorithm::{AlgorithmId, AlgorithmPolicy};
use crate::claims::ClaimSet;
use crate::config::EngineConfig;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::keys::SecretKey;
use crate::lenient::LenientDecoder;
use crate::verifier::Verifier;
use std::time::Duration;

/// Token engine bundling an [`Encoder`] and a [`Verifier`] over one secret
///
/// # Example
/// ```
/// use jwtseal::{ClaimSet, JwtEngine, TimeUnit};
///
/// let engine = JwtEngine::builder()
///     .secret(b"secret")
///     .issuer("svc-a")
///     .build()
///     .unwrap();
///
/// let claims = ClaimSet::new().with("id", "alice").unwrap();
/// let token = engine.encode(&claims, Some(TimeUnit::Seconds.duration(30))).unwrap();
///
/// let verified = engine.verify(&token).unwrap();
/// assert_eq!(verified.get("id"), claims.get("id"));
/// ```
#[derive(Debug, Clone)]
pub struct JwtEngine {
    encoder: Encoder,
    verifier: Verifier,
}

impl JwtEngine {
    /// HS256 engine with no issuer or audience expectations
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self> {
        Self::builder().secret(secret).build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Build an engine from declarative configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let mut builder = Self::builder();
        builder
            .secret(config.secret.as_bytes())
            .algorithm(parse_algorithm(&config.algorithm)?)
            .leeway(Duration::from_millis(config.leeway_ms));

        if let Some(issuer) = &config.issuer {
            builder.issuer(issuer.as_str());
        }
        if let Some(audience) = &config.audience {
            builder.audience(audience.as_str());
        }
        if let Some(allowed) = &config.allowed_algorithms {
            let allowed = allowed
                .iter()
                .map(|alg| parse_algorithm(alg))
                .collect::<Result<Vec<_>>>()?;
            if allowed.is_empty() {
                return Err(Error::Config("allowed_algorithms must not be empty".into()));
            }
            builder.algorithms(AlgorithmPolicy::allow_only(allowed));
        }

        builder.build()
    }

    /// Encode claims into a signed token, see [`Encoder::encode`]
    pub fn encode(&self, claims: &ClaimSet, ttl: Option<Duration>) -> Result<String> {
        self.encoder.encode(claims, ttl)
    }

    /// Verify a token and return its claims, see [`Verifier::verify`]
    pub fn verify(&self, token: &str) -> Result<ClaimSet> {
        self.verifier.verify(token)
    }

    /// Verify a token, returning an empty claim set on any failure
    ///
    /// See [`LenientDecoder`] for the trade-offs; prefer [`verify`](Self::verify).
    pub fn decode_or_empty(&self, token: Option<&str>) -> ClaimSet {
        self.lenient().decode_or_empty(token)
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    /// A [`LenientDecoder`] over this engine's verifier
    pub fn lenient(&self) -> LenientDecoder {
        LenientDecoder::new(self.verifier.clone())
    }
}

/// Builder for [`JwtEngine`]
#[derive(Clone, Default)]
pub struct EngineBuilder {
    secret: Option<Vec<u8>>,
    algorithm: Option<AlgorithmId>,
    issuer: Option<String>,
    audience: Option<String>,
    leeway: Option<Duration>,
    algorithms: Option<AlgorithmPolicy>,
}

impl EngineBuilder {
    /// Configure the shared secret (required)
    pub fn secret(&mut self, secret: impl AsRef<[u8]>) -> &mut Self {
        self.secret = Some(secret.as_ref().to_vec());
        self
    }

    /// Configure the algorithm used when encoding (default: HS256)
    pub fn algorithm(&mut self, algorithm: AlgorithmId) -> &mut Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Configure the expected issuer
    pub fn issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Configure the expected audience
    pub fn audience(&mut self, audience: impl Into<String>) -> &mut Self {
        self.audience = Some(audience.into());
        self
    }

    /// Configure expiration leeway
    pub fn leeway(&mut self, leeway: Duration) -> &mut Self {
        self.leeway = Some(leeway);
        self
    }

    /// Configure the algorithms accepted when verifying
    pub fn algorithms(&mut self, policy: AlgorithmPolicy) -> &mut Self {
        self.algorithms = Some(policy);
        self
    }

    /// Validate the configuration and build the engine
    ///
    /// Fails with [`Error::Config`] when the secret is missing or empty, or the
    /// leeway exceeds 5 minutes, and with [`Error::UnsupportedAlgorithm`] when
    /// the encoding algorithm has no signing implementation.
    pub fn build(&self) -> Result<JwtEngine> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| Error::Config("secret key is required".into()))?;
        let key = SecretKey::new(secret)?;

        let algorithm = self.algorithm.unwrap_or(AlgorithmId::HS256);
        let encoder = Encoder::new(key.clone()).with_algorithm(algorithm)?;

        let mut verifier = Verifier::new(key);
        if let Some(issuer) = &self.issuer {
            verifier = verifier.expected_issuer(issuer.as_str());
        }
        if let Some(audience) = &self.audience {
            verifier = verifier.expected_audience(audience.as_str());
        }
        if let Some(leeway) = self.leeway {
            verifier = verifier.leeway(leeway)?;
        }
        if let Some(policy) = &self.algorithms {
            verifier = verifier.algorithms(policy.clone());
        }

        tracing::debug!(
            alg = %algorithm,
            issuer = ?self.issuer,
            audience = ?self.audience,
            "jwt engine configured"
        );

        Ok(JwtEngine { encoder, verifier })
    }
}

fn parse_algorithm(name: &str) -> Result<AlgorithmId> {
    name.trim()
        .parse()
        .map_err(|_| Error::Config(format!("unknown algorithm '{name}'")))
}
