//! Declarative engine configuration
//!
//! [`EngineConfig`] can be embedded in an application's own configuration,
//! loaded from TOML, and overridden from the environment:
//!
//! ```toml
//! secret = "change-me"
//! algorithm = "HS256"
//! issuer = "svc-a"
//! audience = "api"
//! leeway_ms = 0
//! allowed_algorithms = ["HS256"]
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;

/// Environment variable overriding [`EngineConfig::secret`]
pub const ENV_SECRET: &str = "JWTSEAL_SECRET";
/// Environment variable overriding [`EngineConfig::algorithm`]
pub const ENV_ALGORITHM: &str = "JWTSEAL_ALGORITHM";
/// Environment variable overriding [`EngineConfig::issuer`]
pub const ENV_ISSUER: &str = "JWTSEAL_ISSUER";
/// Environment variable overriding [`EngineConfig::audience`]
pub const ENV_AUDIENCE: &str = "JWTSEAL_AUDIENCE";
/// Environment variable overriding [`EngineConfig::leeway_ms`]
pub const ENV_LEEWAY_MS: &str = "JWTSEAL_LEEWAY_MS";

fn default_algorithm() -> String {
    "HS256".to_string()
}

/// Engine settings
///
/// Values are checked when the engine is built, see
/// [`JwtEngine::from_config`](crate::JwtEngine::from_config).
#[derive(Clone, Deserialize)]
pub struct EngineConfig {
    /// Shared HMAC secret (required, non-empty)
    #[serde(default)]
    pub secret: String,

    /// Algorithm used when encoding
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Expected issuer when verifying
    #[serde(default)]
    pub issuer: Option<String>,

    /// Expected audience when verifying
    #[serde(default)]
    pub audience: Option<String>,

    /// Expiration leeway in milliseconds
    #[serde(default)]
    pub leeway_ms: u64,

    /// Algorithms accepted when verifying; all HMAC variants when unset
    #[serde(default)]
    pub allowed_algorithms: Option<Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            algorithm: default_algorithm(),
            issuer: None,
            audience: None,
            leeway_ms: 0,
            allowed_algorithms: None,
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_ms", &self.leeway_ms)
            .field("allowed_algorithms", &self.allowed_algorithms)
            .finish()
    }
}

impl EngineConfig {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply `JWTSEAL_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Unset variables leave the current value in place.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup(ENV_SECRET) {
            self.secret = secret;
        }
        if let Some(algorithm) = lookup(ENV_ALGORITHM) {
            self.algorithm = algorithm;
        }
        if let Some(issuer) = lookup(ENV_ISSUER) {
            self.issuer = Some(issuer);
        }
        if let Some(audience) = lookup(ENV_AUDIENCE) {
            self.audience = Some(audience);
        }
        if let Some(leeway) = lookup(ENV_LEEWAY_MS) {
            self.leeway_ms = leeway.trim().parse().map_err(|e| {
                Error::Config(format!("{ENV_LEEWAY_MS} must be an integer: {e}"))
            })?;
        }
        Ok(())
    }
}
