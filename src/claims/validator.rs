use crate::claims::{ClaimSet, AUDIENCE};
use crate::error::{Error, Result};
use crate::limits::MAX_LEEWAY_MILLIS;
use serde_json::Value;
use std::time::Duration;

/// Configuration for reserved claim validation
///
/// Unset expectations impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsValidation {
    expected_issuer: Option<String>,
    expected_audience: Option<String>,
    leeway_millis: u64,
}

impl ClaimsValidation {
    /// Create a new validation config with no expectations and zero leeway
    pub fn new() -> Self {
        Self::default()
    }

    /// Require tokens carrying an `iss` claim to carry this issuer
    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }

    /// Require tokens carrying an `aud` claim to include this audience
    pub fn expect_audience(mut self, audience: impl Into<String>) -> Self {
        self.expected_audience = Some(audience.into());
        self
    }

    /// Set expiration leeway
    ///
    /// # Security
    /// Leeway is limited to 5 minutes to prevent effectively disabling
    /// expiration checks. Larger values fail with [`Error::Config`].
    pub fn leeway(mut self, leeway: Duration) -> Result<Self> {
        let millis = u64::try_from(leeway.as_millis()).unwrap_or(u64::MAX);
        if millis > MAX_LEEWAY_MILLIS {
            return Err(Error::Config(format!(
                "leeway too large: {millis}ms (maximum: {MAX_LEEWAY_MILLIS}ms)"
            )));
        }
        self.leeway_millis = millis;
        Ok(self)
    }

    pub fn expected_issuer(&self) -> Option<&str> {
        self.expected_issuer.as_deref()
    }

    pub fn expected_audience(&self) -> Option<&str> {
        self.expected_audience.as_deref()
    }

    pub fn leeway_millis(&self) -> u64 {
        self.leeway_millis
    }
}

/// Validate reserved claims at time `now` (milliseconds since the Unix epoch)
///
/// Checks run in a fixed order (expiration, issuer, audience) and the first
/// failure is returned.
pub(crate) fn validate_claims(claims: &ClaimSet, config: &ClaimsValidation, now: i64) -> Result<()> {
    // exp == 0 means "no expiration"
    if let Some(exp) = claims.expiration().filter(|exp| *exp != 0) {
        let leeway = i64::try_from(config.leeway_millis).unwrap_or(i64::MAX);
        if now >= exp.saturating_add(leeway) {
            return Err(Error::TokenExpired {
                expired_at: exp,
                now,
                leeway: config.leeway_millis,
            });
        }
    }

    if let (Some(expected), Some(found)) = (config.expected_issuer(), claims.issuer()) {
        if expected != found {
            return Err(Error::IssuerMismatch {
                expected: expected.into(),
                found: found.into(),
            });
        }
    }

    if let (Some(expected), Some(audience)) = (config.expected_audience(), claims.get(AUDIENCE)) {
        if !audience_matches(audience, expected) {
            return Err(Error::AudienceMismatch {
                expected: expected.into(),
                found: audience_values(audience),
            });
        }
    }

    Ok(())
}

/// `null` counts as absent; values other than strings never match
fn audience_matches(audience: &Value, expected: &str) -> bool {
    match audience {
        Value::Null => true,
        Value::String(aud) => aud == expected,
        Value::Array(items) => items.iter().any(|item| item.as_str() == Some(expected)),
        _ => false,
    }
}

fn audience_values(audience: &Value) -> Vec<String> {
    let render = |value: &Value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match audience {
        Value::Array(items) => items.iter().map(render).collect(),
        other => vec![render(other)],
    }
}
