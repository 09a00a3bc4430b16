//! Claim sets for tokens
//!
//! A [`ClaimSet`] maps claim names to JSON values. Three reserved claims carry
//! typed meaning:
//!
//! - `exp`: expiration time, integer milliseconds since the Unix epoch
//! - `iss`: issuer, a string
//! - `aud`: audience, a string or an array of strings
//!
//! `exp` and `iss` are type-checked whenever a claim set is built or parsed.
//! `aud` is type-checked when a claim set is built; a parsed token keeps its
//! `aud` as sent and it is judged only against an expected audience.
//! Every other claim passes through untouched.

mod validator;

pub use validator::ClaimsValidation;
pub(crate) use validator::validate_claims;

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Expiration claim name
pub const EXPIRATION: &str = "exp";
/// Issuer claim name
pub const ISSUER: &str = "iss";
/// Audience claim name
pub const AUDIENCE: &str = "aud";

/// Audience (aud) - identifies the recipients a token is intended for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// A single recipient
    Single(String),
    /// Several recipients
    Many(Vec<String>),
}

impl Audience {
    /// Check whether `expected` is one of the recipients
    pub fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == expected,
            Audience::Many(auds) => auds.iter().any(|aud| aud == expected),
        }
    }

    /// All recipients as a list
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Audience::Single(aud) => vec![aud.clone()],
            Audience::Many(auds) => auds.clone(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(aud) => Some(Audience::Single(aud.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Audience::Many),
            _ => None,
        }
    }
}

impl From<&str> for Audience {
    fn from(aud: &str) -> Self {
        Audience::Single(aud.to_string())
    }
}

impl From<String> for Audience {
    fn from(aud: String) -> Self {
        Audience::Single(aud)
    }
}

impl From<Vec<String>> for Audience {
    fn from(auds: Vec<String>) -> Self {
        Audience::Many(auds)
    }
}

impl From<Vec<&str>> for Audience {
    fn from(auds: Vec<&str>) -> Self {
        Audience::Many(auds.into_iter().map(str::to_string).collect())
    }
}

impl From<Audience> for Value {
    fn from(aud: Audience) -> Self {
        match aud {
            Audience::Single(aud) => Value::String(aud),
            Audience::Many(auds) => Value::Array(auds.into_iter().map(Value::String).collect()),
        }
    }
}

/// Token claims: a mapping from claim name to JSON value
///
/// `exp` and `iss` are guaranteed to be well typed, so their accessors never
/// fail. [`audience`](Self::audience) returns `None` for a parsed `aud` that is
/// neither a string nor an array of strings.
///
/// # Example
///
/// ```
/// use jwtseal::ClaimSet;
///
/// let mut claims = ClaimSet::new();
/// claims.insert("id", "alice").unwrap();
/// claims.set_issuer("svc-a");
///
/// assert_eq!(claims.issuer(), Some("svc-a"));
/// assert!(claims.insert("exp", "tomorrow").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a claim set from a JSON object, checking reserved claims
    pub fn from_map(claims: Map<String, Value>) -> Result<Self> {
        for (key, value) in &claims {
            check_reserved(key, value)?;
        }
        Ok(Self { claims })
    }

    /// Insert a claim, returning the previous value for that key
    ///
    /// Fails with [`Error::InvalidClaim`] when a reserved claim has the wrong type.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Option<Value>> {
        let key = key.into();
        let value = value.into();
        check_reserved(&key, &value)?;
        Ok(self.claims.insert(key, value))
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Get a claim value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }

    /// Remove a claim
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.claims.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.claims.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate over claims in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.claims.iter()
    }

    /// Expiration (exp) in milliseconds since the Unix epoch
    pub fn expiration(&self) -> Option<i64> {
        self.claims.get(EXPIRATION).and_then(Value::as_i64)
    }

    /// Set the expiration (exp) in milliseconds since the Unix epoch
    pub fn set_expiration(&mut self, millis: i64) {
        self.claims.insert(EXPIRATION.into(), Value::from(millis));
    }

    /// Issuer (iss)
    pub fn issuer(&self) -> Option<&str> {
        self.claims.get(ISSUER).and_then(Value::as_str)
    }

    pub fn set_issuer(&mut self, issuer: impl Into<String>) {
        self.claims.insert(ISSUER.into(), Value::String(issuer.into()));
    }

    /// Audience (aud), `None` when absent, `null`, or not string-typed
    pub fn audience(&self) -> Option<Audience> {
        self.claims.get(AUDIENCE).and_then(Audience::from_value)
    }

    pub fn set_audience(&mut self, audience: impl Into<Audience>) {
        self.claims.insert(AUDIENCE.into(), audience.into().into());
    }

    /// Consume the claim set, returning the underlying JSON object
    pub fn into_inner(self) -> Map<String, Value> {
        self.claims
    }
}

impl TryFrom<Map<String, Value>> for ClaimSet {
    type Error = Error;

    fn try_from(claims: Map<String, Value>) -> Result<Self> {
        Self::from_map(claims)
    }
}

impl TryFrom<Value> for ClaimSet {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(claims) => Self::from_map(claims),
            other => Err(Error::InvalidClaim {
                claim: "<root>".into(),
                reason: format!("claims must be a JSON object, found {}", json_type(&other)),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for ClaimSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let claims = match Value::deserialize(deserializer)? {
            Value::Object(claims) => claims,
            other => {
                return Err(serde::de::Error::custom(format!(
                    "claims must be a JSON object, found {}",
                    json_type(&other)
                )));
            }
        };
        for (key, value) in &claims {
            if key != AUDIENCE {
                check_reserved(key, value).map_err(serde::de::Error::custom)?;
            }
        }
        Ok(Self { claims })
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

/// Check the type of a reserved claim; other claims are accepted as-is
fn check_reserved(key: &str, value: &Value) -> Result<()> {
    let valid = match key {
        EXPIRATION => value.as_i64().is_some(),
        ISSUER => value.is_string(),
        AUDIENCE => Audience::from_value(value).is_some(),
        _ => true,
    };

    if valid {
        return Ok(());
    }

    let expected = match key {
        EXPIRATION => "an integer timestamp in milliseconds",
        ISSUER => "a string",
        _ => "a string or an array of strings",
    };
    Err(Error::InvalidClaim {
        claim: key.into(),
        reason: format!("expected {expected}, found {}", json_type(value)),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
