//! Decoded token claims
//!
//! Claims are kept as a plain name → JSON value map so application-specific
//! fields survive verification untouched and can be read by name later.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::AuthError;

/// Not-before claim name (epoch seconds)
pub const NOT_BEFORE: &str = "nbf";
/// Expiry claim name (epoch seconds)
pub const EXPIRES_AT: &str = "exp";
/// Issued-at claim name (epoch seconds)
pub const ISSUED_AT: &str = "iat";

/// Time claims every token must carry, in reporting order
pub const REQUIRED_TIME_CLAIMS: [&str; 3] = [NOT_BEFORE, EXPIRES_AT, ISSUED_AT];

/// Identity reported when the identity claim is absent
pub const UNKNOWN_IDENTITY: &str = "Unknown User ID";

/// Immutable claims map of a verified token
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Look up a claim by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether the claim is present, whatever its value
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Read a claim as whole epoch seconds
    pub fn epoch_seconds(&self, name: &str) -> Option<i64> {
        let value = self.0.get(name)?;
        value.as_i64().or_else(|| value.as_u64().and_then(|v| i64::try_from(v).ok()))
    }

    /// Required time claims that are absent or not integral
    pub fn missing_time_claims(&self) -> Vec<&'static str> {
        REQUIRED_TIME_CLAIMS
            .into_iter()
            .filter(|name| self.epoch_seconds(name).is_none())
            .collect()
    }

    /// User identifier held in `claim`, rendered as a string
    pub fn identity(&self, claim: &str) -> Option<String> {
        match self.0.get(claim)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Deserialize one claim into `T`
    ///
    /// # Errors
    ///
    /// `MissingClaim` when absent, `InvalidClaim` when the value does not fit `T`
    pub fn claim<T: DeserializeOwned>(&self, name: &str) -> Result<T, AuthError> {
        let value = self.0.get(name).ok_or_else(|| AuthError::MissingClaim(name.to_string()))?;
        T::deserialize(value).map_err(|e| AuthError::InvalidClaim {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// The underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Iterate over all claims
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no claims are present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON rendering for diagnostic logs
    pub fn dump(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

/// Fractional or float-encoded time claims are truncated to whole seconds.
fn coerce_time_claims(map: &mut Map<String, Value>) {
    for name in REQUIRED_TIME_CLAIMS {
        let Some(Value::Number(n)) = map.get(name) else {
            continue;
        };
        if n.is_i64() || n.is_u64() {
            continue;
        }
        if let Some(f) = n.as_f64().filter(|f| f.is_finite()) {
            map.insert(name.to_string(), Value::from(f.trunc() as i64));
        }
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(mut map: Map<String, Value>) -> Self {
        coerce_time_claims(&mut map);
        Claims(map)
    }
}

impl From<Claims> for Map<String, Value> {
    fn from(claims: Claims) -> Self {
        claims.0
    }
}

impl TryFrom<Value> for Claims {
    type Error = AuthError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into()),
            _ => Err(AuthError::InvalidToken("JWT payload is not a JSON object".into())),
        }
    }
}
