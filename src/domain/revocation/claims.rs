//! Claim set of a decoded logout token.

use serde_json::{Map, Value};

use super::{ClaimName, DecodeError, RevocationKey};

/// The payload of a logout token: claim name to JSON value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Returns the string value of `claim`.
    ///
    /// # Errors
    ///
    /// - `ClaimMissing` if the claim is absent
    /// - `ClaimTypeMismatch` if it is present but not a string
    pub fn subject(&self, claim: &ClaimName) -> Result<&str, DecodeError> {
        match self.0.get(claim.as_str()) {
            None => Err(DecodeError::claim_missing(claim.as_str())),
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(DecodeError::ClaimTypeMismatch {
                claim: claim.to_string(),
                found: json_type_name(other),
            }),
        }
    }

    /// Derives the revocation key for `claim`.
    pub fn revocation_key(&self, claim: &ClaimName) -> Result<RevocationKey, DecodeError> {
        self.subject(claim)
            .map(|value| RevocationKey::derive(claim, value))
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
