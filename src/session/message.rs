//! The signed session envelope.
//!
//! A wallet signs the JSON serialization of the whole envelope minus its
//! `signature` field. Recovery is sensitive to the exact serialized text, so
//! the envelope is kept as an ordered JSON object (not a typed struct) and
//! re-serialized in the field order the signer used.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::types::{SessionError, SessionResult};

pub(crate) const ADDRESS_FIELD: &str = "address";
pub(crate) const SIGNATURE_FIELD: &str = "signature";
pub(crate) const CHAIN_ID_FIELD: &str = "chainId";
pub(crate) const NONCE_FIELD: &str = "nonce";
pub(crate) const EXPIRATION_FIELD: &str = "expirationTime";

/// A wallet-signed message envelope.
///
/// Known fields (`address`, `signature`, `chainId`, `nonce`,
/// `expirationTime`) have typed accessors; arbitrary additional fields that
/// were part of the signed payload ride along untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionMessage {
    fields: Map<String, Value>,
}

impl SessionMessage {
    /// Parse an envelope from raw JSON text.
    pub fn from_json(raw: &str) -> SessionResult<Self> {
        serde_json::from_str(raw).map_err(|e| SessionError::Malformed(e.to_string()))
    }

    /// Build an envelope from an already-parsed JSON value.
    ///
    /// Fails unless the value is a JSON object.
    pub fn from_value(value: Value) -> SessionResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(SessionError::Malformed(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Claimed signer address (0x-prefixed hex), if present.
    pub fn address(&self) -> Option<&str> {
        self.fields.get(ADDRESS_FIELD).and_then(Value::as_str)
    }

    /// Hex-encoded signature, if present.
    pub fn signature(&self) -> Option<&str> {
        self.fields.get(SIGNATURE_FIELD).and_then(Value::as_str)
    }

    /// Chain ID, accepting either a JSON number or a numeric string.
    pub fn chain_id(&self) -> Option<u64> {
        match self.fields.get(CHAIN_ID_FIELD)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Opaque nonce value, if present.
    pub fn nonce(&self) -> Option<&Value> {
        self.fields.get(NONCE_FIELD)
    }

    /// ISO-8601 expiration timestamp, if present.
    pub fn expiration_time(&self) -> Option<&str> {
        self.fields.get(EXPIRATION_FIELD).and_then(Value::as_str)
    }

    /// The text the wallet originally signed: the envelope minus its
    /// `signature` field, serialized in the original field order.
    pub fn signed_payload(&self) -> String {
        let mut payload = self.fields.clone();
        payload.remove(SIGNATURE_FIELD);
        Value::Object(payload).to_string()
    }

    /// The full envelope, `signature` included, in the original field order.
    ///
    /// This is the digest input for the contract-wallet check, which hashes
    /// the complete message rather than the signed payload.
    pub fn canonical_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
