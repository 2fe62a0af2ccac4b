use std::collections::BTreeMap;

use alloy::primitives::{hex, Address};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ReaderError, Result};

/// Role under which the pool proxy is registered in the address book.
pub const PROXY_ROLE: &str = "Proxy";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("address `{0}` is missing the 0x prefix")]
    MissingPrefix(String),
    #[error("address `{input}` has {digits} hex digits, expected 40")]
    Length { input: String, digits: usize },
    #[error("address `{0}` contains non-hex characters")]
    NonHex(String),
    #[error("address `{0}` has an invalid EIP-55 checksum")]
    Checksum(String),
}

/// Parse a `0x`-prefixed, 40 hex digit address. Mixed-case input must carry
/// a valid EIP-55 checksum.
pub fn parse_address(raw: &str) -> std::result::Result<Address, AddressError> {
    let s = raw.trim();
    let body = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| AddressError::MissingPrefix(s.to_string()))?;
    if body.len() != 40 {
        return Err(AddressError::Length {
            input: s.to_string(),
            digits: body.len(),
        });
    }
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(body, &mut bytes).map_err(|_| AddressError::NonHex(s.to_string()))?;
    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(format!("0x{body}"), None)
            .map_err(|_| AddressError::Checksum(s.to_string()));
    }
    Ok(Address::from(bytes))
}

/// Logical role name -> deployed address, as found in `addresses.json`.
#[derive(Clone, Debug, Default)]
pub struct AddressBook {
    entries: BTreeMap<String, Value>,
}

impl AddressBook {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            other => Err(ReaderError::Configuration(format!(
                "address book must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| ReaderError::Configuration(format!("address book is not JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Raw address string registered under `role`.
    pub fn role(&self, role: &str) -> Result<&str> {
        match self.entries.get(role) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.as_str()),
            Some(_) => Err(ReaderError::Configuration(format!(
                "address book entry `{role}` is not an address string"
            ))),
            None => Err(ReaderError::Configuration(format!(
                "address book has no `{role}` entry"
            ))),
        }
    }

    pub fn proxy(&self) -> Result<&str> {
        self.role(PROXY_ROLE)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum Addrs {
    One(String),
    Many(Vec<String>),
}

/// Contents of `user.json`: the account(s) to report on under `addrs`.
#[derive(Clone, Debug, Deserialize)]
pub struct UserReference {
    addrs: Addrs,
}

impl UserReference {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| {
            ReaderError::Configuration(format!(
                "user file must be an object with `addrs` (string or list of strings): {e}"
            ))
        })
    }

    /// Addresses in file order, not yet validated.
    pub fn addresses(&self) -> Vec<&str> {
        match &self.addrs {
            Addrs::One(a) => vec![a.as_str()],
            Addrs::Many(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
