//! On-chain addresses and canonical pool keys
//!
//! `Address` is a full 20-byte EVM address (no truncation). `PoolKey` is the
//! canonical string key derived from a pool's address: lowercase, `0x`-prefixed
//! hex. Two spellings of the same address always produce the same key.

use crate::common::errors::ValidationError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Full 20-byte on-chain address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    #[inline(always)]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Lowercase `0x`-prefixed hex representation
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if cleaned.len() != 40 {
            return Err(ValidationError::invalid_address(
                s,
                format!("expected 40 hex characters, got {}", cleaned.len()),
            ));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(cleaned, &mut bytes)
            .map_err(|e| ValidationError::invalid_address(s, e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Canonical pool key derived from the pool's on-chain address
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolKey(String);

impl PoolKey {
    pub fn from_address(address: &Address) -> Self {
        Self(address.to_hex())
    }

    /// Parse any accepted address spelling into its canonical key
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Ok(Self::from_address(&raw.parse()?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Address> for PoolKey {
    fn from(address: &Address) -> Self {
        Self::from_address(address)
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for PoolKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PoolKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PoolKey::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC: &str = "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174";

    #[test]
    fn test_parse_with_and_without_prefix() {
        let with: Address = USDC.parse().unwrap();
        let without: Address = USDC[2..].parse().unwrap();
        assert_eq!(with, without);
        assert_eq!(with.to_string(), USDC.to_lowercase());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "0x1234".parse::<Address>(),
            Err(ValidationError::InvalidAddress { .. })
        ));
        assert!("0xZZ91Bca1f2de4661ED88A30C99A7a9449Aa84174"
            .parse::<Address>()
            .is_err());
    }

    #[test]
    fn test_pool_key_is_canonical() {
        let upper = PoolKey::parse(&USDC.to_uppercase().replacen("0X", "0x", 1)).unwrap();
        let mixed = PoolKey::parse(USDC).unwrap();
        assert_eq!(upper, mixed);
        assert_eq!(mixed.as_str(), USDC.to_lowercase());
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let address: Address = USDC.parse().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", USDC.to_lowercase()));

        let key: PoolKey = serde_json::from_str(&format!("\"{}\"", USDC)).unwrap();
        assert_eq!(key, PoolKey::from_address(&address));
    }
}
