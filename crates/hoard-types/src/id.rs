use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Content-addressed identifier for a stored asset.
///
/// An `AssetId` is the SHA-1 digest of an asset's exact bytes. Its only
/// textual form is 40 lowercase hex characters, so a valid id can never carry
/// a path separator, a relative segment or an escape sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId([u8; AssetId::DIGEST_LEN]);

impl AssetId {
    /// Digest length in bytes (160 bits).
    pub const DIGEST_LEN: usize = 20;
    /// Length of the canonical hex form.
    pub const HEX_LEN: usize = Self::DIGEST_LEN * 2;

    /// Create an `AssetId` from a pre-computed digest.
    pub fn from_digest(digest: [u8; Self::DIGEST_LEN]) -> Self {
        Self(digest)
    }

    /// Parse a canonical identifier.
    ///
    /// Strict: exactly [`Self::HEX_LEN`] characters from `[0-9a-f]`. Uppercase
    /// hex is rejected here; use [`Self::canonicalize`] to accept it.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Self::check_canonical(s)?;
        let mut digest = [0u8; Self::DIGEST_LEN];
        hex::decode_to_slice(s, &mut digest).map_err(|_| TypeError::InvalidLength {
            expected: Self::HEX_LEN,
            actual: s.len(),
        })?;
        Ok(Self(digest))
    }

    /// Lowercase `raw`, then parse it strictly.
    pub fn canonicalize(raw: &str) -> Result<Self, TypeError> {
        Self::parse(&raw.to_ascii_lowercase())
    }

    /// Returns `true` if `s` is already in canonical form.
    pub fn is_canonical(s: &str) -> bool {
        Self::check_canonical(s).is_ok()
    }

    fn check_canonical(s: &str) -> Result<(), TypeError> {
        if s.len() != Self::HEX_LEN {
            return Err(TypeError::InvalidLength {
                expected: Self::HEX_LEN,
                actual: s.len(),
            });
        }
        for (index, found) in s.char_indices() {
            if !matches!(found, '0'..='9' | 'a'..='f') {
                return Err(TypeError::InvalidCharacter { found, index });
            }
        }
        Ok(())
    }

    /// The raw 20-byte digest.
    pub fn as_bytes(&self) -> &[u8; Self::DIGEST_LEN] {
        &self.0
    }

    /// Canonical hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self.short_hex())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for AssetId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; AssetId::DIGEST_LEN]> for AssetId {
    fn from(digest: [u8; AssetId::DIGEST_LEN]) -> Self {
        Self(digest)
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
