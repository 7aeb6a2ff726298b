//! # Fingerprint Module
//!
//! Turns a canonical key into a fixed-size identity.
//!
//! ## How It Works
//! 1. Concatenate the key parts in order, with no separator
//! 2. Encode as UTF-8
//! 3. Hash with SHA-256
//!
//! Two items with the same key always get the same fingerprint. Because the
//! parts are not separated, keys that split the same text differently
//! (`"AB" + "C"` and `"A" + "BC"`) also share a fingerprint.

use crate::core::classifier::CanonicalKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fmt;

/// SHA-256 digest of a canonical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint a canonical key
    pub fn of(key: &CanonicalKey) -> Self {
        let mut hasher = Sha256::new();
        for part in key.parts() {
            hasher.update(part.as_bytes());
        }
        Self(hasher.finalize().into())
    }

    /// Lowercase hex, 64 characters
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Decode UTF-8, silently dropping invalid sequences
pub fn utf8_dropping_invalid(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()),
    }
}

/// Decode UTF-16, silently dropping unpaired surrogates
pub fn utf16_dropping_invalid(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .filter_map(Result::ok)
        .collect()
}

/// Decode a record file read from a store.
///
/// A UTF-16 byte order mark selects UTF-16 in that byte order; anything else
/// is read as UTF-8 with an optional UTF-8 mark. Invalid sequences are
/// dropped either way, as is a trailing odd byte in UTF-16 input.
pub fn decode_store_text(bytes: &[u8]) -> Cow<'_, str> {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => {
            Cow::Owned(utf16_dropping_invalid(&utf16_units(rest, u16::from_le_bytes)))
        }
        [0xFE, 0xFF, rest @ ..] => {
            Cow::Owned(utf16_dropping_invalid(&utf16_units(rest, u16::from_be_bytes)))
        }
        [0xEF, 0xBB, 0xBF, rest @ ..] => utf8_dropping_invalid(rest),
        _ => utf8_dropping_invalid(bytes),
    }
}

fn utf16_units(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect()
}
