//! XXH3 content hashing used for source files and structural fingerprints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit XXH3 digest.
///
/// Equal digests are treated as a strong hint of equal content; callers that
/// merge data on a digest match confirm with a full comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Hashes a byte slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data).to_le_bytes())
    }

    /// Hashes a sequence of string parts, separating them so that
    /// `["ab", "c"]` and `["a", "bc"]` differ.
    pub fn from_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut buf = Vec::new();
        for part in parts {
            buf.extend_from_slice(&(part.len() as u64).to_le_bytes());
            buf.extend_from_slice(part.as_bytes());
        }
        Self::from_bytes(&buf)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(
            ContentHash::from_bytes(b"module m {}"),
            ContentHash::from_bytes(b"module m {}")
        );
    }

    #[test]
    fn parts_are_delimited() {
        let a = ContentHash::from_parts(["ab", "c"]);
        let b = ContentHash::from_parts(["a", "bc"]);
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_hex() {
        let s = ContentHash::from_bytes(b"x").to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
