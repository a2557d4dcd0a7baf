//! Content hashing for deterministic seed derivation

use sha2::{Digest, Sha256};
use std::fmt;

/// A SHA-256 digest of some stable identity (instance id, effect kind, salt).
///
/// Every pseudo-random choice in the simulation (star directions, ground
/// launch offsets, spark jitter) is derived from one of these, so evaluating
/// the same instance twice produces the same explosion.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Compute a hash from bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();
        Self(result.into())
    }

    /// Compute a hash from a string
    pub fn from_str(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    /// Hash a sequence of parts, length-prefixed so `["ab", "c"]` and
    /// `["a", "bc"]` differ.
    pub fn from_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part);
        }
        Self(hasher.finalize().into())
    }

    /// First four bytes as a little-endian u32
    pub fn seed_u32(&self) -> u32 {
        u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// First eight bytes as a little-endian u64
    pub fn seed_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.0[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Get the hash as a hex string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_hashing() {
        let h1 = ContentHash::from_str("hello");
        let h2 = ContentHash::from_str("hello");
        assert_eq!(h1, h2);
        assert_eq!(h1.seed_u32(), h2.seed_u32());
    }

    #[test]
    fn test_different_content_different_hash() {
        let h1 = ContentHash::from_str("hello");
        let h2 = ContentHash::from_str("world");
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_parts_are_length_prefixed() {
        let a = ContentHash::from_parts(&[b"ab", b"c"]);
        let b = ContentHash::from_parts(&[b"a", b"bc"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hex_output() {
        let h = ContentHash::from_str("hello");
        assert_eq!(h.to_hex().len(), 64);
    }
}
