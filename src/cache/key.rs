//! Cache key derivation.

use sha2::{Digest, Sha256};

/// Fixed-width storage address for a cached collection.
///
/// Always 64 lowercase hex characters, so it is safe to use as a file name
/// whatever the shape of the identifier it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub hash: String,
}

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

/// Maps collection identifiers to [`CacheKey`]s with SHA-256.
///
/// An optional salt is mixed into every digest. Changing the salt orphans
/// every existing entry, which is how a cache-wide invalidation is done when
/// the on-disk schema changes.
#[derive(Debug, Clone, Default)]
pub struct KeyDeriver {
    salt: Option<String>,
}

impl KeyDeriver {
    pub fn new() -> Self {
        Self { salt: None }
    }

    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    pub fn derive(&self, identifier: &str) -> CacheKey {
        let mut hasher = Sha256::new();
        if let Some(ref s) = self.salt {
            hasher.update(s.as_bytes());
            // Separator keeps ("ab", "c") and ("a", "bc") apart.
            hasher.update([0u8]);
        }
        hasher.update(identifier.as_bytes());
        let hash: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        CacheKey { hash }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_derive_is_deterministic() {
        let deriver = KeyDeriver::new();
        assert_eq!(deriver.derive("PL123"), deriver.derive("PL123"));
        assert_eq!(KeyDeriver::new().derive("PL123"), deriver.derive("PL123"));
    }

    #[test]
    fn test_key_is_fixed_width_hex() {
        let deriver = KeyDeriver::new();
        let long = "x".repeat(10_000);
        for id in ["", "PL123", "../../etc/passwd", "with spaces/and\\slashes", long.as_str()] {
            let key = deriver.derive(id);
            assert_eq!(key.as_str().len(), 64);
            assert!(key
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_known_digest() {
        // sha256("")
        assert_eq!(
            KeyDeriver::new().derive("").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_no_collisions_in_sample() {
        let deriver = KeyDeriver::new();
        let keys: HashSet<CacheKey> = (0..20_000)
            .map(|i| deriver.derive(&format!("PL{:06}", i)))
            .collect();
        assert_eq!(keys.len(), 20_000);
    }

    #[test]
    fn test_salt_changes_keys() {
        let plain = KeyDeriver::new().derive("PL123");
        let salted = KeyDeriver::new().with_salt("v2").derive("PL123");
        assert_ne!(plain, salted);
        assert_eq!(salted, KeyDeriver::new().with_salt("v2").derive("PL123"));
        assert_ne!(
            KeyDeriver::new().with_salt("ab").derive("c"),
            KeyDeriver::new().with_salt("a").derive("bc")
        );
    }
}
