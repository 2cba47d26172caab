//! Tally obfuscation strategies
//!
//! Neither strategy provides confidentiality: both are deterministic maps
//! from a count to an opaque label, standing in for a real tally-hiding
//! scheme behind the same interface.

use crate::config::DEFAULT_TALLY_LABEL;

/// Maps a raw vote count to an opaque representation
///
/// Implementations are pure: same input, same output, no side effects.
pub trait TallyObfuscator: Send + Sync {
    fn obfuscate(&self, count: u64) -> String;
}

/// `<label><count>`; the default label yields `encrypted_<count>`
#[derive(Debug, Clone)]
pub struct LabelObfuscator {
    label: String,
}

impl LabelObfuscator {
    pub fn new() -> Self {
        Self::with_label(DEFAULT_TALLY_LABEL)
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for LabelObfuscator {
    fn default() -> Self {
        Self::new()
    }
}

impl TallyObfuscator for LabelObfuscator {
    fn obfuscate(&self, count: u64) -> String {
        format!("{}{}", self.label, count)
    }
}

/// Hex-encoded keyed blake3 digest of the count
///
/// Injective in practice, and unreadable without recomputing digests under
/// the same key.
#[derive(Clone)]
pub struct DigestObfuscator {
    key: [u8; 32],
}

impl DigestObfuscator {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }
}

impl std::fmt::Debug for DigestObfuscator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestObfuscator").finish_non_exhaustive()
    }
}

impl TallyObfuscator for DigestObfuscator {
    fn obfuscate(&self, count: u64) -> String {
        let digest = blake3::keyed_hash(&self.key, &count.to_le_bytes());
        hex::encode(digest.as_bytes())
    }
}
