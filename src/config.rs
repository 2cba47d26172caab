//! Configuration management for the election core
//!
//! Loads tally and logging settings from environment variables (and an
//! optional `.env` file) with validation.

use crate::voting::{DigestObfuscator, LabelObfuscator, TallyObfuscator};
use crate::{Error, Result, config_error};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Prefix used by the label obfuscator unless overridden
pub const DEFAULT_TALLY_LABEL: &str = "encrypted_";

/// Filter directive used when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "election=info";

/// Minimum decoded length of `ELECTION_TALLY_KEY`
const MIN_TALLY_KEY_BYTES: usize = 32;

/// Which tally obfuscation strategy the service is wired with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TallyMode {
    /// `<label><count>`, e.g. `encrypted_3`
    Label,
    /// Keyed blake3 digest of the count, hex encoded
    Digest,
}

impl std::str::FromStr for TallyMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "label" => Ok(Self::Label),
            "digest" => Ok(Self::Digest),
            other => Err(config_error!("Invalid ELECTION_TALLY_MODE: {}", other)),
        }
    }
}

/// Tally reporting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyConfig {
    /// Obfuscation strategy
    pub mode: TallyMode,

    /// Prefix for [`TallyMode::Label`]
    pub label: String,

    /// Digest key (base64 encoded, minimum 32 bytes) for [`TallyMode::Digest`]
    pub key: Option<String>,
}

impl TallyConfig {
    /// Load tally configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load tally configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mode = match lookup("ELECTION_TALLY_MODE") {
            Some(raw) => raw.parse()?,
            None => TallyMode::Label,
        };

        let label =
            lookup("ELECTION_TALLY_LABEL").unwrap_or_else(|| DEFAULT_TALLY_LABEL.to_string());
        let key = lookup("ELECTION_TALLY_KEY");

        let config = Self { mode, label, key };
        config.validate()?;
        Ok(config)
    }

    /// Reference behaviour: `encrypted_<count>`
    pub fn label() -> Self {
        Self {
            mode: TallyMode::Label,
            label: DEFAULT_TALLY_LABEL.to_string(),
            key: None,
        }
    }

    /// Digest mode with a fresh random key
    pub fn digest_for_testing() -> Self {
        let key = base64::engine::general_purpose::STANDARD.encode(rand::random::<[u8; 32]>());

        Self {
            mode: TallyMode::Digest,
            label: DEFAULT_TALLY_LABEL.to_string(),
            key: Some(key),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.mode == TallyMode::Digest {
            let key = self
                .key
                .as_deref()
                .ok_or_else(|| config_error!("ELECTION_TALLY_KEY required for digest mode"))?;
            Self::validate_key(key)?;
        }
        Ok(())
    }

    /// Validate a base64-encoded digest key
    fn validate_key(key: &str) -> Result<()> {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(key)
            .map_err(|_| Error::validation("ELECTION_TALLY_KEY must be valid base64"))?;

        if decoded.len() < MIN_TALLY_KEY_BYTES {
            return Err(Error::validation(format!(
                "ELECTION_TALLY_KEY must be at least {MIN_TALLY_KEY_BYTES} bytes when decoded"
            )));
        }

        Ok(())
    }

    /// Get the digest key as bytes
    pub fn key_bytes(&self) -> Result<[u8; 32]> {
        let key = self
            .key
            .as_deref()
            .ok_or_else(|| config_error!("ELECTION_TALLY_KEY not set"))?;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(key)
            .map_err(|_| Error::validation("ELECTION_TALLY_KEY must be valid base64"))?;

        decoded
            .get(..MIN_TALLY_KEY_BYTES)
            .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok())
            .ok_or_else(|| {
                Error::validation(format!(
                    "ELECTION_TALLY_KEY must be at least {MIN_TALLY_KEY_BYTES} bytes when decoded"
                ))
            })
    }

    /// Build the configured obfuscation strategy
    pub fn obfuscator(&self) -> Result<Arc<dyn TallyObfuscator>> {
        match self.mode {
            TallyMode::Label => Ok(Arc::new(LabelObfuscator::with_label(self.label.clone()))),
            TallyMode::Digest => Ok(Arc::new(DigestObfuscator::new(self.key_bytes()?))),
        }
    }
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self::label()
    }
}

/// Output style of the fmt subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            other => Err(config_error!("Invalid LOG_FORMAT: {}", other)),
        }
    }
}

/// Logging configuration
///
/// `level` is an `EnvFilter` directive string; `RUST_LOG` overrides it when
/// set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Load logging configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::Full,
        };

        let config = Self {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            format,
        };
        config.fallback_filter()?;
        Ok(config)
    }

    /// Filter built from `level` alone
    pub fn fallback_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.level)
            .map_err(|e| config_error!("Invalid LOG_LEVEL {:?}: {}", self.level, e))
    }

    /// `RUST_LOG` if set, otherwise `level`
    pub fn env_filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => self.fallback_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Full,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    pub tally: TallyConfig,
    pub logging: LoggingConfig,
}

impl ElectionConfig {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let tally = TallyConfig::from_lookup(&lookup)?;

        let logging = LoggingConfig::from_lookup(&lookup)?;

        Ok(Self { tally, logging })
    }

    /// Create configuration for testing
    pub fn for_testing() -> Self {
        Self {
            tally: TallyConfig::label(),
            logging: LoggingConfig {
                level: "election=debug".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_reference_behaviour() {
        let config = ElectionConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.tally.mode, TallyMode::Label);
        assert_eq!(config.tally.label, "encrypted_");
        assert_eq!(config.logging.level, "election=info");
        assert_eq!(config.logging.format, LogFormat::Full);

        let obfuscator = config.tally.obfuscator().unwrap();
        assert_eq!(obfuscator.obfuscate(7), "encrypted_7");
    }

    #[test]
    fn test_custom_label() {
        let config = TallyConfig::from_lookup(lookup_from(&[
            ("ELECTION_TALLY_MODE", "Label"),
            ("ELECTION_TALLY_LABEL", "sealed:"),
        ]))
        .unwrap();

        assert_eq!(config.obfuscator().unwrap().obfuscate(2), "sealed:2");
    }

    #[test]
    fn test_digest_mode_requires_key() {
        let missing = TallyConfig::from_lookup(lookup_from(&[("ELECTION_TALLY_MODE", "digest")]));
        assert!(matches!(missing, Err(Error::Configuration { .. })));

        let short_key = base64::engine::general_purpose::STANDARD.encode([0u8; 16]);
        let short = TallyConfig::from_lookup(lookup_from(&[
            ("ELECTION_TALLY_MODE", "digest"),
            ("ELECTION_TALLY_KEY", &short_key),
        ]));
        assert!(matches!(short, Err(Error::Validation { .. })));

        let not_base64 = TallyConfig::from_lookup(lookup_from(&[
            ("ELECTION_TALLY_MODE", "digest"),
            ("ELECTION_TALLY_KEY", "invalid_base64!"),
        ]));
        assert!(not_base64.is_err());
    }

    #[test]
    fn test_digest_mode_with_valid_key() {
        let key = base64::engine::general_purpose::STANDARD.encode([9u8; 32]);
        let config = TallyConfig::from_lookup(lookup_from(&[
            ("ELECTION_TALLY_MODE", "digest"),
            ("ELECTION_TALLY_KEY", &key),
        ]))
        .unwrap();

        assert_eq!(config.key_bytes().unwrap(), [9u8; 32]);

        let obfuscator = config.obfuscator().unwrap();
        assert_eq!(obfuscator.obfuscate(1), obfuscator.obfuscate(1));
        assert_ne!(obfuscator.obfuscate(1), obfuscator.obfuscate(2));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = TallyConfig::from_lookup(lookup_from(&[("ELECTION_TALLY_MODE", "rot13")]));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_random_digest_config_is_valid() {
        let config = TallyConfig::digest_for_testing();
        assert!(config.validate().is_ok());
        assert!(config.obfuscator().is_ok());
    }

    #[test]
    fn test_logging_settings_applied() {
        let config = LoggingConfig::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "Compact"),
        ]))
        .unwrap();

        assert_eq!(config.format, LogFormat::Compact);
        let filter = config.fallback_filter().unwrap();
        assert_eq!(
            filter.max_level_hint(),
            Some(tracing::level_filters::LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_invalid_logging_settings_rejected() {
        let bad_format = LoggingConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "json")]));
        assert!(matches!(bad_format, Err(Error::Configuration { .. })));

        let bad_level =
            LoggingConfig::from_lookup(lookup_from(&[("LOG_LEVEL", "election=notalevel")]));
        assert!(matches!(bad_level, Err(Error::Configuration { .. })));
    }
}
