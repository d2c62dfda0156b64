//! Crypto layer configuration
//!
//! Settings that change how the engine surface behaves:
//! - How key and IV strings become AES key material
//! - Default text encoding and digest for the string helpers
//! - Upper bound on random string length

use crate::digest::DigestAlgorithm;
use crate::error::{CryptoError, CryptoResult};
use crate::random::MAX_RANDOM_LENGTH;
use crate::symmetric::KeyDerivation;
use crate::text::TextEncoding;
use serde::{Deserialize, Serialize};

pub const ENV_KEY_DERIVATION: &str = "CRYPTKIT_KEY_DERIVATION";
pub const ENV_TEXT_ENCODING: &str = "CRYPTKIT_TEXT_ENCODING";
pub const ENV_DEFAULT_DIGEST: &str = "CRYPTKIT_DEFAULT_DIGEST";
pub const ENV_MAX_RANDOM_LENGTH: &str = "CRYPTKIT_MAX_RANDOM_LENGTH";

/// Crypto layer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptConfig {
    /// Key/IV materialization for AES-256-CBC (zero-padded, hkdf-sha256)
    pub key_derivation: KeyDerivation,

    /// Encoding used by the engine's string helpers
    pub text_encoding: TextEncoding,

    /// Algorithm used by `CryptoEngine::digest_default`
    pub default_digest: DigestAlgorithm,

    /// Longest random string the engine will produce
    pub max_random_length: usize,
}

impl Default for CryptConfig {
    fn default() -> Self {
        Self {
            key_derivation: KeyDerivation::ZeroPadded,
            text_encoding: TextEncoding::Utf8,
            default_digest: DigestAlgorithm::Sha256,
            max_random_length: 4096,
        }
    }
}

impl CryptConfig {
    /// Create a configuration from `CRYPTKIT_*` environment variables
    pub fn from_env() -> CryptoResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable source; unset names keep defaults.
    pub fn from_lookup<F>(lookup: F) -> CryptoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(derivation) = lookup(ENV_KEY_DERIVATION) {
            config.key_derivation = derivation.parse()?;
        }

        if let Some(encoding) = lookup(ENV_TEXT_ENCODING) {
            config.text_encoding = encoding.parse().map_err(|_| {
                CryptoError::Configuration(format!(
                    "Unknown text encoding: {}. Valid options: utf-8, utf-16le, utf-16be, ascii, latin1",
                    encoding
                ))
            })?;
        }

        if let Some(name) = lookup(ENV_DEFAULT_DIGEST) {
            config.default_digest = name.parse().map_err(|_| {
                CryptoError::Configuration(format!(
                    "Unknown digest: {}. Valid options: md5, sha1, sha224, sha256, sha384, sha512",
                    name
                ))
            })?;
        }

        if let Some(max) = lookup(ENV_MAX_RANDOM_LENGTH) {
            config.max_random_length = max.parse().map_err(|e| {
                CryptoError::Configuration(format!("Invalid max random length: {}", e))
            })?;
        }

        config.validate()?;

        tracing::debug!(
            key_derivation = ?config.key_derivation,
            text_encoding = %config.text_encoding,
            default_digest = %config.default_digest,
            max_random_length = config.max_random_length,
            "crypto configuration loaded"
        );

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CryptoResult<()> {
        if self.max_random_length == 0 {
            return Err(CryptoError::Configuration(
                "Max random length must be greater than zero".to_string(),
            ));
        }

        if self.max_random_length > MAX_RANDOM_LENGTH {
            return Err(CryptoError::Configuration(format!(
                "Max random length must be at most {}, got {}",
                MAX_RANDOM_LENGTH, self.max_random_length
            )));
        }

        Ok(())
    }
}
