use crate::asymmetric::{self, AsymmetricKey, RsaPublicKeyHandle};
use crate::config::CryptConfig;
use crate::digest::{self, DigestAlgorithm};
use crate::error::{CryptoError, CryptoResult};
use crate::symmetric::Aes256CbcCipher;
use crate::{hex, hmac, random, text};

/// Stateless service object over every operation, bound to a [`CryptConfig`].
///
/// Holds no keys and no caches, so one instance can be shared freely
/// across threads.
///
/// # Example
///
/// ```rust
/// use cryptkit::CryptoEngine;
///
/// let engine = CryptoEngine::new();
/// let ct = engine.encrypt_aes256(b"record", "key", "iv").unwrap();
/// assert_eq!(engine.decrypt_aes256(&ct, "key", "iv").unwrap(), b"record");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CryptoEngine {
    config: CryptConfig,
    cipher: Aes256CbcCipher,
}

impl CryptoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CryptConfig) -> CryptoResult<Self> {
        config.validate()?;
        let cipher = Aes256CbcCipher::new(config.key_derivation);
        Ok(Self { config, cipher })
    }

    /// Engine configured from `CRYPTKIT_*` environment variables.
    pub fn from_env() -> CryptoResult<Self> {
        Self::with_config(CryptConfig::from_env()?)
    }

    pub fn config(&self) -> &CryptConfig {
        &self.config
    }

    pub fn encode_hex(&self, data: &[u8]) -> String {
        hex::encode_hex(data)
    }

    /// Random uppercase hex string of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// Fails above the configured maximum, or if the OS source fails.
    pub fn random_string(&self, length: usize) -> CryptoResult<String> {
        let max = self.config.max_random_length;
        if length > max {
            tracing::debug!(max, got = length, "random length over limit");
            return Err(CryptoError::LengthLimit { max, got: length });
        }
        random::random_string(length)
    }

    pub fn digest(&self, data: &[u8], algorithm: DigestAlgorithm) -> CryptoResult<Vec<u8>> {
        digest::digest(data, algorithm)
    }

    /// Digest with the configured default algorithm.
    pub fn digest_default(&self, data: &[u8]) -> CryptoResult<Vec<u8>> {
        digest::digest(data, self.config.default_digest)
    }

    /// Lowercase hex digest of `text` in the configured encoding.
    pub fn hash_str(&self, text: &str, algorithm: DigestAlgorithm) -> CryptoResult<String> {
        text::hash_str(text, algorithm, self.config.text_encoding)
    }

    pub fn encrypt_aes256(&self, plaintext: &[u8], key: &str, iv: &str) -> CryptoResult<Vec<u8>> {
        self.cipher.encrypt(plaintext, key, iv)
    }

    pub fn decrypt_aes256(&self, ciphertext: &[u8], key: &str, iv: &str) -> CryptoResult<Vec<u8>> {
        self.cipher.decrypt(ciphertext, key, iv)
    }

    pub fn rsa_encrypt(
        &self,
        plaintext: &[u8],
        public_key: &RsaPublicKeyHandle,
    ) -> CryptoResult<Vec<u8>> {
        asymmetric::rsa_encrypt(plaintext, public_key)
    }

    pub fn rsa_decrypt<'a>(
        &self,
        ciphertext: &[u8],
        key: impl Into<AsymmetricKey<'a>>,
    ) -> CryptoResult<Vec<u8>> {
        asymmetric::rsa_decrypt(ciphertext, key)
    }

    pub fn hmac(&self, data: &[u8], key: &str, algorithm: DigestAlgorithm) -> CryptoResult<Vec<u8>> {
        hmac::hmac(data, key, algorithm)
    }

    pub fn verify_hmac(
        &self,
        data: &[u8],
        key: &str,
        algorithm: DigestAlgorithm,
        expected: &[u8],
    ) -> CryptoResult<bool> {
        hmac::verify_hmac(data, key, algorithm, expected)
    }
}
