//! RSA encryption with PKCS#1 v1.5 padding.
//!
//! Key handles are opaque: they are built by the loaders in [`crate::keys`]
//! (or generated), borrowed read-only for one call, and released on drop.
//! Raw key bytes never cross this module's boundary.

use crate::error::{require_non_empty, CryptoError, CryptoResult};
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use std::fmt;

/// PKCS#1 v1.5 encryption padding overhead in bytes.
pub const PKCS1_V15_OVERHEAD: usize = 11;

/// Opaque RSA public key.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPublicKeyHandle {
    inner: RsaPublicKey,
}

impl RsaPublicKeyHandle {
    pub(crate) fn from_inner(inner: RsaPublicKey) -> Self {
        Self { inner }
    }

    /// Modulus size in bytes; also the size of every ciphertext.
    pub fn modulus_len(&self) -> usize {
        self.inner.size()
    }

    /// Longest plaintext a single encryption accepts.
    pub fn max_plaintext_len(&self) -> usize {
        self.modulus_len().saturating_sub(PKCS1_V15_OVERHEAD)
    }
}

impl fmt::Debug for RsaPublicKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPublicKeyHandle")
            .field("modulus_bits", &(self.modulus_len() * 8))
            .finish()
    }
}

/// Opaque RSA private key. Private material is zeroized on drop.
#[derive(Clone)]
pub struct RsaPrivateKeyHandle {
    inner: RsaPrivateKey,
}

impl RsaPrivateKeyHandle {
    pub(crate) fn from_inner(inner: RsaPrivateKey) -> Self {
        Self { inner }
    }

    /// Generates a fresh key pair from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Fails if the provider rejects `bits` or key generation fails.
    pub fn generate(bits: usize) -> CryptoResult<Self> {
        let inner = RsaPrivateKey::new(&mut OsRng, bits).map_err(|e| {
            tracing::debug!(bits, error = %e, "RSA key generation failed");
            CryptoError::KeyGenerationFailed(e.to_string())
        })?;
        Ok(Self { inner })
    }

    /// The matching public key, as a separate handle.
    pub fn public_key(&self) -> RsaPublicKeyHandle {
        RsaPublicKeyHandle::from_inner(self.inner.to_public_key())
    }

    pub fn modulus_len(&self) -> usize {
        self.inner.size()
    }
}

impl fmt::Debug for RsaPrivateKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKeyHandle")
            .field("modulus_bits", &(self.modulus_len() * 8))
            .finish_non_exhaustive()
    }
}

/// A borrowed key handle of either kind, as accepted by [`rsa_decrypt`].
#[derive(Debug, Clone, Copy)]
pub enum AsymmetricKey<'a> {
    Public(&'a RsaPublicKeyHandle),
    Private(&'a RsaPrivateKeyHandle),
}

impl<'a> From<&'a RsaPublicKeyHandle> for AsymmetricKey<'a> {
    fn from(key: &'a RsaPublicKeyHandle) -> Self {
        Self::Public(key)
    }
}

impl<'a> From<&'a RsaPrivateKeyHandle> for AsymmetricKey<'a> {
    fn from(key: &'a RsaPrivateKeyHandle) -> Self {
        Self::Private(key)
    }
}

/// Encrypts `plaintext` to `public_key` with PKCS#1 v1.5 padding.
///
/// # Errors
///
/// Fails on empty input, on plaintext longer than
/// `modulus_len - 11`, or if the primitive itself fails.
pub fn rsa_encrypt(plaintext: &[u8], public_key: &RsaPublicKeyHandle) -> CryptoResult<Vec<u8>> {
    require_non_empty("data", plaintext)?;

    let max = public_key.max_plaintext_len();
    if plaintext.len() > max {
        tracing::debug!(max, got = plaintext.len(), "plaintext exceeds RSA capacity");
        return Err(CryptoError::MessageTooLong {
            max,
            got: plaintext.len(),
        });
    }

    public_key
        .inner
        .encrypt(&mut OsRng, Pkcs1v15Encrypt, plaintext)
        .map_err(|e| {
            tracing::debug!(error = %e, "RSA encryption failed");
            CryptoError::EncryptionFailed(e.to_string())
        })
}

/// Decrypts a PKCS#1 v1.5 ciphertext.
///
/// The key is not checked for kind up front; a public-only handle fails the
/// same way any other unusable key does.
///
/// # Errors
///
/// Fails on empty input, a key that cannot perform the private transform,
/// corrupted ciphertext or a mismatched key.
pub fn rsa_decrypt<'a>(
    ciphertext: &[u8],
    key: impl Into<AsymmetricKey<'a>>,
) -> CryptoResult<Vec<u8>> {
    require_non_empty("data", ciphertext)?;

    match key.into() {
        AsymmetricKey::Private(private) => private
            .inner
            .decrypt(Pkcs1v15Encrypt, ciphertext)
            .map_err(|e| {
                tracing::debug!(error = %e, "RSA decryption failed");
                CryptoError::DecryptionFailed(e.to_string())
            }),
        AsymmetricKey::Public(_) => {
            tracing::debug!("RSA decryption attempted with a public key");
            Err(CryptoError::DecryptionFailed(
                "key cannot perform the private-key transform".to_string(),
            ))
        }
    }
}
