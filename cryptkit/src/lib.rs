//! Unified cryptographic operation layer.
//!
//! One calling convention for every primitive: bytes in, freshly allocated
//! bytes out, and a single [`CryptoError`] on failure.
//!
//! - Message digests (MD5, SHA-1, SHA-2 family)
//! - AES-256-CBC keyed from caller strings
//! - RSA with PKCS#1 v1.5 padding, keys loaded from X.509 certificates
//! - HMAC over any supported digest
//! - Hex encoding and secure random strings
//!
//! Callers that only want "value or nothing" use [`compat`], which maps every
//! failure to `None`.
//!
//! # Example
//!
//! ```rust
//! use cryptkit::{digest, encode_hex, hmac, DigestAlgorithm};
//!
//! let tag = hmac(b"payload", "shared secret", DigestAlgorithm::Sha256).unwrap();
//! assert_eq!(tag.len(), 32);
//!
//! let sum = digest(b"", DigestAlgorithm::Md5).unwrap();
//! assert_eq!(encode_hex(&sum), "D41D8CD98F00B204E9800998ECF8427E");
//! ```

pub mod asymmetric;
pub mod compat;
pub mod config;
pub mod constant_time;
pub mod digest;
pub mod engine;
pub mod error;
pub mod hex;
pub mod hmac;
pub mod keys;
pub mod random;
pub mod symmetric;
pub mod text;

pub use asymmetric::{rsa_decrypt, rsa_encrypt, AsymmetricKey, RsaPrivateKeyHandle, RsaPublicKeyHandle};
pub use config::CryptConfig;
pub use digest::{digest, DigestAlgorithm};
pub use engine::CryptoEngine;
pub use error::*;
pub use self::hex::encode_hex;
pub use self::hmac::{hmac, verify_hmac};
pub use keys::load_public_key_x509;
pub use random::random_string;
pub use symmetric::{decrypt_aes256, encrypt_aes256, Aes256CbcCipher, KeyDerivation};
pub use text::TextEncoding;
