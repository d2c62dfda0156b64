//! AES-256-CBC with PKCS#7 padding, keyed from caller-supplied strings.
//!
//! The key and IV strings are materialized into exactly 32 and 16 bytes by a
//! [`KeyDerivation`] rule. The rule is a pure function of the string, so the
//! same passphrase always re-derives the same key, across processes too.

use crate::error::{require_non_empty, CryptoError, CryptoResult};
use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hkdf::Hkdf;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::str::FromStr;
use zeroize::Zeroizing;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;
pub const BLOCK_LEN: usize = 16;

const HKDF_SALT: &[u8] = b"cryptkit/aes-256-cbc/v1";
const HKDF_KEY_INFO: &[u8] = b"key";
const HKDF_IV_INFO: &[u8] = b"iv";

/// Rule turning a key or IV string into fixed-size bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyDerivation {
    /// UTF-8 bytes copied into a zeroed buffer, truncated when longer.
    /// The default, so existing ciphertext keeps decrypting.
    #[default]
    ZeroPadded,
    /// HKDF-SHA256 over the UTF-8 bytes, with distinct labels for key and IV.
    HkdfSha256,
}

impl FromStr for KeyDerivation {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zero-padded" | "zeropadded" | "legacy" => Ok(Self::ZeroPadded),
            "hkdf-sha256" | "hkdf" => Ok(Self::HkdfSha256),
            _ => Err(CryptoError::Configuration(format!(
                "Unknown key derivation: {}. Valid options: zero-padded, hkdf-sha256",
                s
            ))),
        }
    }
}

impl KeyDerivation {
    pub fn derive_key(self, key: &str) -> CryptoResult<Zeroizing<[u8; KEY_LEN]>> {
        self.materialize::<KEY_LEN>(key.as_bytes(), HKDF_KEY_INFO)
    }

    pub fn derive_iv(self, iv: &str) -> CryptoResult<Zeroizing<[u8; IV_LEN]>> {
        self.materialize::<IV_LEN>(iv.as_bytes(), HKDF_IV_INFO)
    }

    fn materialize<const N: usize>(
        self,
        input: &[u8],
        info: &[u8],
    ) -> CryptoResult<Zeroizing<[u8; N]>> {
        let mut out = Zeroizing::new([0u8; N]);
        match self {
            Self::ZeroPadded => {
                let n = input.len().min(N);
                out[..n].copy_from_slice(&input[..n]);
            }
            Self::HkdfSha256 => {
                Hkdf::<Sha256>::new(Some(HKDF_SALT), input)
                    .expand(info, &mut out[..])
                    .map_err(|_| {
                        tracing::debug!(len = N, "HKDF expand rejected output length");
                        CryptoError::KeyDerivationFailed("HKDF expand failed".to_string())
                    })?;
            }
        }
        Ok(out)
    }
}

/// AES-256-CBC cipher bound to a key derivation rule. Holds no key material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aes256CbcCipher {
    derivation: KeyDerivation,
}

impl Aes256CbcCipher {
    pub fn new(derivation: KeyDerivation) -> Self {
        Self { derivation }
    }

    pub fn derivation(&self) -> KeyDerivation {
        self.derivation
    }

    /// Encrypts `plaintext` under keys derived from `key` and `iv`.
    ///
    /// # Errors
    ///
    /// Fails if any of the three arguments is empty.
    pub fn encrypt(&self, plaintext: &[u8], key: &str, iv: &str) -> CryptoResult<Vec<u8>> {
        require_non_empty("data", plaintext)?;
        require_non_empty("key", key.as_bytes())?;
        require_non_empty("iv", iv.as_bytes())?;

        let key = self.derivation.derive_key(key)?;
        let iv = self.derivation.derive_iv(iv)?;
        encrypt_with_key(&key, &iv, plaintext)
    }

    /// Decrypts `ciphertext` under keys derived from `key` and `iv`.
    ///
    /// # Errors
    ///
    /// Fails if any argument is empty, if the ciphertext is not a whole
    /// number of blocks, or if the padding does not verify.
    pub fn decrypt(&self, ciphertext: &[u8], key: &str, iv: &str) -> CryptoResult<Vec<u8>> {
        require_non_empty("data", ciphertext)?;
        require_non_empty("key", key.as_bytes())?;
        require_non_empty("iv", iv.as_bytes())?;

        let key = self.derivation.derive_key(key)?;
        let iv = self.derivation.derive_iv(iv)?;
        decrypt_with_key(&key, &iv, ciphertext)
    }
}

/// Encrypts with raw key bytes. Output is always a whole number of blocks.
pub fn encrypt_with_key(
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
    plaintext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypts with raw key bytes and strips PKCS#7 padding.
pub fn decrypt_with_key(
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
    ciphertext: &[u8],
) -> CryptoResult<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        tracing::debug!(len = ciphertext.len(), "ciphertext is not block aligned");
        return Err(CryptoError::DecryptionFailed(format!(
            "ciphertext length {} is not a multiple of {}",
            ciphertext.len(),
            BLOCK_LEN
        )));
    }

    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| {
            tracing::debug!("PKCS#7 padding check failed");
            CryptoError::DecryptionFailed("invalid padding".to_string())
        })
}

/// Encrypts with the default (zero-padded) materialization.
pub fn encrypt_aes256(plaintext: &[u8], key: &str, iv: &str) -> CryptoResult<Vec<u8>> {
    Aes256CbcCipher::default().encrypt(plaintext, key, iv)
}

/// Decrypts with the default (zero-padded) materialization.
pub fn decrypt_aes256(ciphertext: &[u8], key: &str, iv: &str) -> CryptoResult<Vec<u8>> {
    Aes256CbcCipher::default().decrypt(ciphertext, key, iv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use cbc::cipher::block_padding::NoPadding;

    fn from_hex<const N: usize>(s: &str) -> [u8; N] {
        let mut out = [0u8; N];
        ::hex::decode_to_slice(s, &mut out).unwrap();
        out
    }

    #[test]
    fn test_nist_sp800_38a_cbc_aes256_first_block() {
        // SP 800-38A F.2.5; a full block of input gains one block of padding.
        let key = from_hex::<32>("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4");
        let iv = from_hex::<16>("000102030405060708090a0b0c0d0e0f");
        let pt = from_hex::<16>("6bc1bee22e409f96e93d7e117393172a");

        let ct = encrypt_with_key(&key, &iv, &pt).unwrap();
        assert_eq!(ct.len(), 32);
        assert_eq!(::hex::encode(&ct[..16]), "f58c4c04d6e5f1ba779eabfb5f7bfbd6");
        assert_eq!(decrypt_with_key(&key, &iv, &ct).unwrap(), pt);
    }

    #[test]
    fn test_zero_padded_known_answer() {
        // openssl enc -aes-256-cbc -K <"secret" zero padded> -iv <"iv" zero padded>
        let ct = encrypt_aes256(b"hello world", "secret", "iv").unwrap();
        assert_eq!(::hex::encode(&ct), "ff467327fe102d1a016acf9f72923d21");
    }

    #[test]
    fn test_zero_padded_truncates_long_strings() {
        let long = "0123456789abcdef0123456789abcdef-overflow";
        let key = KeyDerivation::ZeroPadded.derive_key(long).unwrap();
        assert_eq!(&key[..], b"0123456789abcdef0123456789abcdef");

        let iv = KeyDerivation::ZeroPadded.derive_iv("ab").unwrap();
        assert_eq!(&iv[..2], b"ab");
        assert!(iv[2..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_hkdf_derivation_is_deterministic_and_distinct() {
        let a = KeyDerivation::HkdfSha256.derive_key("passphrase").unwrap();
        let b = KeyDerivation::HkdfSha256.derive_key("passphrase").unwrap();
        let c = KeyDerivation::HkdfSha256.derive_key("passphrase!").unwrap();
        assert_eq!(*a, *b);
        assert_ne!(*a, *c);

        let legacy = KeyDerivation::ZeroPadded.derive_key("passphrase").unwrap();
        assert_ne!(*a, *legacy);
    }

    #[test]
    fn test_hkdf_cipher_roundtrip() {
        let cipher = Aes256CbcCipher::new(KeyDerivation::HkdfSha256);
        let ct = cipher.encrypt(b"patient notes", "k", "v").unwrap();
        assert_eq!(cipher.decrypt(&ct, "k", "v").unwrap(), b"patient notes");

        let legacy = Aes256CbcCipher::default().decrypt(&ct, "k", "v");
        assert!(legacy.map_or(true, |pt| pt != b"patient notes"));
    }

    #[test]
    fn test_empty_arguments_rejected() {
        for err in [
            encrypt_aes256(b"", "key", "iv").unwrap_err(),
            encrypt_aes256(b"data", "", "iv").unwrap_err(),
            encrypt_aes256(b"data", "key", "").unwrap_err(),
            decrypt_aes256(b"", "key", "iv").unwrap_err(),
            decrypt_aes256(&[0u8; 16], "", "iv").unwrap_err(),
            decrypt_aes256(&[0u8; 16], "key", "").unwrap_err(),
        ] {
            assert_eq!(err.kind(), FailureKind::Validation);
            assert!(matches!(err, CryptoError::EmptyInput { .. }));
        }
    }

    #[test]
    fn test_misaligned_ciphertext_rejected() {
        let err = decrypt_aes256(&[0u8; 15], "key", "iv").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Primitive);
    }

    #[test]
    fn test_malformed_padding_rejected() {
        // A block whose plaintext ends in 0x00 can never carry valid PKCS#7 padding.
        let key = KeyDerivation::ZeroPadded.derive_key("key").unwrap();
        let iv = KeyDerivation::ZeroPadded.derive_iv("iv").unwrap();
        let forged = Aes256CbcEnc::new_from_slices(&key[..], &iv[..])
            .unwrap()
            .encrypt_padded_vec_mut::<NoPadding>(&[0u8; 16]);

        let err = decrypt_aes256(&forged, "key", "iv").unwrap_err();
        assert!(matches!(err, CryptoError::DecryptionFailed(_)));
    }

    #[test]
    fn test_key_derivation_from_str() {
        assert_eq!("zero-padded".parse::<KeyDerivation>().unwrap(), KeyDerivation::ZeroPadded);
        assert_eq!("HKDF-SHA256".parse::<KeyDerivation>().unwrap(), KeyDerivation::HkdfSha256);
        assert!("pbkdf2".parse::<KeyDerivation>().is_err());
    }
}
