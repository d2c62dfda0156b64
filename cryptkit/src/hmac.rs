//! Keyed-hash message authentication.
//!
//! Each call builds its own `Hmac<D>` instance from the `hmac` crate, feeds
//! the whole buffer, and finalizes. The key string is used as raw UTF-8
//! bytes, with no length normalization; an empty key is passed through.

use crate::constant_time::ct_eq;
use crate::digest::DigestAlgorithm;
use crate::error::{CryptoError, CryptoResult};
use ::hmac::digest::KeyInit;
use ::hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

fn compute<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> CryptoResult<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(key)
        .map_err(|e| CryptoError::MacFailed(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Computes the HMAC of `data` under `key` with the selected hash.
///
/// # Errors
///
/// Fails only if the primitive rejects the key.
pub fn hmac(data: &[u8], key: &str, algorithm: DigestAlgorithm) -> CryptoResult<Vec<u8>> {
    tracing::trace!(%algorithm, len = data.len(), "hmac");
    let key = key.as_bytes();
    let result = match algorithm {
        DigestAlgorithm::Md5 => compute::<Hmac<Md5>>(key, data),
        DigestAlgorithm::Sha1 => compute::<Hmac<Sha1>>(key, data),
        DigestAlgorithm::Sha224 => compute::<Hmac<Sha224>>(key, data),
        DigestAlgorithm::Sha256 => compute::<Hmac<Sha256>>(key, data),
        DigestAlgorithm::Sha384 => compute::<Hmac<Sha384>>(key, data),
        DigestAlgorithm::Sha512 => compute::<Hmac<Sha512>>(key, data),
    };
    result.map_err(|e| {
        tracing::debug!(%algorithm, "HMAC primitive rejected the key");
        e
    })
}

/// Dispatches on a raw numeric selector tag; unknown tags are rejected.
pub fn hmac_tagged(data: &[u8], key: &str, tag: u32) -> CryptoResult<Vec<u8>> {
    let algorithm = DigestAlgorithm::try_from(tag)?;
    hmac(data, key, algorithm)
}

/// Recomputes the MAC and compares it with `expected` in constant time.
pub fn verify_hmac(
    data: &[u8],
    key: &str,
    algorithm: DigestAlgorithm,
    expected: &[u8],
) -> CryptoResult<bool> {
    let actual = hmac(data, key, algorithm)?;
    Ok(ct_eq(&actual, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::encode_hex_lower;

    const JEFE_DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn test_rfc4231_case_1() {
        let key = "\x0b".repeat(20);
        let mac = hmac(b"Hi There", &key, DigestAlgorithm::Sha256).unwrap();
        assert_eq!(
            encode_hex_lower(&mac),
            "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
        );
    }

    #[test]
    fn test_jefe_all_algorithms() {
        // RFC 2202 (MD5, SHA-1) and RFC 4231 (SHA-2) test case 2.
        let expected = [
            (DigestAlgorithm::Md5, "750c783e6ab0b503eaa86e310a5db738"),
            (DigestAlgorithm::Sha1, "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"),
            (
                DigestAlgorithm::Sha224,
                "a30e01098bc6dbbf45690f3a7e9e6d0f8bbea2a39e6148008fd05e44",
            ),
            (
                DigestAlgorithm::Sha256,
                "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843",
            ),
            (
                DigestAlgorithm::Sha384,
                "af45d2e376484031617f78d2b58a6b1b9c7ef464f5a01b47e42ec3736322445e8e2240ca5e69e2c78b3239ecfab21649",
            ),
            (
                DigestAlgorithm::Sha512,
                "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea2505549758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737",
            ),
        ];

        for (algorithm, hex) in expected {
            let mac = hmac(JEFE_DATA, "Jefe", algorithm).unwrap();
            assert_eq!(mac.len(), algorithm.output_len());
            assert_eq!(encode_hex_lower(&mac), hex, "{}", algorithm);
        }
    }

    #[test]
    fn test_empty_key_and_data_pass_through() {
        let mac = hmac(b"hello", "", DigestAlgorithm::Sha256).unwrap();
        assert_eq!(
            encode_hex_lower(&mac),
            "4352b26e33fe0d769a8922a6ba29004109f01688e26acc9e6cb347e5a5afc4da"
        );

        let mac = hmac(b"", "key", DigestAlgorithm::Sha256).unwrap();
        assert_eq!(
            encode_hex_lower(&mac),
            "5d5d139563c95b5967b9bd9a8c9b233a9dedb45072794cd232dc1b74832607d0"
        );
    }

    #[test]
    fn test_verify() {
        let mac = hmac(JEFE_DATA, "Jefe", DigestAlgorithm::Sha384).unwrap();
        assert!(verify_hmac(JEFE_DATA, "Jefe", DigestAlgorithm::Sha384, &mac).unwrap());
        assert!(!verify_hmac(JEFE_DATA, "jefe", DigestAlgorithm::Sha384, &mac).unwrap());
        assert!(!verify_hmac(JEFE_DATA, "Jefe", DigestAlgorithm::Sha384, &mac[..16]).unwrap());
    }

    #[test]
    fn test_unknown_tag() {
        assert!(hmac_tagged(JEFE_DATA, "Jefe", 6).unwrap_err().is_validation());
        assert_eq!(
            hmac_tagged(JEFE_DATA, "Jefe", 2).unwrap(),
            hmac(JEFE_DATA, "Jefe", DigestAlgorithm::Sha256).unwrap()
        );
    }
}
