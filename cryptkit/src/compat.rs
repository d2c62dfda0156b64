//! Absent-on-failure surface.
//!
//! Every operation here mirrors one from the typed API but takes optional
//! inputs and returns `Option`. An absent input, a validation failure and a
//! primitive failure all come back as `None`; the distinction is only kept
//! in the `debug` log. Selectors may be given as raw numeric tags.

use crate::asymmetric::{AsymmetricKey, RsaPublicKeyHandle};
use crate::digest::DigestAlgorithm;
use crate::error::CryptoResult;
use crate::{asymmetric, digest as dg, hex, hmac as mac, keys, random, symmetric};

fn collapse<T>(operation: &'static str, result: CryptoResult<T>) -> Option<T> {
    result
        .map_err(|e| {
            tracing::debug!(operation, kind = ?e.kind(), "operation failed");
        })
        .ok()
}

fn absent<T>(operation: &'static str) -> Option<T> {
    tracing::debug!(operation, "required input absent");
    None
}

pub fn encode_hex(data: Option<&[u8]>) -> Option<String> {
    data.map(hex::encode_hex)
}

pub fn random_string(length: usize) -> Option<String> {
    collapse("random_string", random::random_string(length))
}

pub fn digest(data: Option<&[u8]>, algorithm: DigestAlgorithm) -> Option<Vec<u8>> {
    let Some(data) = data else {
        return absent("digest");
    };
    collapse("digest", dg::digest(data, algorithm))
}

/// Digest selected by the legacy numeric tag; unknown tags yield `None`.
pub fn digest_tagged(data: Option<&[u8]>, tag: u32) -> Option<Vec<u8>> {
    let Some(data) = data else {
        return absent("digest");
    };
    collapse("digest", dg::digest_tagged(data, tag))
}

pub fn md5(data: Option<&[u8]>) -> Option<Vec<u8>> {
    digest(data, DigestAlgorithm::Md5)
}

pub fn sha1(data: Option<&[u8]>) -> Option<Vec<u8>> {
    digest(data, DigestAlgorithm::Sha1)
}

pub fn sha224(data: Option<&[u8]>) -> Option<Vec<u8>> {
    digest(data, DigestAlgorithm::Sha224)
}

pub fn sha256(data: Option<&[u8]>) -> Option<Vec<u8>> {
    digest(data, DigestAlgorithm::Sha256)
}

pub fn sha384(data: Option<&[u8]>) -> Option<Vec<u8>> {
    digest(data, DigestAlgorithm::Sha384)
}

pub fn sha512(data: Option<&[u8]>) -> Option<Vec<u8>> {
    digest(data, DigestAlgorithm::Sha512)
}

pub fn encrypt_aes256(
    plaintext: Option<&[u8]>,
    key: Option<&str>,
    iv: Option<&str>,
) -> Option<Vec<u8>> {
    let (Some(plaintext), Some(key), Some(iv)) = (plaintext, key, iv) else {
        return absent("encrypt_aes256");
    };
    collapse("encrypt_aes256", symmetric::encrypt_aes256(plaintext, key, iv))
}

pub fn decrypt_aes256(
    ciphertext: Option<&[u8]>,
    key: Option<&str>,
    iv: Option<&str>,
) -> Option<Vec<u8>> {
    let (Some(ciphertext), Some(key), Some(iv)) = (ciphertext, key, iv) else {
        return absent("decrypt_aes256");
    };
    collapse("decrypt_aes256", symmetric::decrypt_aes256(ciphertext, key, iv))
}

pub fn rsa_encrypt(
    plaintext: Option<&[u8]>,
    public_key: Option<&RsaPublicKeyHandle>,
) -> Option<Vec<u8>> {
    let (Some(plaintext), Some(public_key)) = (plaintext, public_key) else {
        return absent("rsa_encrypt");
    };
    collapse("rsa_encrypt", asymmetric::rsa_encrypt(plaintext, public_key))
}

pub fn rsa_decrypt(ciphertext: Option<&[u8]>, key: Option<AsymmetricKey<'_>>) -> Option<Vec<u8>> {
    let (Some(ciphertext), Some(key)) = (ciphertext, key) else {
        return absent("rsa_decrypt");
    };
    collapse("rsa_decrypt", asymmetric::rsa_decrypt(ciphertext, key))
}

pub fn hmac(data: Option<&[u8]>, key: Option<&str>, algorithm: DigestAlgorithm) -> Option<Vec<u8>> {
    let (Some(data), Some(key)) = (data, key) else {
        return absent("hmac");
    };
    collapse("hmac", mac::hmac(data, key, algorithm))
}

/// HMAC selected by the legacy numeric tag; unknown tags yield `None`.
pub fn hmac_tagged(data: Option<&[u8]>, key: Option<&str>, tag: u32) -> Option<Vec<u8>> {
    let (Some(data), Some(key)) = (data, key) else {
        return absent("hmac");
    };
    collapse("hmac", mac::hmac_tagged(data, key, tag))
}

pub fn load_public_key_x509(der: Option<&[u8]>) -> Option<RsaPublicKeyHandle> {
    let Some(der) = der else {
        return absent("load_public_key_x509");
    };
    collapse("load_public_key_x509", keys::load_public_key_x509(der))
}
