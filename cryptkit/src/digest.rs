//! One-shot message digests.
//!
//! All six algorithms are dispatched through [`digest`]; the named wrappers
//! are plain bindings. Unlike the cipher engines, an empty buffer is a valid
//! input and yields the algorithm's digest of the empty string.

use crate::error::{CryptoError, CryptoResult};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

/// Hash algorithm selector shared by the digest and HMAC engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 6] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    /// Digest size in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
        }
    }

    /// Numeric tag used by the legacy HMAC selector.
    pub fn tag(self) -> u32 {
        match self {
            Self::Sha1 => 0,
            Self::Md5 => 1,
            Self::Sha256 => 2,
            Self::Sha384 => 3,
            Self::Sha512 => 4,
            Self::Sha224 => 5,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for DigestAlgorithm {
    type Error = CryptoError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Sha1),
            1 => Ok(Self::Md5),
            2 => Ok(Self::Sha256),
            3 => Ok(Self::Sha384),
            4 => Ok(Self::Sha512),
            5 => Ok(Self::Sha224),
            other => Err(CryptoError::UnsupportedAlgorithm(format!(
                "unknown digest tag {}",
                other
            ))),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(CryptoError::UnsupportedAlgorithm(format!(
                "{}. Valid options: md5, sha1, sha224, sha256, sha384, sha512",
                s
            ))),
        }
    }
}

fn one_shot<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

/// Computes the digest of the whole buffer in one pass.
///
/// # Errors
///
/// The typed selector makes every call valid today; the `Result` keeps the
/// calling convention uniform with the other engines.
pub fn digest(data: &[u8], algorithm: DigestAlgorithm) -> CryptoResult<Vec<u8>> {
    tracing::trace!(%algorithm, len = data.len(), "digest");
    let out = match algorithm {
        DigestAlgorithm::Md5 => one_shot::<Md5>(data),
        DigestAlgorithm::Sha1 => one_shot::<Sha1>(data),
        DigestAlgorithm::Sha224 => one_shot::<Sha224>(data),
        DigestAlgorithm::Sha256 => one_shot::<Sha256>(data),
        DigestAlgorithm::Sha384 => one_shot::<Sha384>(data),
        DigestAlgorithm::Sha512 => one_shot::<Sha512>(data),
    };
    Ok(out)
}

/// Dispatches on a raw numeric tag; unknown tags are rejected.
pub fn digest_tagged(data: &[u8], tag: u32) -> CryptoResult<Vec<u8>> {
    let algorithm = DigestAlgorithm::try_from(tag).map_err(|e| {
        tracing::debug!(tag, "rejected digest selector");
        e
    })?;
    digest(data, algorithm)
}

pub fn md5(data: &[u8]) -> CryptoResult<Vec<u8>> {
    digest(data, DigestAlgorithm::Md5)
}

pub fn sha1(data: &[u8]) -> CryptoResult<Vec<u8>> {
    digest(data, DigestAlgorithm::Sha1)
}

pub fn sha224(data: &[u8]) -> CryptoResult<Vec<u8>> {
    digest(data, DigestAlgorithm::Sha224)
}

pub fn sha256(data: &[u8]) -> CryptoResult<Vec<u8>> {
    digest(data, DigestAlgorithm::Sha256)
}

pub fn sha384(data: &[u8]) -> CryptoResult<Vec<u8>> {
    digest(data, DigestAlgorithm::Sha384)
}

pub fn sha512(data: &[u8]) -> CryptoResult<Vec<u8>> {
    digest(data, DigestAlgorithm::Sha512)
}
