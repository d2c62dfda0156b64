//! Digests of strings, returned as lowercase hex.
//!
//! The text is first turned into bytes under a [`TextEncoding`]; characters
//! the encoding cannot represent are rejected rather than replaced.

use crate::digest::{digest, DigestAlgorithm};
use crate::error::{CryptoError, CryptoResult};
use crate::hex::encode_hex_lower;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Byte encoding applied to text before hashing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16le")]
    Utf16Le,
    #[serde(rename = "utf-16be")]
    Utf16Be,
    #[serde(rename = "ascii")]
    Ascii,
    #[serde(rename = "latin1")]
    Latin1,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
        }
    }

    /// Encodes `text`, failing if any character has no representation.
    pub fn encode(self, text: &str) -> CryptoResult<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Self::Ascii => {
                if text.is_ascii() {
                    Ok(text.as_bytes().to_vec())
                } else {
                    Err(self.unencodable())
                }
            }
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).map_err(|_| self.unencodable()))
                .collect(),
        }
    }

    fn unencodable(self) -> CryptoError {
        tracing::debug!(encoding = self.name(), "text not representable");
        CryptoError::Unencodable {
            encoding: self.name(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16le" | "utf16le" => Ok(Self::Utf16Le),
            "utf-16be" | "utf16be" => Ok(Self::Utf16Be),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            _ => Err(CryptoError::UnsupportedEncoding(s.to_string())),
        }
    }
}

/// Hashes `text` under `encoding` and renders the digest as lowercase hex.
///
/// ```rust
/// use cryptkit::digest::DigestAlgorithm;
/// use cryptkit::text::{hash_str, TextEncoding};
///
/// let hex = hash_str("abc", DigestAlgorithm::Md5, TextEncoding::Utf8).unwrap();
/// assert_eq!(hex, "900150983cd24fb0d6963f7d28e17f72");
/// ```
pub fn hash_str(
    text: &str,
    algorithm: DigestAlgorithm,
    encoding: TextEncoding,
) -> CryptoResult<String> {
    let bytes = encoding.encode(text)?;
    hash_bytes_hex(&bytes, algorithm)
}

pub fn hash_bytes_hex(data: &[u8], algorithm: DigestAlgorithm) -> CryptoResult<String> {
    digest(data, algorithm).map(|d| encode_hex_lower(&d))
}

pub fn md5_hex(text: &str) -> CryptoResult<String> {
    hash_str(text, DigestAlgorithm::Md5, TextEncoding::Utf8)
}

pub fn sha1_hex(text: &str) -> CryptoResult<String> {
    hash_str(text, DigestAlgorithm::Sha1, TextEncoding::Utf8)
}

pub fn sha224_hex(text: &str) -> CryptoResult<String> {
    hash_str(text, DigestAlgorithm::Sha224, TextEncoding::Utf8)
}

pub fn sha256_hex(text: &str) -> CryptoResult<String> {
    hash_str(text, DigestAlgorithm::Sha256, TextEncoding::Utf8)
}

pub fn sha384_hex(text: &str) -> CryptoResult<String> {
    hash_str(text, DigestAlgorithm::Sha384, TextEncoding::Utf8)
}

pub fn sha512_hex(text: &str) -> CryptoResult<String> {
    hash_str(text, DigestAlgorithm::Sha512, TextEncoding::Utf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_wrappers() {
        assert_eq!(
            sha256_hex("abc").unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            sha512_hex("abc").unwrap(),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
        assert_eq!(md5_hex("").unwrap(), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(sha1_hex("abc").unwrap().len(), 40);
        assert_eq!(sha224_hex("abc").unwrap().len(), 56);
        assert_eq!(sha384_hex("abc").unwrap().len(), 96);
    }

    #[test]
    fn test_utf16_byte_order() {
        assert_eq!(TextEncoding::Utf16Le.encode("a").unwrap(), vec![0x61, 0x00]);
        assert_eq!(TextEncoding::Utf16Be.encode("a").unwrap(), vec![0x00, 0x61]);
        assert_eq!(
            hash_str("a", DigestAlgorithm::Md5, TextEncoding::Utf16Le).unwrap(),
            "4144e195f46de78a3623da7364d04f11"
        );
        assert_eq!(
            hash_str("a", DigestAlgorithm::Md5, TextEncoding::Utf16Be).unwrap(),
            "760f753576f2955b0074758acb4d5fa6"
        );
    }

    #[test]
    fn test_latin1_and_ascii() {
        assert_eq!(
            hash_str("é", DigestAlgorithm::Sha1, TextEncoding::Latin1).unwrap(),
            "1599e9fa41ec68c80230491902786bee889f5bcb"
        );
        assert_eq!(
            hash_str("é", DigestAlgorithm::Sha1, TextEncoding::Utf8).unwrap(),
            "bf15be717ac1b080b4f1c456692825891ff5073d"
        );

        let err = hash_str("é", DigestAlgorithm::Sha1, TextEncoding::Ascii).unwrap_err();
        assert!(matches!(err, CryptoError::Unencodable { encoding: "ascii" }));
        assert!(TextEncoding::Latin1.encode("\u{20ac}").is_err());
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("iso-8859-1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert_eq!("utf16be".parse::<TextEncoding>().unwrap(), TextEncoding::Utf16Be);
        assert!("ebcdic".parse::<TextEncoding>().unwrap_err().is_validation());
    }
}
