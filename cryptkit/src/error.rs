use thiserror::Error;

/// Broad category of a failure.
///
/// Callers that only care whether an operation succeeded can ignore this and
/// use the [`compat`](crate::compat) surface, which reports both kinds as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The caller supplied absent, empty or malformed input, or an unknown selector.
    Validation,
    /// The underlying primitive reported an error.
    Primitive,
}

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Empty input: {field} must be at least one byte")]
    EmptyInput { field: &'static str },

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Message too long for key: at most {max} bytes, got {got}")]
    MessageTooLong { max: usize, got: usize },

    #[error("Requested length {got} exceeds the limit of {max}")]
    LengthLimit { max: usize, got: usize },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid certificate: {0}")]
    InvalidCertificate(String),

    #[error("Unsupported text encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Text cannot be represented in {encoding}")]
    Unencodable { encoding: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Secure random source unavailable: {0}")]
    RandomUnavailable(String),

    #[error("MAC computation failed: {0}")]
    MacFailed(String),
}

impl CryptoError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::EmptyInput { .. }
            | Self::UnsupportedAlgorithm(_)
            | Self::MessageTooLong { .. }
            | Self::LengthLimit { .. }
            | Self::InvalidKey(_)
            | Self::InvalidCertificate(_)
            | Self::UnsupportedEncoding(_)
            | Self::Unencodable { .. }
            | Self::Io(_)
            | Self::Configuration(_) => FailureKind::Validation,
            Self::EncryptionFailed(_)
            | Self::DecryptionFailed(_)
            | Self::KeyDerivationFailed(_)
            | Self::KeyGenerationFailed(_)
            | Self::RandomUnavailable(_)
            | Self::MacFailed(_) => FailureKind::Primitive,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == FailureKind::Validation
    }
}

pub type CryptoResult<T> = Result<T, CryptoError>;

/// Rejects an empty buffer, naming the offending argument.
pub(crate) fn require_non_empty(field: &'static str, data: &[u8]) -> CryptoResult<()> {
    if data.is_empty() {
        tracing::debug!(field, "rejected empty input");
        return Err(CryptoError::EmptyInput { field });
    }
    Ok(())
}
