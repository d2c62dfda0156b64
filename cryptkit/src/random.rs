use crate::error::{CryptoError, CryptoResult};
use crate::hex::encode_hex;
use rand::{rngs::OsRng, RngCore};

/// Hard upper bound on a single request, in bytes or characters.
pub const MAX_RANDOM_LENGTH: usize = 1 << 20;

fn check_length(got: usize) -> CryptoResult<()> {
    if got > MAX_RANDOM_LENGTH {
        tracing::debug!(max = MAX_RANDOM_LENGTH, got, "random length over hard limit");
        return Err(CryptoError::LengthLimit {
            max: MAX_RANDOM_LENGTH,
            got,
        });
    }
    Ok(())
}

/// Fills a new buffer of `len` bytes from the operating system CSPRNG.
///
/// # Errors
///
/// Fails above [`MAX_RANDOM_LENGTH`] or if the OS source fails.
pub fn random_bytes(len: usize) -> CryptoResult<Vec<u8>> {
    check_length(len)?;
    let mut buf = vec![0u8; len];
    OsRng.try_fill_bytes(&mut buf).map_err(|e| {
        tracing::debug!(error = %e, "OS random source failed");
        CryptoError::RandomUnavailable(e.to_string())
    })?;
    Ok(buf)
}

/// Generates a random string of exactly `length` uppercase hexits.
///
/// `ceil(length / 2)` random bytes are drawn and rendered through the hex
/// codec; an odd `length` drops the final hexit. Lengths above
/// [`MAX_RANDOM_LENGTH`] are rejected.
pub fn random_string(length: usize) -> CryptoResult<String> {
    check_length(length)?;
    let bytes = random_bytes(length.div_ceil(2))?;
    let mut rendered = encode_hex(&bytes);
    rendered.truncate(length);
    Ok(rendered)
}
