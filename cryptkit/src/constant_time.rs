/// Constant-time comparison of byte slices
///
/// Returns true if slices are equal, false otherwise. Execution time depends
/// only on the lengths, never on the contents.
///
/// MACs and keys must be compared with this rather than `==`.
///
/// # Example
///
/// ```rust
/// use cryptkit::constant_time::ct_eq;
///
/// assert!(ct_eq(b"expected tag", b"expected tag"));
/// assert!(!ct_eq(b"expected tag", b"forged tag.."));
/// ```
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;

    // Length is not secret
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}
