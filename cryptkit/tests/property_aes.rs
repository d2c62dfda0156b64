//! AES-256-CBC properties over arbitrary inputs.
//!
//! For any non-empty plaintext, key and IV string, encryption is a whole
//! number of blocks, deterministic, and decrypts back to the plaintext under
//! either key derivation.

use cryptkit::symmetric::{Aes256CbcCipher, KeyDerivation, BLOCK_LEN};
use proptest::prelude::*;

fn arb_derivation() -> impl Strategy<Value = KeyDerivation> {
    prop_oneof![Just(KeyDerivation::ZeroPadded), Just(KeyDerivation::HkdfSha256)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip(
        plaintext in proptest::collection::vec(any::<u8>(), 1..512),
        key in "\\PC{1,48}",
        iv in "\\PC{1,24}",
        derivation in arb_derivation(),
    ) {
        let cipher = Aes256CbcCipher::new(derivation);
        let ct = cipher.encrypt(&plaintext, &key, &iv).unwrap();

        prop_assert_eq!(ct.len() % BLOCK_LEN, 0);
        prop_assert!(ct.len() > plaintext.len());
        prop_assert_eq!(cipher.decrypt(&ct, &key, &iv).unwrap(), plaintext);
    }

    #[test]
    fn deterministic(
        plaintext in proptest::collection::vec(any::<u8>(), 1..128),
        key in "[a-zA-Z0-9]{1,40}",
        iv in "[a-zA-Z0-9]{1,20}",
        derivation in arb_derivation(),
    ) {
        let cipher = Aes256CbcCipher::new(derivation);
        let a = cipher.encrypt(&plaintext, &key, &iv).unwrap();
        let b = cipher.encrypt(&plaintext, &key, &iv).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn zero_padded_ignores_bytes_past_key_length(
        plaintext in proptest::collection::vec(any::<u8>(), 1..64),
        suffix in "[a-z]{1,16}",
    ) {
        let cipher = Aes256CbcCipher::new(KeyDerivation::ZeroPadded);
        let base = "k".repeat(32);
        let longer = format!("{}{}", base, suffix);

        prop_assert_eq!(
            cipher.encrypt(&plaintext, &base, "iv").unwrap(),
            cipher.encrypt(&plaintext, &longer, "iv").unwrap()
        );
    }
}
