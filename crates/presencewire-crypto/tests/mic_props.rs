use presencewire_crypto::{Cryptor, MicCryptor, MIC_LENGTH};
use proptest::prelude::*;

proptest! {
    #[test]
    fn decrypt_inverts_encrypt(
        salt in any::<[u8; 2]>(),
        seed in any::<[u8; 32]>(),
        plaintext in proptest::collection::vec(any::<u8>(), 16..128),
    ) {
        let cryptor = MicCryptor::new();
        let nonce = cryptor.nonce_from_salt(&salt).unwrap();
        let ciphertext = cryptor.encrypt(&plaintext, &nonce, &seed).unwrap();
        prop_assert_eq!(cryptor.decrypt(&ciphertext, &nonce, &seed).unwrap(), plaintext);
    }

    #[test]
    fn any_bit_flip_fails_verification(
        data in proptest::collection::vec(any::<u8>(), 1..64),
        bit in any::<prop::sample::Index>(),
    ) {
        let cryptor = MicCryptor::new();
        let seed = [0x07u8; 16];
        let tag = cryptor.sign(&data, &seed).unwrap();
        prop_assert_eq!(tag.len(), MIC_LENGTH);

        let mut tampered = data.clone();
        let position = bit.index(tampered.len() * 8);
        tampered[position / 8] ^= 1 << (position % 8);
        prop_assert!(!cryptor.verify(&tampered, &seed, &tag));
    }
}
