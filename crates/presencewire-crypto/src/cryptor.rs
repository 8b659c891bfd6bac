use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::error::Result;

/// Cryptographic capability consumed by the advertisement builder and parser.
///
/// Implementations must be stateless or internally synchronized: a single
/// instance is shared by reference across concurrent encode/decode calls.
pub trait Cryptor: Send + Sync {
    /// Length of the trailing authentication tag produced by [`Cryptor::sign`].
    fn signature_len(&self) -> usize;

    /// Encrypt `plaintext` under a key derived from `key_seed`.
    fn encrypt(&self, plaintext: &[u8], nonce: &[u8], key_seed: &[u8]) -> Result<Vec<u8>>;

    /// Inverse of [`Cryptor::encrypt`].
    fn decrypt(&self, ciphertext: &[u8], nonce: &[u8], key_seed: &[u8]) -> Result<Vec<u8>>;

    /// Compute a `signature_len()`-byte tag over `data`.
    fn sign(&self, data: &[u8], key_seed: &[u8]) -> Result<Vec<u8>>;

    /// Check `signature` against `data`. Returns false on any failure.
    fn verify(&self, data: &[u8], key_seed: &[u8], signature: &[u8]) -> bool;

    /// Derive the cipher nonce for a short (2-byte) salt.
    fn nonce_from_salt(&self, salt: &[u8]) -> Result<Vec<u8>>;

    /// Derive the cipher nonce for an extended salt, bound to the data
    /// element position `offset`.
    fn nonce_from_salt_at(&self, salt: &[u8], offset: usize) -> Result<Vec<u8>>;

    /// Keyed hash binding a metadata key to the credential's key seed.
    fn metadata_key_tag(&self, metadata_key: &[u8], key_seed: &[u8]) -> Result<Vec<u8>>;

    /// Compare the tag of `metadata_key` against `expected` in constant time.
    fn verify_metadata_key_tag(
        &self,
        metadata_key: &[u8],
        key_seed: &[u8],
        expected: &[u8],
    ) -> bool {
        match self.metadata_key_tag(metadata_key, key_seed) {
            Ok(tag) => tag.as_slice().ct_eq(expected).into(),
            Err(_) => false,
        }
    }
}

impl<C: Cryptor + ?Sized> Cryptor for Arc<C> {
    fn signature_len(&self) -> usize {
        (**self).signature_len()
    }

    fn encrypt(&self, plaintext: &[u8], nonce: &[u8], key_seed: &[u8]) -> Result<Vec<u8>> {
        (**self).encrypt(plaintext, nonce, key_seed)
    }

    fn decrypt(&self, ciphertext: &[u8], nonce: &[u8], key_seed: &[u8]) -> Result<Vec<u8>> {
        (**self).decrypt(ciphertext, nonce, key_seed)
    }

    fn sign(&self, data: &[u8], key_seed: &[u8]) -> Result<Vec<u8>> {
        (**self).sign(data, key_seed)
    }

    fn verify(&self, data: &[u8], key_seed: &[u8], signature: &[u8]) -> bool {
        (**self).verify(data, key_seed, signature)
    }

    fn nonce_from_salt(&self, salt: &[u8]) -> Result<Vec<u8>> {
        (**self).nonce_from_salt(salt)
    }

    fn nonce_from_salt_at(&self, salt: &[u8], offset: usize) -> Result<Vec<u8>> {
        (**self).nonce_from_salt_at(salt, offset)
    }

    fn metadata_key_tag(&self, metadata_key: &[u8], key_seed: &[u8]) -> Result<Vec<u8>> {
        (**self).metadata_key_tag(metadata_key, key_seed)
    }

    fn verify_metadata_key_tag(
        &self,
        metadata_key: &[u8],
        key_seed: &[u8],
        expected: &[u8],
    ) -> bool {
        (**self).verify_metadata_key_tag(metadata_key, key_seed, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tags are the metadata key itself; everything else is unused.
    struct EchoTag;

    impl Cryptor for EchoTag {
        fn signature_len(&self) -> usize {
            0
        }
        fn encrypt(&self, plaintext: &[u8], _: &[u8], _: &[u8]) -> Result<Vec<u8>> {
            Ok(plaintext.to_vec())
        }
        fn decrypt(&self, ciphertext: &[u8], _: &[u8], _: &[u8]) -> Result<Vec<u8>> {
            Ok(ciphertext.to_vec())
        }
        fn sign(&self, _: &[u8], _: &[u8]) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
        fn verify(&self, _: &[u8], _: &[u8], _: &[u8]) -> bool {
            true
        }
        fn nonce_from_salt(&self, salt: &[u8]) -> Result<Vec<u8>> {
            Ok(salt.to_vec())
        }
        fn nonce_from_salt_at(&self, salt: &[u8], _: usize) -> Result<Vec<u8>> {
            Ok(salt.to_vec())
        }
        fn metadata_key_tag(&self, metadata_key: &[u8], _: &[u8]) -> Result<Vec<u8>> {
            Ok(metadata_key.to_vec())
        }
    }

    #[test]
    fn default_tag_check_compares_full_tag() {
        assert!(EchoTag.verify_metadata_key_tag(&[1, 2, 3], &[], &[1, 2, 3]));
        assert!(!EchoTag.verify_metadata_key_tag(&[1, 2, 3], &[], &[1, 2, 4]));
        assert!(!EchoTag.verify_metadata_key_tag(&[1, 2, 3], &[], &[1, 2]));
    }

    #[test]
    fn arc_forwards_to_inner() {
        let shared: Arc<dyn Cryptor> = Arc::new(EchoTag);
        assert_eq!(shared.signature_len(), 0);
        assert_eq!(shared.encrypt(&[9], &[], &[]).unwrap(), vec![9]);
        assert!(shared.verify_metadata_key_tag(&[5], &[], &[5]));
    }
}
