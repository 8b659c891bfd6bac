//! MIC encoding scheme: HKDF-SHA256 key schedule, AES-128-CTR, truncated
//! HMAC-SHA256.

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::cryptor::Cryptor;
use crate::error::{CryptoError, Result};

type Aes128Ctr = ctr::Ctr128BE<Aes128>;
type HmacSha256 = Hmac<Sha256>;

/// Length of the truncated MIC appended to every section.
pub const MIC_LENGTH: usize = 16;

/// Length of the derived nonce (one AES block).
pub const NONCE_LENGTH: usize = 16;

/// Length of a metadata key tag.
pub const METADATA_KEY_TAG_LENGTH: usize = 32;

const AES_KEY_LENGTH: usize = 16;
const HMAC_KEY_LENGTH: usize = 32;

const HKDF_SALT: &[u8] = b"Google Nearby";
const AES_KEY_INFO: &[u8] = b"Unsigned Section AES key";
const MIC_HMAC_KEY_INFO: &[u8] = b"Unsigned Section HMAC key";
const METADATA_KEY_HMAC_KEY_INFO: &[u8] = b"Unsigned Section metadata key HMAC key";
const SALT_NONCE_INFO: &[u8] = b"Unsigned Section IV";
const DERIVED_SALT_INFO: &[u8] = b"V1 derived salt";

/// The MIC-scheme cryptor. Stateless; every call derives fresh keys from the
/// key seed and wipes them before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicCryptor;

impl MicCryptor {
    pub fn new() -> Self {
        Self
    }

    fn aes_key(key_seed: &[u8]) -> Result<Zeroizing<[u8; AES_KEY_LENGTH]>> {
        derive_key(key_seed, AES_KEY_INFO)
    }

    fn mic_key(key_seed: &[u8]) -> Result<Zeroizing<[u8; HMAC_KEY_LENGTH]>> {
        derive_key(key_seed, MIC_HMAC_KEY_INFO)
    }

    fn metadata_hmac_key(key_seed: &[u8]) -> Result<Zeroizing<[u8; HMAC_KEY_LENGTH]>> {
        derive_key(key_seed, METADATA_KEY_HMAC_KEY_INFO)
    }

    fn apply_keystream(data: &[u8], nonce: &[u8], key_seed: &[u8]) -> Result<Vec<u8>> {
        if nonce.len() != NONCE_LENGTH {
            return Err(CryptoError::InvalidNonce {
                length: nonce.len(),
            });
        }
        let key = Self::aes_key(key_seed)?;
        let mut cipher = Aes128Ctr::new_from_slices(key.as_slice(), nonce).map_err(|_| {
            CryptoError::InvalidNonce {
                length: nonce.len(),
            }
        })?;
        let mut out = data.to_vec();
        cipher.apply_keystream(&mut out);
        Ok(out)
    }
}

impl Cryptor for MicCryptor {
    fn signature_len(&self) -> usize {
        MIC_LENGTH
    }

    fn encrypt(&self, plaintext: &[u8], nonce: &[u8], key_seed: &[u8]) -> Result<Vec<u8>> {
        Self::apply_keystream(plaintext, nonce, key_seed)
    }

    fn decrypt(&self, ciphertext: &[u8], nonce: &[u8], key_seed: &[u8]) -> Result<Vec<u8>> {
        Self::apply_keystream(ciphertext, nonce, key_seed)
    }

    fn sign(&self, data: &[u8], key_seed: &[u8]) -> Result<Vec<u8>> {
        let key = Self::mic_key(key_seed)?;
        let mut tag = hmac_sha256(key.as_slice(), data)?;
        tag.truncate(MIC_LENGTH);
        Ok(tag)
    }

    fn verify(&self, data: &[u8], key_seed: &[u8], signature: &[u8]) -> bool {
        match self.sign(data, key_seed) {
            Ok(expected) => expected.as_slice().ct_eq(signature).into(),
            Err(err) => {
                tracing::debug!(error = %err, "mic verification could not run");
                false
            }
        }
    }

    fn nonce_from_salt(&self, salt: &[u8]) -> Result<Vec<u8>> {
        let mut nonce = vec![0u8; NONCE_LENGTH];
        Hkdf::<Sha256>::new(Some(HKDF_SALT), salt)
            .expand(SALT_NONCE_INFO, &mut nonce)
            .map_err(|_| CryptoError::KeyDerivation)?;
        Ok(nonce)
    }

    fn nonce_from_salt_at(&self, salt: &[u8], offset: usize) -> Result<Vec<u8>> {
        let len = offset
            .checked_add(NONCE_LENGTH)
            .ok_or(CryptoError::KeyDerivation)?;
        let mut okm = vec![0u8; len];
        Hkdf::<Sha256>::new(Some(HKDF_SALT), salt)
            .expand(DERIVED_SALT_INFO, &mut okm)
            .map_err(|_| CryptoError::KeyDerivation)?;
        Ok(okm.split_off(offset))
    }

    fn metadata_key_tag(&self, metadata_key: &[u8], key_seed: &[u8]) -> Result<Vec<u8>> {
        let key = Self::metadata_hmac_key(key_seed)?;
        hmac_sha256(key.as_slice(), metadata_key)
    }
}

fn derive_key<const N: usize>(key_seed: &[u8], info: &[u8]) -> Result<Zeroizing<[u8; N]>> {
    if key_seed.is_empty() {
        return Err(CryptoError::InvalidKeySeed);
    }
    let mut key = Zeroizing::new([0u8; N]);
    Hkdf::<Sha256>::new(Some(HKDF_SALT), key_seed)
        .expand(info, key.as_mut_slice())
        .map_err(|_| CryptoError::KeyDerivation)?;
    Ok(key)
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).map_err(|_| CryptoError::Mac)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_SEED: [u8; 32] = [0x07; 32];

    #[test]
    fn encrypt_then_decrypt() {
        let cryptor = MicCryptor::new();
        let nonce = cryptor.nonce_from_salt(&[0x01, 0x02]).unwrap();
        let plaintext = b"metadata key 16b plus elements";

        let ciphertext = cryptor.encrypt(plaintext, &nonce, &KEY_SEED).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len());
        assert_ne!(ciphertext.as_slice(), plaintext.as_slice());
        assert_eq!(
            cryptor.decrypt(&ciphertext, &nonce, &KEY_SEED).unwrap(),
            plaintext
        );
    }

    #[test]
    fn different_seed_gives_different_keystream() {
        let cryptor = MicCryptor::new();
        let nonce = cryptor.nonce_from_salt(&[0x01, 0x02]).unwrap();
        let a = cryptor.encrypt(&[0u8; 16], &nonce, &KEY_SEED).unwrap();
        let b = cryptor.encrypt(&[0u8; 16], &nonce, &[0x08; 32]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_bad_nonce_and_empty_seed() {
        let cryptor = MicCryptor::new();
        assert_eq!(
            cryptor.encrypt(&[1, 2, 3], &[0u8; 12], &KEY_SEED).unwrap_err(),
            CryptoError::InvalidNonce { length: 12 }
        );
        assert_eq!(
            cryptor.encrypt(&[1, 2, 3], &[0u8; 16], &[]).unwrap_err(),
            CryptoError::InvalidKeySeed
        );
        assert_eq!(cryptor.sign(b"data", &[]).unwrap_err(), CryptoError::InvalidKeySeed);
    }

    #[test]
    fn sign_is_truncated_and_verifiable() {
        let cryptor = MicCryptor::new();
        let tag = cryptor.sign(b"section", &KEY_SEED).unwrap();
        assert_eq!(tag.len(), MIC_LENGTH);
        assert!(cryptor.verify(b"section", &KEY_SEED, &tag));
        assert!(!cryptor.verify(b"sectioN", &KEY_SEED, &tag));
        assert!(!cryptor.verify(b"section", &KEY_SEED, &tag[..15]));
        assert!(!cryptor.verify(b"section", &[], &tag));
    }

    #[test]
    fn nonce_is_deterministic_per_salt() {
        let cryptor = MicCryptor::new();
        let a = cryptor.nonce_from_salt(&[0x01, 0x02]).unwrap();
        assert_eq!(a.len(), NONCE_LENGTH);
        assert_eq!(a, cryptor.nonce_from_salt(&[0x01, 0x02]).unwrap());
        assert_ne!(a, cryptor.nonce_from_salt(&[0x02, 0x01]).unwrap());
    }

    #[test]
    fn offset_nonce_slices_expanded_output() {
        let cryptor = MicCryptor::new();
        let salt = [0x5Au8; 16];
        let at_zero = cryptor.nonce_from_salt_at(&salt, 0).unwrap();
        let at_two = cryptor.nonce_from_salt_at(&salt, 2).unwrap();
        assert_eq!(at_zero.len(), NONCE_LENGTH);
        assert_eq!(at_two.len(), NONCE_LENGTH);
        // HKDF output is a prefix-stable stream for a fixed info string
        assert_eq!(&at_zero[2..], &at_two[..14]);
    }

    #[test]
    fn metadata_tag_is_full_hmac() {
        let cryptor = MicCryptor::new();
        let tag = cryptor.metadata_key_tag(&[0u8; 16], &KEY_SEED).unwrap();
        assert_eq!(tag.len(), METADATA_KEY_TAG_LENGTH);
        assert!(cryptor.verify_metadata_key_tag(&[0u8; 16], &KEY_SEED, &tag));
        assert!(!cryptor.verify_metadata_key_tag(&[1u8; 16], &KEY_SEED, &tag));
    }
}
