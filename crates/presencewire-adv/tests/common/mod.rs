#![allow(dead_code)]

use presencewire_adv::Credential;
use presencewire_crypto::{Cryptor, Result};

pub const STUB_TAG: [u8; 16] = [0xA5; 16];
pub const KEY_SEED: [u8; 16] = [0x07; 16];
pub const ZERO_IDENTITY: [u8; 16] = [0u8; 16];

/// Identity cipher, a constant tag that always verifies, and a metadata tag
/// equal to the metadata key.
#[derive(Debug, Clone, Copy)]
pub struct StubCryptor;

impl Cryptor for StubCryptor {
    fn signature_len(&self) -> usize {
        STUB_TAG.len()
    }

    fn encrypt(&self, plaintext: &[u8], _nonce: &[u8], _key_seed: &[u8]) -> Result<Vec<u8>> {
        Ok(plaintext.to_vec())
    }

    fn decrypt(&self, ciphertext: &[u8], _nonce: &[u8], _key_seed: &[u8]) -> Result<Vec<u8>> {
        Ok(ciphertext.to_vec())
    }

    fn sign(&self, _data: &[u8], _key_seed: &[u8]) -> Result<Vec<u8>> {
        Ok(STUB_TAG.to_vec())
    }

    fn verify(&self, _data: &[u8], _key_seed: &[u8], _signature: &[u8]) -> bool {
        true
    }

    fn nonce_from_salt(&self, salt: &[u8]) -> Result<Vec<u8>> {
        Ok(salt.to_vec())
    }

    fn nonce_from_salt_at(&self, salt: &[u8], _offset: usize) -> Result<Vec<u8>> {
        Ok(salt.to_vec())
    }

    fn metadata_key_tag(&self, metadata_key: &[u8], _key_seed: &[u8]) -> Result<Vec<u8>> {
        Ok(metadata_key.to_vec())
    }
}

/// Credential that accepts the all-zero identity under [`StubCryptor`].
pub fn stub_credential() -> Credential {
    Credential::new(KEY_SEED.to_vec(), ZERO_IDENTITY.to_vec())
}

/// Frame a V1 section by hand for [`StubCryptor`]: the plaintext is the
/// ciphertext and the tag is [`STUB_TAG`].
pub fn stub_frame(leading: &[u8], identity_header: &[u8], plaintext: &[u8]) -> Vec<u8> {
    let mut section = Vec::new();
    section.extend_from_slice(leading);
    section.extend_from_slice(identity_header);
    section.extend_from_slice(plaintext);
    section.extend_from_slice(&STUB_TAG);

    let mut frame = vec![0x20, section.len() as u8];
    frame.extend_from_slice(&section);
    frame
}

/// The zero identity followed by already-encoded inner elements.
pub fn plaintext_with(inner: &[u8]) -> Vec<u8> {
    let mut plaintext = ZERO_IDENTITY.to_vec();
    plaintext.extend_from_slice(inner);
    plaintext
}

pub const SALT_DE: [u8; 3] = [0x20, 0x01, 0x02];
pub const PRIVATE_IDENTITY_HEADER: [u8; 2] = [0x90, 0x01];
