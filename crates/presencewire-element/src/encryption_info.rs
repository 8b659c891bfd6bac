//! Encryption-info element: one scheme byte followed by a 16-byte salt.
//!
//! ```text
//! ┌───┬────────┬─────┐┌───────────────────┐
//! │ 0 │ scheme │ RFU ││ salt (16 bytes)   │
//! │ 1b│ 4b     │ 3b  ││                   │
//! └───┴────────┴─────┘└───────────────────┘
//! ```

use crate::error::{ElementError, Result};

/// Encoded size of the element value.
pub const ENCRYPTION_INFO_LENGTH: usize = 17;

/// Salt length carried by the encryption-info element.
pub const EXTENDED_SALT_LENGTH: usize = ENCRYPTION_INFO_LENGTH - 1;

const ENCODING_SCHEME_MASK: u8 = 0b0111_1000;
const ENCODING_SCHEME_OFFSET: u32 = 3;

/// How the section is authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EncodingScheme {
    /// Symmetric message integrity code.
    Mic = 0,
    /// Asymmetric signature.
    Signature = 1,
}

impl TryFrom<u8> for EncodingScheme {
    type Error = ElementError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Mic),
            1 => Ok(Self::Signature),
            other => Err(ElementError::InvalidEncryptionScheme(other)),
        }
    }
}

/// Parsed encryption-info element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncryptionInfo {
    scheme: EncodingScheme,
    salt: [u8; EXTENDED_SALT_LENGTH],
}

impl EncryptionInfo {
    /// Create an encryption-info element. `salt` must be exactly 16 bytes.
    pub fn new(scheme: EncodingScheme, salt: &[u8]) -> Result<Self> {
        let salt: [u8; EXTENDED_SALT_LENGTH] = salt
            .try_into()
            .map_err(|_| ElementError::InvalidSaltLength { length: salt.len() })?;
        Ok(Self { scheme, salt })
    }

    pub fn scheme(&self) -> EncodingScheme {
        self.scheme
    }

    pub fn salt(&self) -> &[u8; EXTENDED_SALT_LENGTH] {
        &self.salt
    }

    /// Serialize to the 17-byte element value.
    pub fn to_bytes(&self) -> [u8; ENCRYPTION_INFO_LENGTH] {
        let mut out = [0u8; ENCRYPTION_INFO_LENGTH];
        out[0] = ((self.scheme as u8) << ENCODING_SCHEME_OFFSET) & ENCODING_SCHEME_MASK;
        out[1..].copy_from_slice(&self.salt);
        out
    }

    /// Parse a 17-byte element value.
    pub fn decode(src: &[u8]) -> Result<Self> {
        if src.len() != ENCRYPTION_INFO_LENGTH {
            return Err(ElementError::InvalidEncryptionInfoLength { length: src.len() });
        }
        let scheme = EncodingScheme::try_from(
            (src[0] & ENCODING_SCHEME_MASK) >> ENCODING_SCHEME_OFFSET,
        )?;
        Self::new(scheme, &src[1..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; 16] = [
        0xDE, 0x2A, 0x89, 0xED, 0x98, 0x47, 0x4A, 0xF3, 0xE4, 0x1E, 0x48, 0x48, 0x7E, 0x8A, 0xEB,
        0xDE,
    ];

    #[test]
    fn encodes_mic_scheme() {
        let info = EncryptionInfo::new(EncodingScheme::Mic, &SALT).unwrap();
        let bytes = info.to_bytes();
        assert_eq!(bytes.len(), ENCRYPTION_INFO_LENGTH);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(&bytes[1..], &SALT);
    }

    #[test]
    fn encodes_signature_scheme() {
        let info = EncryptionInfo::new(EncodingScheme::Signature, &SALT).unwrap();
        assert_eq!(info.to_bytes()[0], 0b0000_1000);
    }

    #[test]
    fn decodes_what_it_encodes() {
        let info = EncryptionInfo::new(EncodingScheme::Signature, &SALT).unwrap();
        let decoded = EncryptionInfo::decode(&info.to_bytes()).unwrap();
        assert_eq!(decoded.scheme(), EncodingScheme::Signature);
        assert_eq!(decoded.salt(), &SALT);
    }

    #[test]
    fn decode_ignores_reserved_bits() {
        let mut bytes = [0u8; ENCRYPTION_INFO_LENGTH];
        bytes[0] = 0b1000_0111;
        let decoded = EncryptionInfo::decode(&bytes).unwrap();
        assert_eq!(decoded.scheme(), EncodingScheme::Mic);
    }

    #[test]
    fn rejects_short_salt() {
        let err = EncryptionInfo::new(EncodingScheme::Mic, &[1, 2]).unwrap_err();
        assert_eq!(err, ElementError::InvalidSaltLength { length: 2 });
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            EncryptionInfo::decode(&[0u8; 16]).unwrap_err(),
            ElementError::InvalidEncryptionInfoLength { length: 16 }
        );
        assert_eq!(
            EncryptionInfo::decode(&[0u8; 18]).unwrap_err(),
            ElementError::InvalidEncryptionInfoLength { length: 18 }
        );
    }

    #[test]
    fn rejects_unknown_scheme() {
        let mut bytes = [0u8; ENCRYPTION_INFO_LENGTH];
        bytes[0] = 0b0001_0000;
        assert_eq!(
            EncryptionInfo::decode(&bytes).unwrap_err(),
            ElementError::InvalidEncryptionScheme(2)
        );
    }
}
