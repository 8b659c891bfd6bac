use std::fmt;

use presencewire_element::ElementError;

use crate::identity::IdentityType;

/// Which authentication check rejected an advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCheck {
    /// The recovered metadata key does not match the credential's tag.
    MetadataKeyTag,
    /// The trailing MIC does not match the section bytes.
    Mic,
}

impl fmt::Display for AuthCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MetadataKeyTag => f.write_str("metadata key tag"),
            Self::Mic => f.write_str("mic"),
        }
    }
}

/// Errors that can occur while building or parsing an advertisement.
///
/// Every variant is terminal for the call that produced it: no partially
/// built or partially parsed advertisement is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvertisementError {
    /// A data element header is truncated or its type overflows.
    #[error("malformed data element header")]
    MalformedHeader,

    /// The input ended before a complete field could be read.
    #[error("truncated advertisement (needed {needed} bytes, {remaining} remaining)")]
    Truncated { needed: usize, remaining: usize },

    /// The header byte names a version other than V1.
    #[error("unsupported advertisement version {0}")]
    UnsupportedVersion(u8),

    /// The salt is neither 2 nor 16 bytes, or the encryption info is not 17.
    #[error("invalid salt length ({length} bytes)")]
    InvalidSaltLength { length: usize },

    /// The identity is not exactly 16 bytes.
    #[error("invalid identity length ({length} bytes, expected 16)")]
    InvalidIdentityLength { length: usize },

    /// The encryption-info element names an unknown or unsupported scheme.
    #[error("invalid encryption scheme {0}")]
    InvalidEncryptionScheme(u8),

    /// A leading element is not the expected salt or identity element.
    #[error("unexpected data element type {data_type}")]
    UnexpectedElement { data_type: u32 },

    /// The identity element's type is not an encrypted identity.
    #[error("unsupported identity type {0}")]
    UnsupportedIdentityType(IdentityType),

    /// A salt, encryption-info or identity element reappeared after the
    /// leading elements.
    #[error("duplicate structural data element type {data_type}")]
    StructuralDuplicate { data_type: u32 },

    /// An ACTION element does not hold exactly one byte.
    #[error("invalid action length ({length} bytes, expected 1)")]
    InvalidActionLength { length: usize },

    /// A data element value exceeds the 127-byte header limit.
    #[error("data element too long ({length} bytes, max 127)")]
    ElementTooLong { length: usize },

    /// The section or its element count exceeds the allowed maximum.
    #[error("section too large ({size}, max {max})")]
    SectionTooLarge { size: usize, max: usize },

    /// The section-length byte disagrees with the bytes that follow it.
    #[error("section length mismatch (declared {declared}, actual {actual})")]
    SectionLengthMismatch { declared: usize, actual: usize },

    /// The cryptor could not derive a nonce from the salt.
    #[error("nonce derivation failed")]
    NonceDerivation,

    /// The cryptor failed to encrypt the section payload.
    #[error("encryption failed")]
    EncryptionFailure,

    /// The cryptor failed to decrypt the section payload.
    #[error("decryption failed")]
    DecryptionFailure,

    /// The cryptor failed to produce a MIC.
    #[error("signing failed")]
    SigningFailure,

    /// An authentication check failed.
    #[error("authentication mismatch ({0})")]
    AuthenticationMismatch(AuthCheck),
}

impl From<ElementError> for AdvertisementError {
    fn from(err: ElementError) -> Self {
        match err {
            ElementError::MalformedHeader => Self::MalformedHeader,
            ElementError::Truncated { needed, remaining } => Self::Truncated { needed, remaining },
            ElementError::LengthOutOfRange { length } => Self::ElementTooLong { length },
            ElementError::InvalidSaltLength { length }
            | ElementError::InvalidEncryptionInfoLength { length } => {
                Self::InvalidSaltLength { length }
            }
            ElementError::InvalidEncryptionScheme(scheme) => Self::InvalidEncryptionScheme(scheme),
            ElementError::UnsupportedVersion(version) => Self::UnsupportedVersion(version),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvertisementError>;
