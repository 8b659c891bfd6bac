/// Errors that can occur while encoding or decoding data elements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    /// A multi-byte header ran out of input with its continuation bit still set,
    /// or its type does not fit in 32 bits.
    #[error("malformed data element header")]
    MalformedHeader,

    /// The input ended before a complete field could be read.
    #[error("truncated input (needed {needed} bytes, {remaining} remaining)")]
    Truncated { needed: usize, remaining: usize },

    /// A data element value is too long for the 7-bit header length field.
    #[error("data element length out of range ({length} bytes, max 127)")]
    LengthOutOfRange { length: usize },

    /// The salt is neither 2 bytes (plain salt) nor 16 bytes (encryption info).
    #[error("invalid salt length ({length} bytes)")]
    InvalidSaltLength { length: usize },

    /// An encryption-info element is not exactly 17 bytes.
    #[error("invalid encryption info length ({length} bytes, expected 17)")]
    InvalidEncryptionInfoLength { length: usize },

    /// The encryption-info scheme bits name neither MIC nor SIGNATURE.
    #[error("invalid encryption scheme {0:#04x}")]
    InvalidEncryptionScheme(u8),

    /// The header belongs to an advertisement version this codec does not speak.
    #[error("unsupported advertisement version {0}")]
    UnsupportedVersion(u8),
}

pub type Result<T> = std::result::Result<T, ElementError>;
