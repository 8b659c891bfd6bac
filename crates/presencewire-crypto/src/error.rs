/// Errors raised by a [`Cryptor`](crate::Cryptor).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    /// The key seed is empty or otherwise unusable.
    #[error("invalid key seed")]
    InvalidKeySeed,

    /// The nonce does not have the length the cipher requires.
    #[error("invalid nonce length ({length} bytes)")]
    InvalidNonce { length: usize },

    /// HKDF could not produce the requested output length.
    #[error("key derivation failed")]
    KeyDerivation,

    /// The MAC could not be keyed.
    #[error("mac initialization failed")]
    Mac,
}

pub type Result<T> = std::result::Result<T, CryptoError>;
