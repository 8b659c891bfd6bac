//! Cryptographic capability for presence advertisements.
//!
//! The advertisement builder and parser never call a cipher directly; they go
//! through the [`Cryptor`] trait so the scheme can be swapped or replaced with
//! a deterministic double in tests. [`MicCryptor`] is the production MIC
//! scheme.

pub mod cryptor;
pub mod error;
pub mod mic;

pub use cryptor::Cryptor;
pub use error::{CryptoError, Result};
pub use mic::{MicCryptor, METADATA_KEY_TAG_LENGTH, MIC_LENGTH, NONCE_LENGTH};
