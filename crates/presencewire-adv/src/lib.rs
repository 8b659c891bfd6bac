//! Extended presence advertisements: building and fail-closed parsing.
//!
//! A V1 advertisement carries one section:
//! - a header byte (version in the top three bits) and a section-length byte
//! - a plain salt or encryption-info element, from which the nonce is derived
//! - an identity header, followed by the encrypted identity and inner data elements
//! - a trailing MIC over the whole section
//!
//! [`AdvertisementBuilder`] and [`AdvertisementParser`] take the cipher as an
//! injected [`Cryptor`](presencewire_crypto::Cryptor).

pub mod advertisement;
pub mod builder;
pub mod config;
pub mod credential;
pub mod error;
pub mod identity;
pub mod parser;
pub mod request;
pub mod section;

pub use advertisement::Advertisement;
pub use builder::AdvertisementBuilder;
pub use config::ParserConfig;
pub use credential::Credential;
pub use error::{AdvertisementError, AuthCheck, Result};
pub use identity::{IdentityType, IDENTITY_LENGTH};
pub use parser::AdvertisementParser;
pub use request::BroadcastRequest;
pub use section::{CIPHER_START_INDEX, MAX_SECTION_LENGTH, PRESENCE_UUID, SALT_LENGTH};
