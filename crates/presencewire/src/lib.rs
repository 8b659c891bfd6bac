//! Authenticated, encrypted presence advertisements.
//!
//! presencewire builds and parses single-section extended presence
//! advertisements: a bit-packed data element framing, a salt-derived nonce,
//! an encrypted identity bound to a credential, and a trailing MIC.
//!
//! # Crate Structure
//!
//! - [`element`]: data element header codec, encryption info, byte cursor
//! - [`crypto`]: the [`Cryptor`] capability and the concrete [`MicCryptor`]
//! - [`adv`]: advertisement builder, fail-closed parser, credentials
//!
//! ```
//! use presencewire::{AdvertisementBuilder, AdvertisementParser, BroadcastRequest};
//! use presencewire::{Credential, Cryptor, MicCryptor};
//!
//! let key_seed = [0x07u8; 16];
//! let identity = [0x42u8; 16];
//! let request = BroadcastRequest::new(vec![0x01, 0x02], identity.to_vec(), key_seed.to_vec())
//!     .with_action(6);
//! let adv = AdvertisementBuilder::new(MicCryptor::new()).build(&request).unwrap();
//!
//! let tag = MicCryptor::new().metadata_key_tag(&identity, &key_seed).unwrap();
//! let credential = Credential::new(key_seed.to_vec(), tag);
//! let parsed = AdvertisementParser::new(MicCryptor::new())
//!     .parse(&adv.to_bytes(), &credential)
//!     .unwrap();
//! assert_eq!(parsed.actions(), &[6]);
//! ```

/// Re-export data element types.
pub mod element {
    pub use presencewire_element::*;
}

/// Re-export cryptor types.
pub mod crypto {
    pub use presencewire_crypto::*;
}

/// Re-export advertisement types.
pub mod adv {
    pub use presencewire_adv::*;
}

pub use presencewire_adv::{
    Advertisement, AdvertisementBuilder, AdvertisementError, AdvertisementParser,
    BroadcastRequest, Credential, IdentityType, ParserConfig,
};
pub use presencewire_crypto::{Cryptor, MicCryptor};
