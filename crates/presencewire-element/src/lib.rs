//! Data element layer for presence advertisements.
//!
//! Every field of an advertisement section is a data element: a variable-length
//! header carrying `(type, length)` followed by `length` value bytes. This crate
//! owns that encoding:
//! - [`header`]: the tag-length-type header codec (single and multi-byte forms)
//! - [`element`]: the [`DataElement`] value type
//! - [`encryption_info`]: the fixed 17-byte encryption-info element
//! - [`cursor`]: bounds-checked reads over untrusted bytes
//!
//! Nothing here touches key material. Authentication and encryption live in the
//! advertisement layer above.

pub mod cursor;
pub mod data_type;
pub mod element;
pub mod encryption_info;
pub mod error;
pub mod header;
pub mod version;

pub use cursor::{ByteCursor, ElementReader, RawElement};
pub use data_type::{
    is_identity, is_salt_or_identity, type_name, ACCOUNT_KEY_DATA, ACTION, BATTERY,
    BLE_ADDRESS, BLE_SERVICE_DATA, CONNECTION_STATUS, EDDYSTONE_EPHEMERAL_IDENTIFIER,
    ENCRYPTION_INFO, MODEL_ID, PRIVATE_IDENTITY, PROVISIONED_IDENTITY, PUBLIC_IDENTITY, SALT,
    SCAN_MODE, TRUSTED_IDENTITY, TX_POWER,
};
pub use element::DataElement;
pub use encryption_info::{
    EncodingScheme, EncryptionInfo, ENCRYPTION_INFO_LENGTH, EXTENDED_SALT_LENGTH,
};
pub use error::{ElementError, Result};
pub use header::{decode_header, encode_header, DataElementHeader, MAX_DATA_LENGTH};
pub use version::{construct_header, header_version, PRESENCE_VERSION_V0, PRESENCE_VERSION_V1};
