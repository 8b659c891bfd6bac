//! Well-known data element types.
//!
//! The type space is open-ended; these are the values the presence codec
//! itself interprets. Everything else is carried through untouched.

/// 2-byte salt. Only valid as the leading element of a section.
pub const SALT: u32 = 0;

/// Private identity (encrypted advertisement).
pub const PRIVATE_IDENTITY: u32 = 1;

/// Trusted identity (encrypted advertisement).
pub const TRUSTED_IDENTITY: u32 = 2;

/// Public identity.
pub const PUBLIC_IDENTITY: u32 = 3;

/// Provisioned identity.
pub const PROVISIONED_IDENTITY: u32 = 4;

pub const TX_POWER: u32 = 5;

/// One-byte action value.
pub const ACTION: u32 = 6;

pub const MODEL_ID: u32 = 7;
pub const EDDYSTONE_EPHEMERAL_IDENTIFIER: u32 = 8;
pub const ACCOUNT_KEY_DATA: u32 = 9;
pub const CONNECTION_STATUS: u32 = 10;
pub const BATTERY: u32 = 11;

/// Encryption scheme plus 16-byte salt. Only valid as the leading element.
pub const ENCRYPTION_INFO: u32 = 16;

pub const BLE_SERVICE_DATA: u32 = 100;
pub const BLE_ADDRESS: u32 = 101;
pub const SCAN_MODE: u32 = 102;

/// Returns a human-readable name for a data element type.
pub fn type_name(data_type: u32) -> &'static str {
    match data_type {
        SALT => "SALT",
        PRIVATE_IDENTITY => "PRIVATE_IDENTITY",
        TRUSTED_IDENTITY => "TRUSTED_IDENTITY",
        PUBLIC_IDENTITY => "PUBLIC_IDENTITY",
        PROVISIONED_IDENTITY => "PROVISIONED_IDENTITY",
        TX_POWER => "TX_POWER",
        ACTION => "ACTION",
        MODEL_ID => "MODEL_ID",
        EDDYSTONE_EPHEMERAL_IDENTIFIER => "EDDYSTONE_EPHEMERAL_IDENTIFIER",
        ACCOUNT_KEY_DATA => "ACCOUNT_KEY_DATA",
        CONNECTION_STATUS => "CONNECTION_STATUS",
        BATTERY => "BATTERY",
        ENCRYPTION_INFO => "ENCRYPTION_INFO",
        BLE_SERVICE_DATA => "BLE_SERVICE_DATA",
        BLE_ADDRESS => "BLE_ADDRESS",
        SCAN_MODE => "SCAN_MODE",
        _ => "UNKNOWN",
    }
}

/// Returns true if the type is one of the identity element types.
pub fn is_identity(data_type: u32) -> bool {
    matches!(
        data_type,
        PRIVATE_IDENTITY | TRUSTED_IDENTITY | PUBLIC_IDENTITY | PROVISIONED_IDENTITY
    )
}

/// Returns true for types that may appear at most once per section, in the
/// leading positions: salt, encryption info, and identities.
pub fn is_salt_or_identity(data_type: u32) -> bool {
    data_type == SALT || data_type == ENCRYPTION_INFO || is_identity(data_type)
}
