//! Advertisement header byte: `version (3 bits, MSB) | reserved (5 bits)`.

/// Legacy version. Not supported by the extended codec.
pub const PRESENCE_VERSION_V0: u8 = 0;

/// The extended advertisement version handled by this workspace.
pub const PRESENCE_VERSION_V1: u8 = 1;

const VERSION_OFFSET: u32 = 5;
const VERSION_BITMASK: u8 = 0b1110_0000;

/// Build the advertisement header byte for `version`. Reserved bits are zero.
pub fn construct_header(version: u8) -> u8 {
    (version << VERSION_OFFSET) & VERSION_BITMASK
}

/// Extract the version from an advertisement header byte.
pub fn header_version(header: u8) -> u8 {
    (header & VERSION_BITMASK) >> VERSION_OFFSET
}
