//! Section framing constants and the canonical MIC input.
//!
//! ```text
//! ┌────────┬─────────┬──────────────────┬─────────────┬────────────┬─────┐
//! │ header │ sec len │ salt / enc. info │ identity hdr│ ciphertext │ MIC │
//! │ 1B     │ 1B      │ DE               │ 1-2B        │ variable   │ N B │
//! └────────┴─────────┴──────────────────┴─────────────┴────────────┴─────┘
//! ```

/// Presence service UUID (0xFCF1), prefixed to every MIC input.
pub const PRESENCE_UUID: [u8; 2] = [0xFC, 0xF1];

/// Size of the advertisement header byte and of the section-length byte.
pub const HEADER_LENGTH: usize = 1;

/// Largest section the one-byte section length can describe.
pub const MAX_SECTION_LENGTH: usize = 255;

/// Length of the short salt carried in a SALT element.
pub const SALT_LENGTH: usize = 2;

/// Data element index of the first encrypted element; the extended salt's
/// nonce is derived for this position.
pub const CIPHER_START_INDEX: usize = 2;

/// Assemble the bytes the MIC is computed over.
///
/// Both sides must feed exactly the bytes that appear on the wire, plus the
/// derived nonce, which never does.
pub(crate) fn mic_input(
    header: u8,
    section_length: u8,
    leading_element: &[u8],
    nonce: &[u8],
    identity_header: &[u8],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut input = Vec::with_capacity(
        PRESENCE_UUID.len()
            + 2 * HEADER_LENGTH
            + leading_element.len()
            + nonce.len()
            + identity_header.len()
            + ciphertext.len(),
    );
    input.extend_from_slice(&PRESENCE_UUID);
    input.push(header);
    input.push(section_length);
    input.extend_from_slice(leading_element);
    input.extend_from_slice(nonce);
    input.extend_from_slice(identity_header);
    input.extend_from_slice(ciphertext);
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mic_input_concatenates_in_wire_order() {
        let input = mic_input(0x20, 40, &[0x20, 1, 2], &[9; 4], &[0x90, 0x01], &[5, 6]);
        assert_eq!(
            input,
            vec![0xFC, 0xF1, 0x20, 40, 0x20, 1, 2, 9, 9, 9, 9, 0x90, 0x01, 5, 6]
        );
    }
}
