//! Build an advertisement with the MIC cryptor, parse it back with a matching
//! credential, then show that a tampered copy is rejected.
//!
//! Run with:
//!   cargo run --example broadcast-roundtrip
//!
//! The same flow from the CLI:
//!   cargo run --features cli -- --format raw build --salt 0102 \
//!     --identity 42424242424242424242424242424242 \
//!     --key-seed 07070707070707070707070707070707 --credential-out /tmp/cred.json
//!   cargo run --features cli -- parse <HEX> --credential /tmp/cred.json

use presencewire::element::{DataElement, BATTERY};
use presencewire::{
    AdvertisementBuilder, AdvertisementParser, BroadcastRequest, Credential, Cryptor,
    IdentityType, MicCryptor,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let key_seed = [0x07u8; 16];
    let identity = [0x42u8; 16];
    let cryptor = MicCryptor::new();

    let request = BroadcastRequest::new(vec![0x01, 0x02], identity.to_vec(), key_seed.to_vec())
        .with_identity_type(IdentityType::Trusted)
        .with_element(DataElement::new(BATTERY, vec![87]))
        .with_actions([6, 9]);
    let adv = AdvertisementBuilder::new(cryptor).build(&request)?;
    let bytes = adv.to_bytes();
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    eprintln!("Built {} bytes: {hex}", bytes.len());

    // The receiver only holds the key seed and the metadata key tag.
    let tag = cryptor.metadata_key_tag(&identity, &key_seed)?;
    let credential = Credential::new(key_seed.to_vec(), tag)
        .with_identity_type(IdentityType::Trusted);
    let parser = AdvertisementParser::new(cryptor);

    let parsed = parser.parse(&bytes, &credential)?;
    eprintln!("Parsed: {parsed}");

    let mut tampered = bytes.to_vec();
    if let Some(last) = tampered.last_mut() {
        *last ^= 0x01;
    }
    match parser.parse(&tampered, &credential) {
        Ok(_) => eprintln!("Tampered copy was accepted"),
        Err(e) => eprintln!("Tampered copy rejected: {e}"),
    }

    Ok(())
}
