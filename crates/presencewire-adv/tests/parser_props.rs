mod common;

use common::{stub_credential, StubCryptor, KEY_SEED};
use presencewire_adv::{
    AdvertisementBuilder, AdvertisementParser, BroadcastRequest, Credential, ParserConfig,
};
use presencewire_crypto::{Cryptor, MicCryptor};
use presencewire_element::{DataElement, ACTION, BATTERY};
use proptest::prelude::*;

fn mic_credential(identity: &[u8]) -> Credential {
    let tag = MicCryptor::new()
        .metadata_key_tag(identity, &KEY_SEED)
        .unwrap();
    Credential::new(KEY_SEED.to_vec(), tag)
}

fn salt_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 2),
        proptest::collection::vec(any::<u8>(), 16),
    ]
}

proptest! {
    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..300)) {
        let strict = AdvertisementParser::new(StubCryptor);
        let advisory = AdvertisementParser::with_config(StubCryptor, ParserConfig::advisory());
        let _ = strict.parse(&bytes, &stub_credential());
        let _ = advisory.parse(&bytes, &stub_credential());
        let mic = AdvertisementParser::new(MicCryptor::new());
        let _ = mic.parse(&bytes, &mic_credential(&[0; 16]));
    }

    #[test]
    fn v1_prefixed_garbage_never_panics(tail in proptest::collection::vec(any::<u8>(), 0..260)) {
        let mut bytes = vec![0x20, tail.len() as u8];
        bytes.extend_from_slice(&tail);
        let advisory = AdvertisementParser::with_config(StubCryptor, ParserConfig::advisory());
        let _ = advisory.parse(&bytes, &stub_credential());
    }

    #[test]
    fn built_advertisements_round_trip(
        salt in salt_strategy(),
        identity in any::<[u8; 16]>(),
        // worst case fills the 202 bytes an extended-salt section leaves
        actions in proptest::collection::vec(any::<u8>(), 0..=67),
        battery in proptest::option::of(any::<u8>()),
        extras in proptest::collection::vec(
            (
                prop_oneof![7u32..16, 17u32..100_000],
                proptest::collection::vec(any::<u8>(), 0..30),
            ),
            0..=2,
        ),
    ) {
        let mut request =
            BroadcastRequest::new(salt.clone(), identity.to_vec(), KEY_SEED.to_vec())
                .with_actions(actions.clone());
        let mut expected = Vec::new();
        if let Some(level) = battery {
            expected.push(DataElement::new(BATTERY, vec![level]));
        }
        for (data_type, value) in extras {
            expected.push(DataElement::new(data_type, value));
        }
        for element in &expected {
            request = request.with_element(element.clone());
        }
        expected.extend(actions.iter().map(|&action| DataElement::new(ACTION, vec![action])));
        let built = AdvertisementBuilder::new(MicCryptor::new()).build(&request).unwrap();
        let parsed = AdvertisementParser::new(MicCryptor::new())
            .parse(&built.to_bytes(), &mic_credential(&identity))
            .unwrap();

        prop_assert_eq!(parsed.identity(), &identity);
        prop_assert_eq!(parsed.salt(), salt.as_slice());
        prop_assert_eq!(parsed.actions(), actions.as_slice());
        prop_assert_eq!(parsed.data_elements(), built.data_elements());
        prop_assert_eq!(parsed.data_elements(), expected.as_slice());
    }

    #[test]
    fn any_single_bit_flip_is_rejected(
        salt in salt_strategy(),
        actions in proptest::collection::vec(any::<u8>(), 0..4),
        bit in any::<prop::sample::Index>(),
    ) {
        let identity = [0x3Cu8; 16];
        let request = BroadcastRequest::new(salt, identity.to_vec(), KEY_SEED.to_vec())
            .with_actions(actions);
        let bytes = AdvertisementBuilder::new(MicCryptor::new())
            .build(&request)
            .unwrap()
            .to_bytes()
            .to_vec();

        let mut tampered = bytes.clone();
        let position = bit.index(tampered.len() * 8);
        tampered[position / 8] ^= 1 << (position % 8);

        let parser = AdvertisementParser::new(MicCryptor::new());
        prop_assert!(parser.parse(&tampered, &mic_credential(&identity)).is_err());
    }
}
