use std::fmt;

use bytes::Bytes;
use presencewire_element::DataElement;
use zeroize::Zeroizing;

use crate::identity::{IdentityType, IDENTITY_LENGTH};

/// A single-section extended presence advertisement.
///
/// Produced either by [`AdvertisementBuilder::build`](crate::AdvertisementBuilder::build)
/// or by [`AdvertisementParser::parse`](crate::AdvertisementParser::parse); never
/// mutated afterwards. `to_bytes()` always returns the exact wire bytes: the
/// ones computed when building, or the ones that were parsed.
#[derive(Clone, PartialEq, Eq)]
pub struct Advertisement {
    version: u8,
    identity_type: IdentityType,
    identity: Zeroizing<[u8; IDENTITY_LENGTH]>,
    salt: Vec<u8>,
    actions: Vec<u8>,
    data_elements: Vec<DataElement>,
    bytes: Bytes,
}

impl Advertisement {
    pub(crate) fn from_parts(
        version: u8,
        identity_type: IdentityType,
        identity: [u8; IDENTITY_LENGTH],
        salt: Vec<u8>,
        actions: Vec<u8>,
        data_elements: Vec<DataElement>,
        bytes: Bytes,
    ) -> Self {
        Self {
            version,
            identity_type,
            identity: Zeroizing::new(identity),
            salt,
            actions,
            data_elements,
            bytes,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn identity_type(&self) -> IdentityType {
        self.identity_type
    }

    /// The 16-byte metadata encryption key.
    pub fn identity(&self) -> &[u8; IDENTITY_LENGTH] {
        &self.identity
    }

    /// The 2-byte salt or the 16-byte extended salt.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn actions(&self) -> &[u8] {
        &self.actions
    }

    /// Inner data elements in wire order, ACTION elements included.
    pub fn data_elements(&self) -> &[DataElement] {
        &self.data_elements
    }

    /// Inner data elements of one type, in wire order.
    pub fn data_elements_of(&self, data_type: u32) -> Vec<&DataElement> {
        self.data_elements
            .iter()
            .filter(|element| element.data_type == data_type)
            .collect()
    }

    /// Total length in bytes: header, section length, and section.
    pub fn length(&self) -> usize {
        self.bytes.len()
    }

    pub fn to_bytes(&self) -> Bytes {
        self.bytes.clone()
    }
}

impl fmt::Display for Advertisement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExtendedAdvertisement:<VERSION: {}, length: {}, dataElementCount: {}, \
             identityType: {}, identity: <redacted:{} bytes>, salt: {:?}, actions: {:?}>",
            self.version,
            self.length(),
            self.data_elements.len(),
            self.identity_type as u8,
            self.identity.len(),
            self.salt,
            self.actions,
        )
    }
}

impl fmt::Debug for Advertisement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Advertisement")
            .field("version", &self.version)
            .field("identity_type", &self.identity_type)
            .field(
                "identity",
                &format_args!("<redacted:{} bytes>", self.identity.len()),
            )
            .field("salt", &self.salt)
            .field("actions", &self.actions)
            .field("data_elements", &self.data_elements)
            .field("length", &self.length())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presencewire_element::{ACTION, BATTERY};

    fn sample() -> Advertisement {
        Advertisement::from_parts(
            1,
            IdentityType::Private,
            [0x42; IDENTITY_LENGTH],
            vec![1, 2],
            vec![6, 9],
            vec![
                DataElement::new(BATTERY, vec![80]),
                DataElement::new(ACTION, vec![6]),
                DataElement::new(ACTION, vec![9]),
            ],
            Bytes::from_static(&[0x20, 3, 0, 0, 0]),
        )
    }

    #[test]
    fn filters_elements_by_type() {
        let adv = sample();
        assert_eq!(adv.data_elements_of(ACTION).len(), 2);
        assert_eq!(adv.data_elements_of(BATTERY)[0].value.as_ref(), &[80]);
        assert!(adv.data_elements_of(7).is_empty());
        assert_eq!(adv.length(), 5);
    }

    #[test]
    fn display_matches_summary_format() {
        assert_eq!(
            sample().to_string(),
            "ExtendedAdvertisement:<VERSION: 1, length: 5, dataElementCount: 3, \
             identityType: 1, identity: <redacted:16 bytes>, salt: [1, 2], actions: [6, 9]>"
        );
    }

    #[test]
    fn debug_hides_identity() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("<redacted:16 bytes>"));
        assert!(!rendered.contains("66, 66"));
    }
}
