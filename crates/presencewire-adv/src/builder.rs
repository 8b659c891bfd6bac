use bytes::{BufMut, Bytes, BytesMut};
use presencewire_crypto::Cryptor;
use presencewire_element::{
    construct_header, is_salt_or_identity, DataElement, DataElementHeader, EncodingScheme,
    EncryptionInfo, ACTION, ENCRYPTION_INFO, EXTENDED_SALT_LENGTH, PRESENCE_VERSION_V1, SALT,
};
use zeroize::Zeroizing;

use crate::advertisement::Advertisement;
use crate::error::{AdvertisementError, Result};
use crate::identity::IDENTITY_LENGTH;
use crate::request::BroadcastRequest;
use crate::section::{
    mic_input, CIPHER_START_INDEX, HEADER_LENGTH, MAX_SECTION_LENGTH, SALT_LENGTH,
};

/// Turns broadcast requests into signed, encrypted advertisements.
#[derive(Debug, Clone)]
pub struct AdvertisementBuilder<C> {
    cryptor: C,
}

impl<C: Cryptor> AdvertisementBuilder<C> {
    pub fn new(cryptor: C) -> Self {
        Self { cryptor }
    }

    pub fn cryptor(&self) -> &C {
        &self.cryptor
    }

    /// Build an advertisement. Deterministic for a given request and cryptor.
    pub fn build(&self, request: &BroadcastRequest) -> Result<Advertisement> {
        if request.version != PRESENCE_VERSION_V1 {
            return Err(AdvertisementError::UnsupportedVersion(request.version));
        }
        let identity: [u8; IDENTITY_LENGTH] =
            request.identity.as_slice().try_into().map_err(|_| {
                AdvertisementError::InvalidIdentityLength {
                    length: request.identity.len(),
                }
            })?;
        let identity = Zeroizing::new(identity);
        if !request.identity_type.is_encrypted() {
            return Err(AdvertisementError::UnsupportedIdentityType(
                request.identity_type,
            ));
        }

        let (leading_element, nonce) = self.leading_element(&request.salt)?;
        let leading_bytes = leading_element.to_bytes()?;

        let identity_header = DataElementHeader::new(
            PRESENCE_VERSION_V1,
            request.identity_type.data_type(),
            IDENTITY_LENGTH,
        )?
        .to_bytes();

        let data_elements = inner_elements(request)?;
        let inner_len = data_elements
            .iter()
            .map(DataElement::wire_size)
            .sum::<presencewire_element::Result<usize>>()?;
        let mut plaintext = Zeroizing::new(Vec::with_capacity(identity.len() + inner_len));
        plaintext.extend_from_slice(identity.as_slice());
        for element in &data_elements {
            plaintext.extend_from_slice(&element.to_bytes()?);
        }

        let ciphertext = self
            .cryptor
            .encrypt(&plaintext, &nonce, &request.key_seed)
            .map_err(|err| {
                tracing::debug!(error = %err, "section encryption failed");
                AdvertisementError::EncryptionFailure
            })?;

        let signature_len = self.cryptor.signature_len();
        let section_length =
            leading_bytes.len() + identity_header.len() + ciphertext.len() + signature_len;
        if section_length > MAX_SECTION_LENGTH {
            tracing::debug!(section_length, "section exceeds one-byte length");
            return Err(AdvertisementError::SectionTooLarge {
                size: section_length,
                max: MAX_SECTION_LENGTH,
            });
        }

        let header = construct_header(request.version);
        let section_byte = section_length as u8;
        let input = mic_input(
            header,
            section_byte,
            &leading_bytes,
            &nonce,
            &identity_header,
            &ciphertext,
        );
        let mic = self
            .cryptor
            .sign(&input, &request.key_seed)
            .map_err(|err| {
                tracing::debug!(error = %err, "section signing failed");
                AdvertisementError::SigningFailure
            })?;
        if mic.len() != signature_len {
            tracing::debug!(
                got = mic.len(),
                expected = signature_len,
                "cryptor returned a tag of the wrong length"
            );
            return Err(AdvertisementError::SigningFailure);
        }

        let mut out = BytesMut::with_capacity(2 * HEADER_LENGTH + section_length);
        out.put_u8(header);
        out.put_u8(section_byte);
        out.put_slice(&leading_bytes);
        out.put_slice(&identity_header);
        out.put_slice(&ciphertext);
        out.put_slice(&mic);
        let bytes: Bytes = out.freeze();

        tracing::trace!(
            length = bytes.len(),
            elements = data_elements.len(),
            "built advertisement"
        );

        Ok(Advertisement::from_parts(
            request.version,
            request.identity_type,
            *identity,
            request.salt.clone(),
            request.actions.clone(),
            data_elements,
            bytes,
        ))
    }

    /// Leading salt or encryption-info element plus the nonce it implies.
    fn leading_element(&self, salt: &[u8]) -> Result<(DataElement, Vec<u8>)> {
        let (element, nonce) = match salt.len() {
            SALT_LENGTH => (
                DataElement::new(SALT, salt.to_vec()),
                self.cryptor.nonce_from_salt(salt),
            ),
            EXTENDED_SALT_LENGTH => {
                let info = EncryptionInfo::new(EncodingScheme::Mic, salt)?;
                (
                    DataElement::new(ENCRYPTION_INFO, info.to_bytes().to_vec()),
                    self.cryptor.nonce_from_salt_at(salt, CIPHER_START_INDEX),
                )
            }
            length => return Err(AdvertisementError::InvalidSaltLength { length }),
        };
        let nonce = nonce.map_err(|err| {
            tracing::debug!(error = %err, "nonce derivation failed");
            AdvertisementError::NonceDerivation
        })?;
        Ok((element, nonce))
    }
}

/// Extended properties followed by one ACTION element per action.
fn inner_elements(request: &BroadcastRequest) -> Result<Vec<DataElement>> {
    if let Some(element) = request
        .extended_properties
        .iter()
        .find(|element| is_salt_or_identity(element.data_type))
    {
        return Err(AdvertisementError::StructuralDuplicate {
            data_type: element.data_type,
        });
    }
    if let Some(element) = request
        .extended_properties
        .iter()
        .find(|element| element.data_type == ACTION && element.value.len() != 1)
    {
        return Err(AdvertisementError::InvalidActionLength {
            length: element.value.len(),
        });
    }
    let mut elements = request.extended_properties.clone();
    elements.extend(
        request
            .actions
            .iter()
            .map(|&action| DataElement::new(ACTION, vec![action])),
    );
    Ok(elements)
}
