use bytes::Bytes;
use presencewire_crypto::Cryptor;
use presencewire_element::{
    header_version, is_identity, is_salt_or_identity, ByteCursor, DataElement, ElementReader,
    EncodingScheme, EncryptionInfo, RawElement, ACTION, ENCRYPTION_INFO, PRESENCE_VERSION_V1,
    SALT,
};
use zeroize::Zeroizing;

use crate::advertisement::Advertisement;
use crate::config::ParserConfig;
use crate::credential::Credential;
use crate::error::{AdvertisementError, AuthCheck, Result};
use crate::identity::{IdentityType, IDENTITY_LENGTH};
use crate::section::{mic_input, CIPHER_START_INDEX, SALT_LENGTH};

/// Validates, authenticates and decrypts received advertisements.
///
/// Parsing is a pure function of the input bytes and credential. Any failed
/// check rejects the whole advertisement; nothing partially decoded escapes.
#[derive(Debug, Clone)]
pub struct AdvertisementParser<C> {
    cryptor: C,
    config: ParserConfig,
}

impl<C: Cryptor> AdvertisementParser<C> {
    pub fn new(cryptor: C) -> Self {
        Self::with_config(cryptor, ParserConfig::default())
    }

    pub fn with_config(cryptor: C, config: ParserConfig) -> Self {
        Self { cryptor, config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one advertisement with `credential`.
    pub fn parse(&self, bytes: &[u8], credential: &Credential) -> Result<Advertisement> {
        let mut cursor = ByteCursor::new(bytes);

        let header = cursor.read_u8()?;
        let version = header_version(header);
        if version != PRESENCE_VERSION_V1 {
            tracing::debug!(version, "rejecting advertisement version");
            return Err(AdvertisementError::UnsupportedVersion(version));
        }

        let section_byte = cursor.read_u8()?;
        self.check_section_length(usize::from(section_byte), cursor.remaining())?;

        let mic = cursor.take_tail(self.cryptor.signature_len())?;

        let leading = cursor.read_element()?;
        let (salt, nonce) = self.leading_salt(&leading)?;

        let (identity_header, identity_header_bytes) = cursor.read_header()?;
        let identity_data_type = identity_header.data_type();
        if !is_identity(identity_data_type) {
            tracing::debug!(
                data_type = identity_data_type,
                "second element is not an identity"
            );
            return Err(AdvertisementError::UnexpectedElement {
                data_type: identity_data_type,
            });
        }
        if identity_header.length() != IDENTITY_LENGTH {
            tracing::debug!(length = identity_header.length(), "bad identity length");
            return Err(AdvertisementError::InvalidIdentityLength {
                length: identity_header.length(),
            });
        }
        let identity_type = IdentityType::from_data_type(identity_data_type);
        if !identity_type.is_encrypted() {
            tracing::debug!(%identity_type, "only encrypted identities are supported");
            return Err(AdvertisementError::UnsupportedIdentityType(identity_type));
        }

        let ciphertext = cursor.read_rest();
        let key_seed = credential.authenticity_key();
        let plaintext = self
            .cryptor
            .decrypt(ciphertext, &nonce, key_seed)
            .map(Zeroizing::new)
            .map_err(|err| {
                tracing::debug!(error = %err, "section decryption failed");
                AdvertisementError::DecryptionFailure
            })?;
        if plaintext.len() < IDENTITY_LENGTH {
            tracing::debug!(length = plaintext.len(), "plaintext shorter than identity");
            return Err(AdvertisementError::InvalidIdentityLength {
                length: plaintext.len(),
            });
        }
        let (metadata_key, inner) = plaintext.split_at(IDENTITY_LENGTH);

        if !self.cryptor.verify_metadata_key_tag(
            metadata_key,
            key_seed,
            credential.metadata_key_tag(),
        ) {
            tracing::debug!("metadata key tag does not match credential");
            return Err(AdvertisementError::AuthenticationMismatch(
                AuthCheck::MetadataKeyTag,
            ));
        }

        let leading_bytes = [leading.header_bytes, leading.value].concat();
        let input = mic_input(
            header,
            section_byte,
            &leading_bytes,
            &nonce,
            identity_header_bytes,
            ciphertext,
        );
        if !self.cryptor.verify(&input, key_seed, mic) {
            tracing::debug!("mic does not match section");
            return Err(AdvertisementError::AuthenticationMismatch(AuthCheck::Mic));
        }

        let (data_elements, actions) = self.inner_elements(inner)?;

        let mut identity = [0u8; IDENTITY_LENGTH];
        identity.copy_from_slice(metadata_key);

        tracing::trace!(
            length = bytes.len(),
            elements = data_elements.len(),
            "parsed advertisement"
        );

        Ok(Advertisement::from_parts(
            version,
            identity_type,
            identity,
            salt,
            actions,
            data_elements,
            Bytes::copy_from_slice(bytes),
        ))
    }

    fn check_section_length(&self, declared: usize, actual: usize) -> Result<()> {
        if declared == actual {
            return Ok(());
        }
        if self.config.enforce_section_length {
            tracing::debug!(declared, actual, "section length mismatch");
            return Err(AdvertisementError::SectionLengthMismatch { declared, actual });
        }
        tracing::trace!(declared, actual, "ignoring section length mismatch");
        Ok(())
    }

    /// Salt and nonce implied by the leading element.
    fn leading_salt(&self, leading: &RawElement<'_>) -> Result<(Vec<u8>, Vec<u8>)> {
        let (salt, nonce) = match leading.data_type() {
            SALT => {
                if leading.value.len() != SALT_LENGTH {
                    tracing::debug!(length = leading.value.len(), "salt must be 2 bytes");
                    return Err(AdvertisementError::InvalidSaltLength {
                        length: leading.value.len(),
                    });
                }
                (leading.value.to_vec(), self.cryptor.nonce_from_salt(leading.value))
            }
            ENCRYPTION_INFO => {
                let info = EncryptionInfo::decode(leading.value)?;
                if info.scheme() != EncodingScheme::Mic {
                    tracing::debug!(scheme = ?info.scheme(), "only the mic scheme is supported");
                    return Err(AdvertisementError::InvalidEncryptionScheme(
                        info.scheme() as u8,
                    ));
                }
                (
                    info.salt().to_vec(),
                    self.cryptor
                        .nonce_from_salt_at(info.salt(), CIPHER_START_INDEX),
                )
            }
            data_type => {
                tracing::debug!(data_type, "first element must be salt or encryption info");
                return Err(AdvertisementError::UnexpectedElement { data_type });
            }
        };
        let nonce = nonce.map_err(|err| {
            tracing::debug!(error = %err, "nonce derivation failed");
            AdvertisementError::NonceDerivation
        })?;
        Ok((salt, nonce))
    }

    /// Decode the decrypted elements that follow the identity.
    fn inner_elements(&self, inner: &[u8]) -> Result<(Vec<DataElement>, Vec<u8>)> {
        let mut elements = Vec::new();
        let mut actions = Vec::new();
        for raw in ElementReader::new(inner) {
            let raw = raw?;
            let data_type = raw.data_type();
            if is_salt_or_identity(data_type) {
                tracing::debug!(data_type, "structural element repeated in ciphertext");
                return Err(AdvertisementError::StructuralDuplicate { data_type });
            }
            if data_type == ACTION {
                if raw.value.len() != 1 {
                    tracing::debug!(length = raw.value.len(), "action must be one byte");
                    return Err(AdvertisementError::InvalidActionLength {
                        length: raw.value.len(),
                    });
                }
                actions.push(raw.value[0]);
            }
            if elements.len() == self.config.max_inner_elements {
                tracing::debug!(
                    max = self.config.max_inner_elements,
                    "too many inner elements"
                );
                return Err(AdvertisementError::SectionTooLarge {
                    size: elements.len() + 1,
                    max: self.config.max_inner_elements,
                });
            }
            elements.push(DataElement::new(data_type, raw.value.to_vec()));
        }
        Ok((elements, actions))
    }
}
