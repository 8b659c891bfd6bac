use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::identity::IdentityType;

/// Shared credential a receiver uses to authenticate and decrypt
/// advertisements. Key material is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    secret_id: Vec<u8>,
    authenticity_key: Vec<u8>,
    metadata_key_tag: Vec<u8>,
    encrypted_metadata: Vec<u8>,
    #[zeroize(skip)]
    identity_type: IdentityType,
}

impl Credential {
    /// Create a credential from the two fields the parser needs.
    pub fn new(
        authenticity_key: impl Into<Vec<u8>>,
        metadata_key_tag: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            secret_id: Vec::new(),
            authenticity_key: authenticity_key.into(),
            metadata_key_tag: metadata_key_tag.into(),
            encrypted_metadata: Vec::new(),
            identity_type: IdentityType::Private,
        }
    }

    pub fn with_secret_id(mut self, secret_id: impl Into<Vec<u8>>) -> Self {
        self.secret_id = secret_id.into();
        self
    }

    pub fn with_encrypted_metadata(mut self, encrypted_metadata: impl Into<Vec<u8>>) -> Self {
        self.encrypted_metadata = encrypted_metadata.into();
        self
    }

    pub fn with_identity_type(mut self, identity_type: IdentityType) -> Self {
        self.identity_type = identity_type;
        self
    }

    /// Key seed for the section's key schedule.
    pub fn authenticity_key(&self) -> &[u8] {
        &self.authenticity_key
    }

    /// Keyed hash of the metadata key this credential accepts.
    pub fn metadata_key_tag(&self) -> &[u8] {
        &self.metadata_key_tag
    }

    pub fn secret_id(&self) -> &[u8] {
        &self.secret_id
    }

    pub fn encrypted_metadata(&self) -> &[u8] {
        &self.encrypted_metadata
    }

    pub fn identity_type(&self) -> IdentityType {
        self.identity_type
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("secret_id_len", &self.secret_id.len())
            .field(
                "authenticity_key",
                &format_args!("<redacted:{} bytes>", self.authenticity_key.len()),
            )
            .field(
                "metadata_key_tag",
                &format_args!("<redacted:{} bytes>", self.metadata_key_tag.len()),
            )
            .field("encrypted_metadata_len", &self.encrypted_metadata.len())
            .field("identity_type", &self.identity_type)
            .finish()
    }
}
