use std::fmt;

use presencewire_element::{DataElement, PRESENCE_VERSION_V1};
use zeroize::Zeroizing;

use crate::identity::IdentityType;

/// Everything the builder needs to produce one advertisement.
#[derive(Clone)]
pub struct BroadcastRequest {
    pub(crate) version: u8,
    pub(crate) salt: Vec<u8>,
    pub(crate) identity: Zeroizing<Vec<u8>>,
    pub(crate) key_seed: Zeroizing<Vec<u8>>,
    pub(crate) identity_type: IdentityType,
    pub(crate) actions: Vec<u8>,
    pub(crate) extended_properties: Vec<DataElement>,
}

impl BroadcastRequest {
    /// A V1 request for a private identity with no actions.
    ///
    /// `salt` must be 2 bytes (plain salt) or 16 bytes (encryption info);
    /// `identity` must be 16 bytes. Both are checked when building.
    pub fn new(
        salt: impl Into<Vec<u8>>,
        identity: impl Into<Vec<u8>>,
        key_seed: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            version: PRESENCE_VERSION_V1,
            salt: salt.into(),
            identity: Zeroizing::new(identity.into()),
            key_seed: Zeroizing::new(key_seed.into()),
            identity_type: IdentityType::Private,
            actions: Vec::new(),
            extended_properties: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn with_identity_type(mut self, identity_type: IdentityType) -> Self {
        self.identity_type = identity_type;
        self
    }

    pub fn with_action(mut self, action: u8) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = u8>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Append an extra data element, encrypted ahead of the actions.
    pub fn with_element(mut self, element: DataElement) -> Self {
        self.extended_properties.push(element);
        self
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn identity_type(&self) -> IdentityType {
        self.identity_type
    }

    pub fn actions(&self) -> &[u8] {
        &self.actions
    }

    pub fn extended_properties(&self) -> &[DataElement] {
        &self.extended_properties
    }
}

impl fmt::Debug for BroadcastRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastRequest")
            .field("version", &self.version)
            .field("salt", &self.salt)
            .field(
                "identity",
                &format_args!("<redacted:{} bytes>", self.identity.len()),
            )
            .field(
                "key_seed",
                &format_args!("<redacted:{} bytes>", self.key_seed.len()),
            )
            .field("identity_type", &self.identity_type)
            .field("actions", &self.actions)
            .field("extended_properties", &self.extended_properties.len())
            .finish()
    }
}
