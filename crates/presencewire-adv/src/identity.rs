use std::fmt;
use std::str::FromStr;

use presencewire_element::{
    PRIVATE_IDENTITY, PROVISIONED_IDENTITY, PUBLIC_IDENTITY, TRUSTED_IDENTITY,
};

/// Length of the identity (metadata encryption key) carried in a section.
pub const IDENTITY_LENGTH: usize = 16;

/// Kind of identity a credential or advertisement carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum IdentityType {
    #[default]
    Unknown = 0,
    Private = 1,
    Provisioned = 2,
    Trusted = 3,
}

impl IdentityType {
    /// The identity data element type this identity is advertised under.
    pub fn data_type(self) -> u32 {
        match self {
            Self::Unknown => PUBLIC_IDENTITY,
            Self::Private => PRIVATE_IDENTITY,
            Self::Provisioned => PROVISIONED_IDENTITY,
            Self::Trusted => TRUSTED_IDENTITY,
        }
    }

    /// Map an identity data element type back to its identity kind. Public
    /// and non-identity types map to `Unknown`.
    pub fn from_data_type(data_type: u32) -> Self {
        match data_type {
            PRIVATE_IDENTITY => Self::Private,
            PROVISIONED_IDENTITY => Self::Provisioned,
            TRUSTED_IDENTITY => Self::Trusted,
            _ => Self::Unknown,
        }
    }

    /// True for identity kinds carried in encrypted advertisements.
    pub fn is_encrypted(self) -> bool {
        matches!(self, Self::Private | Self::Trusted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Private => "private",
            Self::Provisioned => "provisioned",
            Self::Trusted => "trusted",
        }
    }
}

impl fmt::Display for IdentityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for IdentityType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Private),
            2 => Ok(Self::Provisioned),
            3 => Ok(Self::Trusted),
            other => Err(other),
        }
    }
}

impl FromStr for IdentityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unknown" | "public" => Ok(Self::Unknown),
            "private" => Ok(Self::Private),
            "provisioned" => Ok(Self::Provisioned),
            "trusted" => Ok(Self::Trusted),
            other => Err(format!("unknown identity type '{other}'")),
        }
    }
}
