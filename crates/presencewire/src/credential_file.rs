use std::fs;
use std::path::Path;

use presencewire::{Credential, IdentityType};
use serde::{Deserialize, Serialize};

use crate::exit::{io_error, CliError, CliResult, DATA_INVALID, INTERNAL};

/// On-disk credential: JSON with hex-encoded key fields.
#[derive(Serialize, Deserialize)]
pub struct CredentialFile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_id: String,
    pub authenticity_key: String,
    pub metadata_key_tag: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub encrypted_metadata: String,
    #[serde(default = "default_identity_type")]
    pub identity_type: String,
}

fn default_identity_type() -> String {
    IdentityType::Private.as_str().to_string()
}

impl CredentialFile {
    pub fn new(
        authenticity_key: &[u8],
        metadata_key_tag: &[u8],
        identity_type: IdentityType,
    ) -> Self {
        Self {
            secret_id: String::new(),
            authenticity_key: hex::encode(authenticity_key),
            metadata_key_tag: hex::encode(metadata_key_tag),
            encrypted_metadata: String::new(),
            identity_type: identity_type.as_str().to_string(),
        }
    }

    pub fn load(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        serde_json::from_str(&text).map_err(|err| {
            CliError::new(
                DATA_INVALID,
                format!("{} is not a valid credential: {err}", path.display()),
            )
        })
    }

    pub fn store(&self, path: &Path) -> CliResult<()> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|err| CliError::new(INTERNAL, format!("credential encoding failed: {err}")))?;
        fs::write(path, text)
            .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))
    }

    pub fn to_credential(&self) -> CliResult<Credential> {
        let identity_type = self.identity_type.parse::<IdentityType>().map_err(|err| {
            CliError::new(DATA_INVALID, format!("credential identity_type: {err}"))
        })?;
        Ok(Credential::new(
            field("authenticity_key", &self.authenticity_key)?,
            field("metadata_key_tag", &self.metadata_key_tag)?,
        )
        .with_secret_id(field("secret_id", &self.secret_id)?)
        .with_encrypted_metadata(field("encrypted_metadata", &self.encrypted_metadata)?)
        .with_identity_type(identity_type))
    }
}

fn field(name: &str, value: &str) -> CliResult<Vec<u8>> {
    hex::decode(value).map_err(|err| {
        CliError::new(
            DATA_INVALID,
            format!("credential {name} is not valid hex: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_defaults_to_private() {
        let file: CredentialFile = serde_json::from_str(
            r#"{"authenticity_key":"0707","metadata_key_tag":"aabb"}"#,
        )
        .expect("minimal credential should deserialize");
        let credential = file.to_credential().expect("credential should decode");
        assert_eq!(credential.authenticity_key(), &[7, 7]);
        assert_eq!(credential.metadata_key_tag(), &[0xAA, 0xBB]);
        assert_eq!(credential.identity_type(), IdentityType::Private);
        assert!(credential.secret_id().is_empty());
    }

    #[test]
    fn bad_hex_field_is_data_invalid() {
        let file = CredentialFile {
            secret_id: String::new(),
            authenticity_key: "zz".to_string(),
            metadata_key_tag: "aa".to_string(),
            encrypted_metadata: String::new(),
            identity_type: "trusted".to_string(),
        };
        let err = file.to_credential().err().expect("bad hex should fail");
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("authenticity_key"));
    }

    #[test]
    fn serialized_file_skips_empty_fields() {
        let file = CredentialFile::new(&[1, 2], &[3], IdentityType::Trusted);
        let json = serde_json::to_string(&file).expect("credential should serialize");
        assert_eq!(
            json,
            r#"{"authenticity_key":"0102","metadata_key_tag":"03","identity_type":"trusted"}"#
        );
    }
}
