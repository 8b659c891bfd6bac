use presencewire::element::DataElement;
use presencewire::{AdvertisementBuilder, BroadcastRequest, Cryptor, IdentityType, MicCryptor};

use crate::cmd::{decode_hex, BuildArgs};
use crate::credential_file::CredentialFile;
use crate::exit::{advertisement_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};
use crate::output::{print_advertisement, AdvertisementOutput, OutputFormat};

const SCHEMA_ID: &str =
    "https://schemas.3leaps.dev/presencewire/cli/v1/advertisement-built.schema.json";

pub fn run(args: BuildArgs, format: OutputFormat) -> CliResult<i32> {
    let salt = decode_hex("--salt", &args.salt)?;
    let identity = decode_hex("--identity", &args.identity)?;
    let key_seed = decode_hex("--key-seed", &args.key_seed)?;
    let identity_type = IdentityType::from(args.identity_type);

    let mut request = BroadcastRequest::new(salt, identity.clone(), key_seed.clone())
        .with_identity_type(identity_type)
        .with_actions(args.actions.iter().copied());
    for arg in &args.elements {
        request = request.with_element(parse_element(arg)?);
    }

    let cryptor = MicCryptor::new();
    let adv = AdvertisementBuilder::new(cryptor)
        .build(&request)
        .map_err(|err| advertisement_error("build failed", err))?;
    tracing::debug!(length = adv.length(), "built advertisement");

    if let Some(path) = &args.credential_out {
        let tag = cryptor
            .metadata_key_tag(&identity, &key_seed)
            .map_err(|err| CliError::new(INTERNAL, format!("metadata key tag failed: {err}")))?;
        CredentialFile::new(&key_seed, &tag, identity_type).store(path)?;
        tracing::info!(path = %path.display(), "wrote receiver credential");
    }

    print_advertisement(&AdvertisementOutput::new(SCHEMA_ID, &adv), format);
    Ok(SUCCESS)
}

/// Parse a `TYPE:HEX` element argument.
fn parse_element(arg: &str) -> CliResult<DataElement> {
    let (data_type, value) = arg.split_once(':').ok_or_else(|| {
        CliError::new(USAGE, format!("--element must be TYPE:HEX, got '{arg}'"))
    })?;
    let data_type = data_type.trim().parse::<u32>().map_err(|err| {
        CliError::new(USAGE, format!("--element type '{data_type}' is invalid: {err}"))
    })?;
    Ok(DataElement::new(data_type, decode_hex("--element value", value)?))
}
