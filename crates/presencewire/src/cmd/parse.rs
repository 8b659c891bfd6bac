use presencewire::{AdvertisementParser, MicCryptor, ParserConfig};

use crate::cmd::{decode_hex, ParseArgs};
use crate::credential_file::CredentialFile;
use crate::exit::{advertisement_error, CliResult, SUCCESS};
use crate::output::{print_advertisement, AdvertisementOutput, OutputFormat};

const SCHEMA_ID: &str =
    "https://schemas.3leaps.dev/presencewire/cli/v1/advertisement-parsed.schema.json";

pub fn run(args: ParseArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = decode_hex("advertisement", &args.hex)?;
    let credential = CredentialFile::load(&args.credential)?.to_credential()?;

    let parser = AdvertisementParser::with_config(MicCryptor::new(), parser_config(&args));
    let adv = parser
        .parse(&bytes, &credential)
        .map_err(|err| advertisement_error("parse failed", err))?;
    tracing::debug!(
        length = adv.length(),
        elements = adv.data_elements().len(),
        "advertisement accepted"
    );

    let mut out = AdvertisementOutput::new(SCHEMA_ID, &adv);
    if args.reveal_identity {
        out.identity = Some(hex::encode(adv.identity()));
    }
    print_advertisement(&out, format);
    Ok(SUCCESS)
}

fn parser_config(args: &ParseArgs) -> ParserConfig {
    let mut config = if args.advisory_section_length {
        ParserConfig::advisory()
    } else {
        ParserConfig::default()
    };
    if let Some(max) = args.max_inner_elements {
        config.max_inner_elements = max;
    }
    config
}
