use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use presencewire::IdentityType;

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod build;
pub mod envinfo;
pub mod header;
pub mod parse;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode or decode a data element header.
    Header(HeaderArgs),
    /// Build an advertisement with the MIC cryptor.
    Build(BuildArgs),
    /// Authenticate, decrypt and print an advertisement.
    Parse(ParseArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Header(args) => header::run(args.command, format),
        Command::Build(args) => build::run(args, format),
        Command::Parse(args) => parse::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct HeaderArgs {
    #[command(subcommand)]
    pub command: HeaderCommand,
}

#[derive(Subcommand, Debug)]
pub enum HeaderCommand {
    /// Encode a (type, length) pair.
    Encode(HeaderEncodeArgs),
    /// Decode header bytes.
    Decode(HeaderDecodeArgs),
}

#[derive(Args, Debug)]
pub struct HeaderEncodeArgs {
    /// Data element type.
    #[arg(long = "type", value_name = "TYPE")]
    pub data_type: u32,
    /// Value length in bytes (0-127).
    #[arg(long)]
    pub length: usize,
}

#[derive(Args, Debug)]
pub struct HeaderDecodeArgs {
    /// Hex-encoded header bytes.
    pub hex: String,
    /// Byte offset of the header within the input.
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

/// Identity kinds that can be broadcast.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum BroadcastIdentity {
    Private,
    Trusted,
}

impl From<BroadcastIdentity> for IdentityType {
    fn from(identity: BroadcastIdentity) -> Self {
        match identity {
            BroadcastIdentity::Private => IdentityType::Private,
            BroadcastIdentity::Trusted => IdentityType::Trusted,
        }
    }
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Salt as hex: 2 bytes, or 16 bytes for the encryption-info form.
    #[arg(long)]
    pub salt: String,
    /// 16-byte identity (metadata encryption key) as hex.
    #[arg(long)]
    pub identity: String,
    /// Authenticity key seed as hex.
    #[arg(long)]
    pub key_seed: String,
    /// Identity kind advertised in the section.
    #[arg(long, value_name = "KIND", default_value = "private")]
    pub identity_type: BroadcastIdentity,
    /// Action value (repeatable).
    #[arg(long = "action", value_name = "N")]
    pub actions: Vec<u8>,
    /// Extra data element as TYPE:HEX (repeatable).
    #[arg(long = "element", value_name = "TYPE:HEX")]
    pub elements: Vec<String>,
    /// Write a matching receiver credential (JSON) to this path.
    #[arg(long, value_name = "FILE")]
    pub credential_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Hex-encoded advertisement bytes.
    pub hex: String,
    /// Credential file (JSON with hex-encoded keys).
    #[arg(long, value_name = "FILE")]
    pub credential: PathBuf,
    /// Treat the section-length byte as advisory.
    #[arg(long)]
    pub advisory_section_length: bool,
    /// Maximum number of decrypted inner data elements.
    #[arg(long, value_name = "N")]
    pub max_inner_elements: Option<usize>,
    /// Include the recovered identity in the output.
    #[arg(long)]
    pub reveal_identity: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}

/// Decode a hex argument, tolerating a `0x` prefix and embedded whitespace.
pub(crate) fn decode_hex(name: &str, input: &str) -> CliResult<Vec<u8>> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits)
        .map_err(|err| CliError::new(USAGE, format!("{name} is not valid hex: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_hex_accepts_prefix_and_spaces() {
        assert_eq!(decode_hex("x", "0x01 02").unwrap(), vec![1, 2]);
        assert_eq!(decode_hex("x", "FCF1").unwrap(), vec![0xFC, 0xF1]);
        assert!(decode_hex("x", "").unwrap().is_empty());
    }

    #[test]
    fn decode_hex_rejects_odd_digits() {
        let err = decode_hex("--salt", "012").unwrap_err();
        assert_eq!(err.code, USAGE);
        assert!(err.message.starts_with("--salt"));
    }
}
