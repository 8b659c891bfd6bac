mod cmd;
mod credential_file;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "presencewire",
    version,
    about = "Build and parse presence advertisements"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr). RUST_LOG takes precedence when set.
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "PRESENCEWIRE_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::HeaderCommand;

    #[test]
    fn parses_build_subcommand() {
        let cli = Cli::try_parse_from([
            "presencewire",
            "build",
            "--salt",
            "0102",
            "--identity",
            "00000000000000000000000000000000",
            "--key-seed",
            "07070707070707070707070707070707",
            "--action",
            "6",
            "--action",
            "9",
            "--element",
            "11:57",
        ])
        .expect("build args should parse");

        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.actions, vec![6, 9]);
                assert_eq!(args.elements, vec!["11:57".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_header_encode() {
        let cli = Cli::try_parse_from([
            "presencewire",
            "header",
            "encode",
            "--type",
            "20",
            "--length",
            "10",
        ])
        .expect("header args should parse");

        match cli.command {
            Command::Header(args) => assert!(matches!(
                args.command,
                HeaderCommand::Encode(ref encode) if encode.data_type == 20 && encode.length == 10
            )),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unencrypted_identity_type() {
        let err = Cli::try_parse_from([
            "presencewire",
            "build",
            "--salt",
            "0102",
            "--identity",
            "00",
            "--key-seed",
            "07",
            "--identity-type",
            "provisioned",
        ])
        .expect_err("provisioned identities cannot be broadcast");

        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn parse_requires_credential() {
        let err = Cli::try_parse_from(["presencewire", "parse", "2025"])
            .expect_err("missing --credential should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
