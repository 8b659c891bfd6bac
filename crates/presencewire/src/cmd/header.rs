use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use presencewire::element::{decode_header, encode_header, type_name};
use serde::Serialize;

use crate::cmd::{decode_hex, HeaderCommand, HeaderDecodeArgs, HeaderEncodeArgs};
use crate::exit::{element_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct HeaderOutput {
    schema_id: &'static str,
    data_type: u32,
    type_name: &'static str,
    length: usize,
    form: &'static str,
    bytes_consumed: usize,
    bytes: String,
}

pub fn run(command: HeaderCommand, format: OutputFormat) -> CliResult<i32> {
    let out = match command {
        HeaderCommand::Encode(args) => encode(&args)?,
        HeaderCommand::Decode(args) => decode(&args)?,
    };
    print_header(&out, format);
    Ok(SUCCESS)
}

fn encode(args: &HeaderEncodeArgs) -> CliResult<HeaderOutput> {
    let bytes = encode_header(args.data_type, args.length)
        .map_err(|err| element_error("header encode failed", err))?;
    Ok(header_output(args.data_type, args.length, &bytes))
}

fn decode(args: &HeaderDecodeArgs) -> CliResult<HeaderOutput> {
    let bytes = decode_hex("header", &args.hex)?;
    let (data_type, length, consumed) = decode_header(&bytes, args.offset)
        .map_err(|err| element_error("header decode failed", err))?;
    let header_bytes = bytes
        .get(args.offset..args.offset + consumed)
        .unwrap_or_default();
    Ok(header_output(data_type, length, header_bytes))
}

fn header_output(data_type: u32, length: usize, bytes: &[u8]) -> HeaderOutput {
    HeaderOutput {
        schema_id: "https://schemas.3leaps.dev/presencewire/cli/v1/header.schema.json",
        data_type,
        type_name: type_name(data_type),
        length,
        form: if bytes.len() == 1 {
            "single-byte"
        } else {
            "multi-byte"
        },
        bytes_consumed: bytes.len(),
        bytes: hex::encode(bytes),
    }
}

fn print_header(out: &HeaderOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["TYPE", "NAME", "LENGTH", "FORM", "BYTES"])
                .add_row(vec![
                    out.data_type.to_string(),
                    out.type_name.to_string(),
                    out.length.to_string(),
                    out.form.to_string(),
                    out.bytes.clone(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "type={} ({}) length={} form={} bytes={}",
                out.data_type, out.type_name, out.length, out.form, out.bytes
            );
        }
        OutputFormat::Raw => println!("{}", out.bytes),
    }
}
