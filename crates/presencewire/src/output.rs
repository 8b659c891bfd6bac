use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use presencewire::element::{type_name, DataElement};
use presencewire::Advertisement;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    /// Bare hex bytes, for piping `build` into `parse`.
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

#[derive(Serialize)]
pub struct ElementOutput {
    pub data_type: u32,
    pub type_name: &'static str,
    pub length: usize,
    pub value: String,
}

impl From<&DataElement> for ElementOutput {
    fn from(element: &DataElement) -> Self {
        Self {
            data_type: element.data_type,
            type_name: type_name(element.data_type),
            length: element.value.len(),
            value: hex::encode(&element.value),
        }
    }
}

#[derive(Serialize)]
pub struct AdvertisementOutput {
    pub schema_id: &'static str,
    pub version: u8,
    pub length: usize,
    pub identity_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    pub salt: String,
    pub actions: Vec<u8>,
    pub data_elements: Vec<ElementOutput>,
    pub bytes: String,
}

impl AdvertisementOutput {
    pub fn new(schema_id: &'static str, adv: &Advertisement) -> Self {
        Self {
            schema_id,
            version: adv.version(),
            length: adv.length(),
            identity_type: adv.identity_type().as_str(),
            identity: None,
            salt: hex::encode(adv.salt()),
            actions: adv.actions().to_vec(),
            data_elements: adv.data_elements().iter().map(ElementOutput::from).collect(),
            bytes: hex::encode(adv.to_bytes()),
        }
    }
}

pub fn print_advertisement(out: &AdvertisementOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut summary = Table::new();
            summary
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["VERSION", "LENGTH", "IDENTITY", "SALT", "ACTIONS"])
                .add_row(vec![
                    out.version.to_string(),
                    out.length.to_string(),
                    out.identity_type.to_string(),
                    out.salt.clone(),
                    join(&out.actions),
                ]);
            println!("{summary}");

            if !out.data_elements.is_empty() {
                let mut elements = Table::new();
                elements
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["TYPE", "NAME", "LENGTH", "VALUE"]);
                for element in &out.data_elements {
                    elements.add_row(vec![
                        element.data_type.to_string(),
                        element.type_name.to_string(),
                        element.length.to_string(),
                        element.value.clone(),
                    ]);
                }
                println!("{elements}");
            }
            if let Some(identity) = &out.identity {
                println!("identity: {identity}");
            }
            println!("bytes: {}", out.bytes);
        }
        OutputFormat::Pretty => {
            println!(
                "version={} length={} identity_type={} salt={} actions=[{}] elements={} bytes={}",
                out.version,
                out.length,
                out.identity_type,
                out.salt,
                join(&out.actions),
                out.data_elements.len(),
                out.bytes
            );
        }
        OutputFormat::Raw => println!("{}", out.bytes),
    }
}

fn join(values: &[u8]) -> String {
    values
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
