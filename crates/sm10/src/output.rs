use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use sm10_transport::PortInfo;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
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

/// Result of one device command.
#[derive(Debug, Default, Serialize)]
pub struct Outcome {
    pub command: &'static str,
    pub axis: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_um: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

impl Outcome {
    pub fn new(command: &'static str, axis: u8) -> Self {
        Self {
            command,
            axis,
            ..Self::default()
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("axis", self.axis.to_string())];
        if let Some(position) = self.position_um {
            fields.push(("position_um", format!("{position:+.4}")));
        }
        if let Some(status) = self.status {
            fields.push(("status", format!("0x{status:02X}")));
        }
        if let Some(slot) = self.slot {
            fields.push(("slot", slot.to_string()));
        }
        if let Some(reply) = &self.reply {
            fields.push(("reply", reply.clone()));
        }
        fields
    }

    /// The single value printed in raw mode.
    fn primary(&self) -> String {
        if let Some(position) = self.position_um {
            return position.to_string();
        }
        if let Some(status) = self.status {
            return status.to_string();
        }
        self.reply.clone().unwrap_or_default()
    }
}

pub fn print_outcome(outcome: &Outcome, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(outcome).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (name, value) in outcome.fields() {
                table.add_row(vec![name.to_string(), value]);
            }
            println!("{}\n{table}", outcome.command);
        }
        OutputFormat::Pretty => {
            let fields: Vec<String> = outcome
                .fields()
                .into_iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            println!("{} {}", outcome.command, fields.join(" "));
        }
        OutputFormat::Raw => {
            println!("{}", outcome.primary());
        }
    }
}

#[derive(Serialize)]
struct PortOutput<'a> {
    name: &'a str,
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

pub fn print_ports(ports: &[PortInfo], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out: Vec<PortOutput<'_>> = ports
                .iter()
                .map(|p| PortOutput {
                    name: &p.name,
                    kind: p.kind,
                    description: p.description.as_deref(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "TYPE", "DESCRIPTION"]);
            for p in ports {
                table.add_row(vec![
                    p.name.clone(),
                    p.kind.to_string(),
                    p.description.clone().unwrap_or_default(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for p in ports {
                match &p.description {
                    Some(desc) => println!("{} ({}, {desc})", p.name, p.kind),
                    None => println!("{} ({})", p.name, p.kind),
                }
            }
        }
        OutputFormat::Raw => {
            for p in ports {
                println!("{}", p.name);
            }
        }
    }
}
