use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::{Map, Value};

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

/// Result of one CLI command: named fields plus the raw text it produced.
#[derive(Debug)]
pub struct Report {
    command: &'static str,
    fields: Vec<(&'static str, Value)>,
    raw: String,
}

impl Report {
    pub fn new(command: &'static str, raw: impl Into<String>) -> Self {
        Self {
            command,
            fields: Vec::new(),
            raw: raw.into(),
        }
    }

    pub fn field(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    fn to_json(&self) -> String {
        let mut map = Map::new();
        map.insert("command".to_string(), Value::from(self.command));
        for (name, value) in &self.fields {
            map.insert((*name).to_string(), value.clone());
        }
        serde_json::to_string(&Value::Object(map)).unwrap_or_else(|_| "{}".to_string())
    }
}

pub fn print_report(report: &Report, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", report.to_json()),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (name, value) in &report.fields {
                table.add_row(vec![name.to_string(), display_value(value)]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let line = report
                .fields
                .iter()
                .map(|(name, value)| format!("{name}={}", display_value(value)))
                .collect::<Vec<_>>()
                .join(" ");
            println!("{}: {line}", report.command);
        }
        OutputFormat::Raw => print_raw(&report.raw),
    }
}

pub fn print_raw(text: &str) {
    let mut out = std::io::stdout();
    let _ = writeln!(out, "{text}");
    let _ = out.flush();
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_report_carries_command_and_fields() {
        let report = Report::new("get", "42")
            .field("field", "volume")
            .field("value", 42);
        let value: Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["command"], "get");
        assert_eq!(value["field"], "volume");
        assert_eq!(value["value"], 42);
    }

    #[test]
    fn strings_display_without_quotes() {
        assert_eq!(display_value(&Value::from("a b")), "a b");
        assert_eq!(display_value(&Value::from(true)), "true");
    }
}
