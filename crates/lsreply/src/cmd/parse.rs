use std::fs;

use lsreply_reply::{parse_and_validate, parse_with_schema};
use lsreply_schema::{Schema, SchemaConfig};
use serde_json::Value;

use crate::cmd::ParseArgs;
use crate::exit::{io_error, schema_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, OutputFormat, Report};

pub fn run(args: ParseArgs, format: OutputFormat) -> CliResult<i32> {
    let parsed = match &args.schema {
        Some(path) => {
            let schema_json = fs::read_to_string(path).map_err(|err| {
                io_error(&format!("failed reading {}", path.display()), err)
            })?;
            let defaults = SchemaConfig::default();
            let config = SchemaConfig {
                strict_mode: args.strict,
                max_payload_size: args.max_size.unwrap_or(defaults.max_payload_size),
            };
            let schema = Schema::from_json_with_config(&schema_json, config)
                .map_err(|err| schema_error("schema load failed", err))?;
            parse_with_schema(&args.payload, &schema)
                .map_err(|err| schema_error("payload rejected", err))?
        }
        None => parse_and_validate(&args.payload)
            .ok_or_else(|| CliError::new(DATA_INVALID, "payload rejected: Malformed json."))?,
    };

    let rendered = parsed.to_string();
    let report = Report::new("parse", rendered.clone())
        .field("type", type_name(&parsed))
        .field("value", rendered);
    print_report(&report, format);

    Ok(SUCCESS)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_payload_is_data_invalid() {
        let err = run(
            ParseArgs {
                payload: "not json".to_string(),
                schema: None,
                strict: false,
                max_size: None,
            },
            OutputFormat::Raw,
        )
        .expect_err("malformed payload should fail");
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn missing_schema_file_is_reported() {
        let err = run(
            ParseArgs {
                payload: "{}".to_string(),
                schema: Some(std::path::PathBuf::from("/nonexistent/lsreply.schema.json")),
                strict: false,
                max_size: None,
            },
            OutputFormat::Raw,
        )
        .expect_err("missing schema file should fail");
        assert_eq!(err.code, crate::exit::NOT_FOUND);
    }

    #[test]
    fn type_names_cover_all_values() {
        assert_eq!(type_name(&serde_json::json!({})), "object");
        assert_eq!(type_name(&serde_json::json!([])), "array");
        assert_eq!(type_name(&serde_json::json!(1.5)), "number");
    }
}
