use lsreply_reply::{get_bool, get_int, get_string, parse_and_validate};
use serde_json::Value;

use crate::cmd::{FieldKind, GetArgs};
use crate::exit::{CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, OutputFormat, Report};

pub fn run(args: GetArgs, format: OutputFormat) -> CliResult<i32> {
    let parsed = parse_and_validate(&args.payload)
        .ok_or_else(|| CliError::new(DATA_INVALID, "payload rejected: Malformed json."))?;

    let value = extract(&parsed, &args.field, args.kind, args.default.as_deref())?;
    let raw = match &value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    let report = Report::new("get", raw)
        .field("field", args.field.clone())
        .field("kind", kind_name(args.kind))
        .field("present", parsed.get(&args.field).is_some())
        .field("value", value);
    print_report(&report, format);

    Ok(SUCCESS)
}

fn extract(
    parsed: &Value,
    field: &str,
    kind: FieldKind,
    default: Option<&str>,
) -> CliResult<Value> {
    let value = match kind {
        FieldKind::Bool => {
            let default = match default {
                None => false,
                Some(text) => text.parse::<bool>().map_err(|_| {
                    CliError::usage(format!("--default {text:?} is not a boolean"))
                })?,
            };
            Value::from(get_bool(parsed, field, default))
        }
        FieldKind::String => Value::from(get_string(parsed, field, default.unwrap_or(""))),
        FieldKind::Int => {
            let default = match default {
                None => 0,
                Some(text) => text.parse::<i32>().map_err(|_| {
                    CliError::usage(format!("--default {text:?} is not a 32-bit integer"))
                })?,
            };
            Value::from(get_int(parsed, field, default))
        }
    };
    Ok(value)
}

fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Bool => "bool",
        FieldKind::String => "string",
        FieldKind::Int => "int",
    }
}
