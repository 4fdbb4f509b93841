use lsreply_bus::LoopbackBus;
use lsreply_reply::{reply_custom_error, reply_error, reply_success, ErrorKind};

use crate::cmd::{EnvelopeArgs, EnvelopeKind};
use crate::exit::{CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_report, OutputFormat, Report};

pub fn run(args: EnvelopeArgs, format: OutputFormat) -> CliResult<i32> {
    let bus = LoopbackBus::new();
    let message = bus.message("/lsreply/cli", "envelope", "{}");

    match (args.kind, args.text.as_deref()) {
        (EnvelopeKind::Custom, Some(text)) => reply_custom_error(&bus, &message, text),
        (EnvelopeKind::Custom, None) => {
            return Err(CliError::usage("envelope custom requires --text"));
        }
        (_, Some(_)) => {
            return Err(CliError::usage("--text is only valid with envelope custom"));
        }
        (EnvelopeKind::Success, None) => reply_success(&bus, &message),
        (kind, None) => {
            if let Some(kind) = error_kind(kind) {
                reply_error(&bus, &message, kind);
            }
        }
    }

    let sent = bus
        .last_reply()
        .ok_or_else(|| CliError::new(INTERNAL, "no reply was produced"))?;

    let report = Report::new("envelope", sent.payload.clone())
        .field("kind", kind_name(args.kind))
        .field("payload", sent.payload);
    print_report(&report, format);

    Ok(SUCCESS)
}

fn error_kind(kind: EnvelopeKind) -> Option<ErrorKind> {
    match kind {
        EnvelopeKind::Unknown => Some(ErrorKind::Unknown),
        EnvelopeKind::BadJson => Some(ErrorKind::BadJson),
        EnvelopeKind::InvalidParams => Some(ErrorKind::InvalidParams),
        EnvelopeKind::NotImplemented => Some(ErrorKind::NotImplemented),
        EnvelopeKind::Internal => Some(ErrorKind::Internal),
        EnvelopeKind::Success | EnvelopeKind::Custom => None,
    }
}

fn kind_name(kind: EnvelopeKind) -> &'static str {
    match kind {
        EnvelopeKind::Success => "success",
        EnvelopeKind::Unknown => "unknown",
        EnvelopeKind::BadJson => "bad-json",
        EnvelopeKind::InvalidParams => "invalid-params",
        EnvelopeKind::NotImplemented => "not-implemented",
        EnvelopeKind::Internal => "internal",
        EnvelopeKind::Custom => "custom",
    }
}
