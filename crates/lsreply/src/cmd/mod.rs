use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod envelope;
pub mod get;
pub mod parse;
pub mod subscribe;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the reply envelope a helper would send.
    Envelope(EnvelopeArgs),
    /// Parse a payload and print the resulting tree.
    Parse(ParseArgs),
    /// Parse a payload and extract one typed field.
    Get(GetArgs),
    /// Run subscription detection and registration on a payload.
    Subscribe(SubscribeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Envelope(args) => envelope::run(args, format),
        Command::Parse(args) => parse::run(args, format),
        Command::Get(args) => get::run(args, format),
        Command::Subscribe(args) => subscribe::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum EnvelopeKind {
    Success,
    Unknown,
    BadJson,
    InvalidParams,
    NotImplemented,
    Internal,
    Custom,
}

#[derive(Args, Debug)]
pub struct EnvelopeArgs {
    /// Which reply to build.
    pub kind: EnvelopeKind,
    /// Error text for `custom`.
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// JSON payload.
    pub payload: String,
    /// Validate against this JSON Schema file instead of the permissive schema.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,
    /// Reject properties the schema does not declare.
    #[arg(long, requires = "schema")]
    pub strict: bool,
    /// Maximum payload size in bytes when --schema is set.
    #[arg(long, requires = "schema")]
    pub max_size: Option<usize>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum FieldKind {
    Bool,
    String,
    Int,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// JSON payload.
    pub payload: String,
    /// Field name to extract.
    #[arg(long, short = 'f')]
    pub field: String,
    /// Expected JSON type of the field.
    #[arg(long, short = 'k', default_value = "string")]
    pub kind: FieldKind,
    /// Value returned when the field is absent or mistyped.
    #[arg(long, short = 'd')]
    pub default: Option<String>,
}

#[derive(Args, Debug)]
pub struct SubscribeArgs {
    /// JSON payload of the request.
    pub payload: String,
    /// Service path the request is addressed to.
    #[arg(long, default_value = "/")]
    pub path: String,
    /// Method the request is addressed to.
    #[arg(long, default_value = "status")]
    pub method: String,
    /// After registering, broadcast this JSON to the path/method subscribers.
    #[arg(long, value_name = "JSON")]
    pub post: Option<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
