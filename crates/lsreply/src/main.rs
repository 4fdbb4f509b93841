mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "lsreply", version, about = "Bus reply and payload helper CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "text",
        env = LOG_FORMAT_ENV,
        global = true
    )]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = LOG_LEVEL_ENV,
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

    #[test]
    fn parses_envelope_subcommand() {
        let cli = Cli::try_parse_from(["lsreply", "envelope", "bad-json"])
            .expect("envelope args should parse");
        assert!(matches!(cli.command, Command::Envelope(_)));
    }

    #[test]
    fn parses_get_subcommand() {
        let cli = Cli::try_parse_from([
            "lsreply",
            "get",
            r#"{"volume":3}"#,
            "--field",
            "volume",
            "--kind",
            "int",
            "--default",
            "0",
        ])
        .expect("get args should parse");
        assert!(matches!(cli.command, Command::Get(_)));
    }

    #[test]
    fn get_requires_field() {
        let err = Cli::try_parse_from(["lsreply", "get", "{}"])
            .expect_err("missing --field should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_unknown_envelope_kind() {
        let err = Cli::try_parse_from(["lsreply", "envelope", "teapot"])
            .expect_err("unknown kind should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn strict_requires_schema() {
        let err = Cli::try_parse_from(["lsreply", "parse", "{}", "--strict"])
            .expect_err("--strict without --schema should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn log_flags_are_global() {
        let cli = Cli::try_parse_from([
            "lsreply",
            "version",
            "--log-level",
            "off",
            "--log-format",
            "json",
        ])
        .expect("global log flags should parse after the subcommand");
        assert_eq!(cli.log_level, LogLevel::Off);
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
