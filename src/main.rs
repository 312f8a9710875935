//! Flight Insight entrypoint: reduce one telemetry log and print the
//! sanitized summary as JSON, or its flattened context lines.

use clap::Parser;
use flight_insight::{
    config::InsightConfig,
    export::{parse_log, summary_lines},
    logging::StructuredLogger,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Reduce a flight telemetry log to its session summary")]
struct Args {
    /// JSON-lines telemetry log
    #[arg(value_name = "LOG")]
    log_path: PathBuf,

    /// Print flattened context lines instead of the JSON envelope
    #[arg(long)]
    flatten: bool,

    /// Session identity; defaults to the log's file name
    #[arg(long = "session", value_name = "ID")]
    session: Option<String>,
}

impl Args {
    fn session_id(&self) -> String {
        self.session.clone().unwrap_or_else(|| {
            self.log_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let config_path = std::env::var("FLIGHT_INSIGHT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("flight-insight.json"));
    let config = InsightConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    let session_id = args.session_id();
    info!(log = ?args.log_path, session_id = %session_id, "parsing log");

    let parsed = parse_log(&args.log_path, &session_id, &config)?;
    if args.flatten {
        for line in summary_lines(&parsed.data, &config.flatten)?
            .into_iter()
            .take(config.flatten.preview_lines)
        {
            println!("{}", line);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parses_flags_in_any_position() {
        let args = Args::try_parse_from(["flight-insight", "--flatten", "logs/f1.jsonl", "--session", "s-1"]).unwrap();
        assert_eq!(args.log_path, PathBuf::from("logs/f1.jsonl"));
        assert!(args.flatten);
        assert_eq!(args.session_id(), "s-1");
    }

    #[test]
    fn session_defaults_to_file_name() {
        let args = Args::try_parse_from(["flight-insight", "logs/f1.jsonl"]).unwrap();
        assert!(!args.flatten);
        assert_eq!(args.session_id(), "f1.jsonl");
    }

    #[test]
    fn second_log_path_is_rejected() {
        let parsed = Args::try_parse_from(["flight-insight", "a.jsonl", "b.jsonl", "--flatten"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_log_path_is_rejected() {
        let err = Args::try_parse_from(["flight-insight", "--flatten"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn help_is_answered() {
        let err = Args::try_parse_from(["flight-insight", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
