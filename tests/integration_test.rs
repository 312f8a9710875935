//! Integration test: JSON-lines log on disk → parsed envelope → flattened lines.

use flight_insight::{
    anomaly::AnomalyKind,
    config::InsightConfig,
    export::{parse_log, summary_lines},
    source::{FileSource, MessageSource},
    SourceError,
};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};

fn write_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    for l in lines {
        writeln!(f, "{}", l).unwrap();
    }
    path
}

const FLIGHT: &[&str] = &[
    r#"{"meta":{"type":"FMT","timestamp":null},"data":{"Name":"GPS"}}"#,
    r#"{"meta":{"type":"GPS","timestamp":100.0},"data":{"TimeUS":1000000,"NSats":12,"Status":3}}"#,
    r#"{"meta":{"type":"GPS","timestamp":100.0},"data":{"TimeUS":2000000,"NSats":3,"Status":3}}"#,
    r#"{"meta":{"type":"ATT","timestamp":100.0},"data":{"TimeUS":2500000,"Roll":1.5,"Pitch":[1,2]}}"#,
    "garbage line",
    r#"{"mavpackettype":"GPS_RAW_INT","_timestamp":3.0,"satellites_visible":9,"fix_type":1}"#,
    r#"{"meta":{"type":"GPS","timestamp":100.0},"data":{"TimeUS":4000000,"NSats":2,"Status":0}}"#,
    r#"{"meta":{"type":"GPS","timestamp":100.0},"data":{"TimeUS":10000000,"NSats":3,"Status":3}}"#,
    r#"{"meta":{"type":"GPS","timestamp":100.0},"data":{"TimeUS":13250000,"NSats":14,"Status":6}}"#,
];

#[test]
fn parse_flight_log_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(dir.path(), "flight.jsonl", FLIGHT);
    let parsed = parse_log(&path, "flight.jsonl", &InsightConfig::default()).unwrap();
    let s = &parsed.data;

    // FMT has no time and the garbage line never decodes.
    assert_eq!(s.kpis.message_count, 7);
    assert_eq!(s.duration_seconds, 12.25);
    assert_eq!(s.kpis.flight_time_seconds, 12);
    assert_eq!(s.quality_bad_samples, vec![2.0, 3.0, 4.0, 10.0]);

    let got: Vec<(f64, AnomalyKind)> = s.anomalies.iter().map(|a| (a.timestamp, a.kind)).collect();
    assert_eq!(
        got,
        vec![
            (2.0, AnomalyKind::GpsDropout),
            (4.0, AnomalyKind::GpsRecovered),
            (10.0, AnomalyKind::GpsDropout),
            (10.0, AnomalyKind::GpsRecovered),
        ]
    );
    let bytes = std::fs::read(&path).unwrap();
    let expected = format!("{:x}", Sha256::digest(&bytes));
    assert_eq!(parsed.fingerprint.as_deref(), Some(expected.as_str()));
    assert_eq!(parsed.session_id, "flight.jsonl");
}

#[test]
fn parsing_twice_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(dir.path(), "flight.jsonl", FLIGHT);
    let config = InsightConfig::default();
    let a = serde_json::to_string(&parse_log(&path, "s", &config).unwrap()).unwrap();
    let b = serde_json::to_string(&parse_log(&path, "s", &config).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn flattened_preview() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(dir.path(), "flight.jsonl", FLIGHT);
    let config = InsightConfig::default();
    let parsed = parse_log(&path, "s", &config).unwrap();
    let lines = summary_lines(&parsed.data, &config.flatten).unwrap();
    assert_eq!(lines[0], "duration_seconds: 12.25");
    assert_eq!(lines[1], "kpis.flight_time_seconds: 12");
    assert_eq!(lines[2], "kpis.message_count: 7");
    assert!(lines[3].starts_with("anomalies: [") && lines[3].ends_with("(truncated)"));
    assert_eq!(lines[4], "quality_bad_samples: [2.0, 3.0, 4.0] (truncated)");
    assert!(lines[5].starts_with("records: [") && lines[5].ends_with("(truncated)"));
}

#[test]
fn empty_log_is_an_empty_flight() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(dir.path(), "empty.jsonl", &[]);
    let parsed = parse_log(&path, "empty", &InsightConfig::default()).unwrap();
    assert!(parsed.data.is_empty());
    assert_eq!(parsed.data.duration_seconds, 0.0);
    assert!(parsed.data.anomalies.is_empty());
}

#[test]
fn missing_log_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let r = parse_log(&dir.path().join("absent.jsonl"), "absent", &InsightConfig::default());
    assert!(matches!(r, Err(SourceError::Open { .. })));
}

#[test]
fn source_counts_skipped_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(dir.path(), "flight.jsonl", FLIGHT);
    let mut src = FileSource::open(&path).unwrap();
    let mut n = 0;
    while src.next_message().unwrap().is_some() {
        n += 1;
    }
    assert_eq!(n, 8);
    assert_eq!(src.skipped(), 1);
}
