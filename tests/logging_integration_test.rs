// Integration tests for logging functionality
// The global subscriber can only be installed once per process, so every
// scenario lives in a single test.

use std::fs;
use std::time::Duration;

use influencerflow::infrastructure::logging::{LogConfig, LogFormat, LoggerImpl, RotationPolicy};
use tempfile::TempDir;
use tracing::{info, instrument, warn};

#[test]
fn test_logging_comprehensive() {
    let temp_dir = TempDir::new().unwrap();

    let config = LogConfig {
        level: "info".to_string(),
        format: LogFormat::Json,
        log_dir: Some(temp_dir.path().to_path_buf()),
        rotation: RotationPolicy::Never,
        max_log_files: 5,
    };

    // RUST_LOG would override the configured level
    let logger = temp_env::with_var_unset("RUST_LOG", || LoggerImpl::init(&config)).unwrap();
    assert!(logger.writes_files());

    // A second subscriber cannot be installed
    assert!(LoggerImpl::init(&LogConfig::default()).is_err());

    info!("campaign sync started");
    warn!(creator_id = "cr_42", "creator profile incomplete");
    tracing::debug!("below the configured level");

    assert_eq!(score_match(3, 4), 7);

    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        send_outreach("es").await;
    });

    // Dropping the guard flushes the non-blocking writer
    drop(logger);
    std::thread::sleep(Duration::from_millis(100));

    let log_files: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with("influencerflow") && name.ends_with(".log"))
        })
        .collect();
    assert_eq!(log_files.len(), 1, "exactly one log file should be created");

    let contents = fs::read_to_string(log_files[0].path()).unwrap();

    assert!(contents.contains("logger initialized"));
    assert!(contents.contains("campaign sync started"));
    assert!(contents.contains("creator profile incomplete"));
    assert!(contents.contains("cr_42"));
    assert!(contents.contains("score_match"), "span name should be recorded");
    assert!(contents.contains("outreach queued"));
    assert!(!contents.contains("below the configured level"));

    for line in contents.lines().filter(|line| !line.trim().is_empty()) {
        let parsed: serde_json::Value = serde_json::from_str(line)
            .unwrap_or_else(|err| panic!("log line is not JSON ({err}): {line}"));
        assert!(parsed.get("level").is_some());
        assert!(parsed.get("timestamp").is_some());
    }
}

#[instrument]
fn score_match(audience: u32, engagement: u32) -> u32 {
    info!("scoring creator match");
    audience + engagement
}

#[instrument]
async fn send_outreach(language: &str) {
    info!(language, "outreach queued");
}
