//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use influencerflow::{Settings, SettingsLoader};
use tempfile::TempDir;

/// The five fields that have no default, with simple values
pub const REQUIRED_VARS: [(&str, &str); 5] = [
    ("SUPABASE_URL", "https://x.test"),
    ("SUPABASE_KEY", "k"),
    ("OPENAI_API_KEY", "o"),
    ("ELEVENLABS_API_KEY", "e"),
    ("SECRET_KEY", "s"),
];

/// Required variables plus `extra`, later entries winning
pub fn vars_with(extra: &[(&str, &str)]) -> Vec<(String, String)> {
    REQUIRED_VARS
        .iter()
        .chain(extra)
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Settings built from the required variables plus `extra`
pub fn settings_with(extra: &[(&str, &str)]) -> Settings {
    SettingsLoader::from_sources(vars_with(extra), None).expect("test settings should load")
}

/// Write an override file with the given lines into a fresh temp directory
pub fn write_env_file(lines: &[&str]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(".env");

    let mut file = std::fs::File::create(&path).expect("Failed to create override file");
    for line in lines {
        writeln!(file, "{line}").expect("Failed to write override file");
    }
    file.flush().expect("Failed to flush override file");

    (dir, path)
}
