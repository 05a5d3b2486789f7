//! CLI type definitions
//!
//! This module contains the clap structure that defines the server command line.

use clap::Parser;
use std::path::PathBuf;

use crate::infrastructure::config::DEFAULT_ENV_FILE;
use crate::infrastructure::http::HttpServerConfig;
use crate::infrastructure::logging::{LogConfig, LogFormat, RotationPolicy};

/// Command-line arguments of the API server
#[derive(Parser, Debug)]
#[command(name = "influencerflow")]
#[command(about = "InfluencerFlow AI Platform API server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// Override file read underneath the environment (skipped if absent)
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Log level when RUST_LOG is unset; `debug=true` raises it to debug
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Stdout log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Also write JSON logs to rolling files in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for log files
    #[arg(long, value_enum, default_value_t = RotationPolicy::Daily)]
    pub log_rotation: RotationPolicy,
}

impl Cli {
    /// Logger configuration from the logging flags
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            format: self.log_format,
            log_dir: self.log_dir.clone(),
            rotation: self.log_rotation,
            ..LogConfig::default()
        }
    }

    /// Listener address from `--host` and `--port`
    pub fn server_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }
}
