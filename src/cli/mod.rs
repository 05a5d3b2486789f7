//! Command-line entry point: load settings, start logging, serve the API.

pub mod types;

pub use types::Cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::infrastructure::config::{LoadError, SettingsLoader};
use crate::infrastructure::http::HttpServer;
use crate::infrastructure::logging::LoggerImpl;

/// Run the server until a shutdown signal arrives.
///
/// Configuration is resolved before anything else; an invalid configuration
/// aborts startup.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = SettingsLoader::load_from(&cli.env_file)
        .map(Arc::new)
        .context("failed to load configuration")?;

    let _logger = LoggerImpl::init(&cli.log_config().with_debug(settings.debug))?;

    info!(
        app_name = %settings.app_name,
        version = %settings.app_version,
        env_file = %cli.env_file.display(),
        "InfluencerFlow API starting up"
    );
    debug!(settings = ?settings, "effective configuration");

    HttpServer::new(settings, cli.server_config()).serve().await?;

    info!("InfluencerFlow API shutting down");
    Ok(())
}

/// Report a fatal error on stderr and pick the process exit code.
pub fn handle_error(err: &anyhow::Error) -> ExitCode {
    eprint!("{}", error_report(err));
    ExitCode::FAILURE
}

/// The error chain followed by one line per configuration violation
pub fn error_report(err: &anyhow::Error) -> String {
    let mut report = format!("Error: {err:#}\n");

    if let Some(load_error) = err.downcast_ref::<LoadError>() {
        for violation in load_error.violations() {
            report.push_str(&format!("  - {violation}\n"));
        }
    }

    report
}
