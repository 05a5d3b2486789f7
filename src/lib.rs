//! InfluencerFlow - AI Platform backend
//!
//! Skeleton backend for the InfluencerFlow influencer campaign platform.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): the typed [`Settings`] model
//! - **Infrastructure Layer** (`infrastructure`): configuration loading,
//!   logging and the HTTP API
//! - **CLI Layer** (`cli`): command-line entry point
//!
//! # Example
//!
//! ```no_run
//! use influencerflow::SettingsLoader;
//!
//! let settings = SettingsLoader::load().expect("invalid configuration");
//! println!("{} v{}", settings.app_name, settings.app_version);
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::models::Settings;
pub use infrastructure::config::{ConfigError, ConfigErrors, LoadError, SettingsLoader};
pub use infrastructure::http::{build_router, HttpServer, HttpServerConfig};
