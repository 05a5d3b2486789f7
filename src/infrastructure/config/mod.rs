//! Configuration management infrastructure
//!
//! Layered settings resolution using figment:
//! - `.env`-style override file (optional)
//! - Environment variable overrides, matched ignoring case
//! - Schema-driven type coercion with aggregated errors

pub mod loader;
pub mod schema;
pub mod sources;

pub use loader::{resolve, ConfigError, ConfigErrors, LoadError, SettingsLoader, DEFAULT_ENV_FILE};
pub use schema::{FieldKind, FieldSpec, SETTINGS_FIELDS};
pub use sources::{EnvSnapshot, OverrideFile};
