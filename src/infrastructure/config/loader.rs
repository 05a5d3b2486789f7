//! Settings resolution over the merged configuration sources.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use figment::Figment;
use thiserror::Error;
use tracing::{debug, info};

use super::schema::{self, is_route_prefix, parse_bool, parse_list, FieldKind, FieldSpec};
use super::sources::{lossy_text, EnvSnapshot, OverrideFile};
use crate::domain::models::settings::{self as defaults, Settings};

/// Default override file, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// A single configuration violation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A field without a default is absent from every source
    #[error("missing required configuration: {field}")]
    MissingRequiredField {
        /// Field name
        field: &'static str,
    },

    /// A supplied value does not parse as the field's declared kind
    #[error("invalid configuration value for {field}: expected {expected}, got {value:?}")]
    InvalidFieldType {
        /// Field name
        field: &'static str,
        /// Declared kind of the field
        expected: FieldKind,
        /// Raw value as supplied
        value: String,
    },
}

impl ConfigError {
    /// Name of the offending field
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { field } | Self::InvalidFieldType { field, .. } => *field,
        }
    }
}

/// Every violation found in one resolution pass, in field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigErrors(Vec<ConfigError>);

impl ConfigErrors {
    /// The violations, in field declaration order
    pub fn as_slice(&self) -> &[ConfigError] {
        &self.0
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{single}"),
            errors => {
                write!(f, "{} configuration errors", errors.len())?;
                for error in errors {
                    write!(f, "; {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigErrors {}

/// Failure to produce a [`Settings`] instance
#[derive(Error, Debug)]
pub enum LoadError {
    /// One or more fields are missing or malformed
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigErrors),

    /// The override file exists but cannot be read or parsed
    #[error("failed to read override file {}: {source}", .path.display())]
    OverrideFile {
        /// Path of the override file
        path: PathBuf,
        /// Underlying read or parse failure
        #[source]
        source: dotenvy::Error,
    },
}

impl LoadError {
    /// Field-level violations, empty for I/O failures
    pub fn violations(&self) -> &[ConfigError] {
        match self {
            Self::Invalid(errors) => errors.as_slice(),
            Self::OverrideFile { .. } => &[],
        }
    }
}

/// Builds [`Settings`] from layered sources.
///
/// Precedence (lowest to highest):
/// 1. Declared field defaults
/// 2. Override file (`.env` style, optional)
/// 3. Environment variables, matched to field names ignoring case
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    env: Option<EnvSnapshot>,
    override_file: Option<PathBuf>,
}

impl SettingsLoader {
    /// Loader over the process environment with no override file
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the process environment with explicit key/value pairs
    #[must_use]
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.env = Some(EnvSnapshot::from_vars(vars));
        self
    }

    /// Read an override file underneath the environment. A missing file is skipped.
    #[must_use]
    pub fn with_override_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_file = Some(path.into());
        self
    }

    /// Load from the process environment and `.env` in the working directory
    pub fn load() -> Result<Settings, LoadError> {
        Self::load_from(DEFAULT_ENV_FILE)
    }

    /// Load from the process environment and the given override file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Settings, LoadError> {
        Self::new()
            .with_override_file(path.as_ref())
            .build()
    }

    /// Load from an explicit environment snapshot and optional override file
    pub fn from_sources<I, K, V>(
        env: I,
        override_file: Option<&Path>,
    ) -> Result<Settings, LoadError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let loader = Self::new().with_env(env);
        match override_file {
            Some(path) => loader.with_override_file(path).build(),
            None => loader.build(),
        }
    }

    /// Merge the raw sources in precedence order
    pub fn figment(&self) -> Result<Figment, LoadError> {
        let mut figment = Figment::new();

        if let Some(path) = &self.override_file {
            if let Some(file) = OverrideFile::read(path)? {
                figment = figment.merge(file);
            }
        }

        let env = self.env.clone().unwrap_or_else(EnvSnapshot::from_process);
        debug!(fields = env.len(), "captured environment");

        Ok(figment.merge(env))
    }

    /// Resolve and validate every field, collecting all violations
    pub fn build(self) -> Result<Settings, LoadError> {
        let figment = self.figment()?;
        let settings = resolve(&figment)?;

        info!(
            app_name = %settings.app_name,
            app_version = %settings.app_version,
            debug = settings.debug,
            "configuration loaded"
        );
        Ok(settings)
    }
}

/// Resolve a [`Settings`] from an already merged figment
pub fn resolve(figment: &Figment) -> Result<Settings, ConfigErrors> {
    let mut r = Resolver::new(figment);

    let settings = Settings {
        app_name: r.string(&schema::APP_NAME, defaults::default_app_name),
        app_version: r.string(&schema::APP_VERSION, defaults::default_app_version),
        debug: r.boolean(&schema::DEBUG, defaults::default_debug()),
        api_v1_prefix: r.route_prefix(&schema::API_V1_PREFIX, defaults::default_api_v1_prefix),
        supabase_url: r.required(&schema::SUPABASE_URL),
        supabase_key: r.required(&schema::SUPABASE_KEY),
        supabase_service_key: r.optional_string(&schema::SUPABASE_SERVICE_KEY),
        openai_api_key: r.required(&schema::OPENAI_API_KEY),
        elevenlabs_api_key: r.required(&schema::ELEVENLABS_API_KEY),
        perplexity_api_key: r.optional_string(&schema::PERPLEXITY_API_KEY),
        secret_key: r.required(&schema::SECRET_KEY),
        algorithm: r.string(&schema::ALGORITHM, defaults::default_algorithm),
        access_token_expire_minutes: r.integer(
            &schema::ACCESS_TOKEN_EXPIRE_MINUTES,
            defaults::default_access_token_expire_minutes(),
        ),
        smtp_host: r.optional_string(&schema::SMTP_HOST),
        smtp_port: r.optional_integer(&schema::SMTP_PORT, defaults::default_smtp_port()),
        smtp_username: r.optional_string(&schema::SMTP_USERNAME),
        smtp_password: r.optional_string(&schema::SMTP_PASSWORD),
        max_file_size: r.integer(&schema::MAX_FILE_SIZE, defaults::default_max_file_size()),
        allowed_file_types: r.list(
            &schema::ALLOWED_FILE_TYPES,
            defaults::default_allowed_file_types,
        ),
        max_voice_duration: r.integer(
            &schema::MAX_VOICE_DURATION,
            defaults::default_max_voice_duration(),
        ),
        supported_languages: r.list(
            &schema::SUPPORTED_LANGUAGES,
            defaults::default_supported_languages,
        ),
        rate_limit_per_minute: r.integer(
            &schema::RATE_LIMIT_PER_MINUTE,
            defaults::default_rate_limit_per_minute(),
        ),
        allowed_origins: r.list(&schema::ALLOWED_ORIGINS, defaults::default_allowed_origins),
    };

    r.finish()?;
    Ok(settings)
}

/// Single pass over the schema that records violations instead of stopping
struct Resolver<'a> {
    figment: &'a Figment,
    errors: Vec<ConfigError>,
}

impl<'a> Resolver<'a> {
    const fn new(figment: &'a Figment) -> Self {
        Self {
            figment,
            errors: Vec::new(),
        }
    }

    fn lookup(&mut self, spec: &FieldSpec) -> Option<String> {
        let Ok(value) = self.figment.find_value(spec.name) else {
            if spec.required {
                self.errors
                    .push(ConfigError::MissingRequiredField { field: spec.name });
            }
            return None;
        };

        if let Some(metadata) = self.figment.find_metadata(spec.name) {
            debug!(
                field = spec.name,
                source = %metadata.name,
                "resolved configuration field"
            );
        }

        if let Some(raw) = value.as_str() {
            return Some(raw.to_string());
        }

        // Present but not text, e.g. an environment value that is not UTF-8
        self.invalid(spec, lossy_text(&value));
        None
    }

    fn invalid(&mut self, spec: &FieldSpec, value: String) {
        self.errors.push(ConfigError::InvalidFieldType {
            field: spec.name,
            expected: spec.kind,
            value,
        });
    }

    fn required(&mut self, spec: &FieldSpec) -> String {
        self.lookup(spec).unwrap_or_default()
    }

    fn string(&mut self, spec: &FieldSpec, default: impl FnOnce() -> String) -> String {
        self.lookup(spec).unwrap_or_else(default)
    }

    fn route_prefix(&mut self, spec: &FieldSpec, default: impl FnOnce() -> String) -> String {
        match self.lookup(spec) {
            None => default(),
            Some(raw) if is_route_prefix(&raw) => raw,
            Some(raw) => {
                self.invalid(spec, raw);
                default()
            }
        }
    }

    fn optional_string(&mut self, spec: &FieldSpec) -> Option<String> {
        self.lookup(spec).filter(|value| !value.is_empty())
    }

    fn boolean(&mut self, spec: &FieldSpec, default: bool) -> bool {
        match self.lookup(spec) {
            None => default,
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                self.invalid(spec, raw);
                default
            }),
        }
    }

    fn integer<T: FromStr>(&mut self, spec: &FieldSpec, default: T) -> T {
        let Some(raw) = self.lookup(spec) else {
            return default;
        };

        let parsed: Result<T, _> = raw.trim().parse();
        parsed.unwrap_or_else(|_| {
            self.invalid(spec, raw);
            default
        })
    }

    fn optional_integer<T: FromStr>(&mut self, spec: &FieldSpec, default: Option<T>) -> Option<T> {
        let Some(raw) = self.lookup(spec) else {
            return default;
        };
        if raw.trim().is_empty() {
            return None;
        }

        let parsed: Result<T, _> = raw.trim().parse();
        parsed.map_or_else(
            |_| {
                self.invalid(spec, raw);
                default
            },
            Some,
        )
    }

    fn list(&mut self, spec: &FieldSpec, default: impl FnOnce() -> Vec<String>) -> Vec<String> {
        match self.lookup(spec) {
            None => default(),
            Some(raw) => parse_list(&raw).unwrap_or_else(|| {
                self.invalid(spec, raw);
                default()
            }),
        }
    }

    fn finish(self) -> Result<(), ConfigErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigErrors(self.errors))
        }
    }
}
