//! Declarative description of every settings field.
//!
//! The table drives which environment keys the loader collects, which fields
//! are reported missing, and the expected type quoted in parse errors.

use std::fmt;

/// Declared value type of a settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Taken verbatim
    String,
    /// `true/false`, `1/0`, `yes/no`, `on/off`, `t/f` or `y/n`
    Boolean,
    /// Signed 64-bit decimal
    Integer,
    /// JSON array of strings, or comma-separated
    StringList,
    /// Literal URL path prefix, safe to register as a route
    RoutePrefix,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::StringList => "list of strings",
            Self::RoutePrefix => "route prefix",
        };
        f.write_str(name)
    }
}

/// One settings field: its lookup name, type and required flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Lowercase field name, matched against keys ignoring case
    pub name: &'static str,
    /// Declared value type
    pub kind: FieldKind,
    /// Whether the field has no default
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            required: true,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

pub(crate) const APP_NAME: FieldSpec = FieldSpec::optional("app_name", FieldKind::String);
pub(crate) const APP_VERSION: FieldSpec = FieldSpec::optional("app_version", FieldKind::String);
pub(crate) const DEBUG: FieldSpec = FieldSpec::optional("debug", FieldKind::Boolean);
pub(crate) const API_V1_PREFIX: FieldSpec =
    FieldSpec::optional("api_v1_prefix", FieldKind::RoutePrefix);
pub(crate) const SUPABASE_URL: FieldSpec = FieldSpec::required("supabase_url");
pub(crate) const SUPABASE_KEY: FieldSpec = FieldSpec::required("supabase_key");
pub(crate) const SUPABASE_SERVICE_KEY: FieldSpec =
    FieldSpec::optional("supabase_service_key", FieldKind::String);
pub(crate) const OPENAI_API_KEY: FieldSpec = FieldSpec::required("openai_api_key");
pub(crate) const ELEVENLABS_API_KEY: FieldSpec = FieldSpec::required("elevenlabs_api_key");
pub(crate) const PERPLEXITY_API_KEY: FieldSpec =
    FieldSpec::optional("perplexity_api_key", FieldKind::String);
pub(crate) const SECRET_KEY: FieldSpec = FieldSpec::required("secret_key");
pub(crate) const ALGORITHM: FieldSpec = FieldSpec::optional("algorithm", FieldKind::String);
pub(crate) const ACCESS_TOKEN_EXPIRE_MINUTES: FieldSpec =
    FieldSpec::optional("access_token_expire_minutes", FieldKind::Integer);
pub(crate) const SMTP_HOST: FieldSpec = FieldSpec::optional("smtp_host", FieldKind::String);
pub(crate) const SMTP_PORT: FieldSpec = FieldSpec::optional("smtp_port", FieldKind::Integer);
pub(crate) const SMTP_USERNAME: FieldSpec = FieldSpec::optional("smtp_username", FieldKind::String);
pub(crate) const SMTP_PASSWORD: FieldSpec = FieldSpec::optional("smtp_password", FieldKind::String);
pub(crate) const MAX_FILE_SIZE: FieldSpec =
    FieldSpec::optional("max_file_size", FieldKind::Integer);
pub(crate) const ALLOWED_FILE_TYPES: FieldSpec =
    FieldSpec::optional("allowed_file_types", FieldKind::StringList);
pub(crate) const MAX_VOICE_DURATION: FieldSpec =
    FieldSpec::optional("max_voice_duration", FieldKind::Integer);
pub(crate) const SUPPORTED_LANGUAGES: FieldSpec =
    FieldSpec::optional("supported_languages", FieldKind::StringList);
pub(crate) const RATE_LIMIT_PER_MINUTE: FieldSpec =
    FieldSpec::optional("rate_limit_per_minute", FieldKind::Integer);
pub(crate) const ALLOWED_ORIGINS: FieldSpec =
    FieldSpec::optional("allowed_origins", FieldKind::StringList);

/// All fields in declaration order
pub const SETTINGS_FIELDS: &[FieldSpec] = &[
    APP_NAME,
    APP_VERSION,
    DEBUG,
    API_V1_PREFIX,
    SUPABASE_URL,
    SUPABASE_KEY,
    SUPABASE_SERVICE_KEY,
    OPENAI_API_KEY,
    ELEVENLABS_API_KEY,
    PERPLEXITY_API_KEY,
    SECRET_KEY,
    ALGORITHM,
    ACCESS_TOKEN_EXPIRE_MINUTES,
    SMTP_HOST,
    SMTP_PORT,
    SMTP_USERNAME,
    SMTP_PASSWORD,
    MAX_FILE_SIZE,
    ALLOWED_FILE_TYPES,
    MAX_VOICE_DURATION,
    SUPPORTED_LANGUAGES,
    RATE_LIMIT_PER_MINUTE,
    ALLOWED_ORIGINS,
];

/// Look up a field by name, ignoring ASCII case
pub fn find_field(name: &str) -> Option<&'static FieldSpec> {
    SETTINGS_FIELDS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Names of the fields that have no default
pub fn required_fields() -> impl Iterator<Item = &'static str> {
    SETTINGS_FIELDS
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| spec.name)
}

/// Parse a boolean: true/false, 1/0, yes/no, on/off, t/f or y/n, ignoring case
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

/// Whether `raw` can be joined into a route path without being read as a
/// capture, a wildcard or an invalid parameter.
pub fn is_route_prefix(raw: &str) -> bool {
    !raw.contains(['{', '}'])
        && raw
            .split('/')
            .all(|segment| !segment.starts_with([':', '*']))
}

/// Parse a list given either as a JSON array of strings or comma-separated
pub fn parse_list(raw: &str) -> Option<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).ok();
    }

    Some(
        trimmed
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect(),
    )
}
