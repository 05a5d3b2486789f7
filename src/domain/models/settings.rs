//! Typed application settings and their declared defaults.

use std::fmt;

/// Application settings, resolved once at startup and shared read-only.
///
/// Built by [`SettingsLoader`](crate::infrastructure::config::SettingsLoader);
/// consumers receive it as `Arc<Settings>` rather than reaching for a global.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    // App settings
    /// Display name, also used in the root endpoint message
    pub app_name: String,
    /// Version reported by the root endpoint
    pub app_version: String,
    /// Raises the default log level to debug
    pub debug: bool,

    // API settings
    /// Path prefix for versioned endpoints
    pub api_v1_prefix: String,

    // Database settings
    /// Supabase project URL
    pub supabase_url: String,
    /// Supabase anon key
    pub supabase_key: String,
    /// Supabase service-role key
    pub supabase_service_key: Option<String>,

    // AI services
    /// OpenAI API key
    pub openai_api_key: String,
    /// ElevenLabs API key
    pub elevenlabs_api_key: String,
    /// Perplexity API key
    pub perplexity_api_key: Option<String>,

    // Authentication
    /// JWT signing secret
    pub secret_key: String,
    /// JWT signing algorithm
    pub algorithm: String,
    /// Access token lifetime
    pub access_token_expire_minutes: i64,

    // Email settings
    /// SMTP relay host
    pub smtp_host: Option<String>,
    /// SMTP relay port
    pub smtp_port: Option<i64>,
    /// SMTP login
    pub smtp_username: Option<String>,
    /// SMTP password
    pub smtp_password: Option<String>,

    /// Maximum upload size in bytes
    pub max_file_size: i64,
    /// Accepted upload extensions, with leading dot
    pub allowed_file_types: Vec<String>,

    /// Maximum voice clip length in seconds
    pub max_voice_duration: i64,
    /// ISO 639-1 codes
    pub supported_languages: Vec<String>,

    /// Requests allowed per client per minute
    pub rate_limit_per_minute: i64,

    /// CORS origins
    pub allowed_origins: Vec<String>,
}

pub(crate) fn default_app_name() -> String {
    "InfluencerFlow AI Platform".to_string()
}

pub(crate) fn default_app_version() -> String {
    "1.0.0".to_string()
}

pub(crate) const fn default_debug() -> bool {
    false
}

pub(crate) fn default_api_v1_prefix() -> String {
    "/api/v1".to_string()
}

pub(crate) fn default_algorithm() -> String {
    "HS256".to_string()
}

pub(crate) const fn default_access_token_expire_minutes() -> i64 {
    30
}

pub(crate) const fn default_smtp_port() -> Option<i64> {
    Some(587)
}

pub(crate) const fn default_max_file_size() -> i64 {
    10 * 1024 * 1024
}

pub(crate) fn default_allowed_file_types() -> Vec<String> {
    [".pdf", ".doc", ".docx", ".txt", ".mp3", ".wav", ".m4a"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub(crate) const fn default_max_voice_duration() -> i64 {
    300
}

pub(crate) fn default_supported_languages() -> Vec<String> {
    [
        "en", "es", "fr", "de", "it", "pt", "ru", "zh", "ja", "ko", "ar", "hi",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

pub(crate) const fn default_rate_limit_per_minute() -> i64 {
    60
}

pub(crate) fn default_allowed_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://localhost:5173",
        "https://influencerflow.com",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

const REDACTED: &str = "[REDACTED]";

fn redact_opt(value: Option<&String>) -> Option<&'static str> {
    value.map(|_| REDACTED)
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .field("debug", &self.debug)
            .field("api_v1_prefix", &self.api_v1_prefix)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &REDACTED)
            .field(
                "supabase_service_key",
                &redact_opt(self.supabase_service_key.as_ref()),
            )
            .field("openai_api_key", &REDACTED)
            .field("elevenlabs_api_key", &REDACTED)
            .field(
                "perplexity_api_key",
                &redact_opt(self.perplexity_api_key.as_ref()),
            )
            .field("secret_key", &REDACTED)
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &redact_opt(self.smtp_password.as_ref()))
            .field("max_file_size", &self.max_file_size)
            .field("allowed_file_types", &self.allowed_file_types)
            .field("max_voice_duration", &self.max_voice_duration)
            .field("supported_languages", &self.supported_languages)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}
