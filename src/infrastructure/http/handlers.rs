//! Placeholder JSON endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::Settings;

/// Capabilities advertised by the root endpoint
pub const FEATURES: [&str; 4] = [
    "AI-powered multilingual voice outreach",
    "Automated campaign management",
    "Creator discovery and matching",
    "Real-time performance tracking",
];

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootResponse {
    /// `"<app_name> API"`
    pub message: String,
    /// Always `"healthy"`
    pub status: String,
    /// Application version
    pub version: String,
    /// See [`FEATURES`]
    pub features: Vec<String>,
}

/// Per-dependency status reported by the health check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Database status
    pub database: String,
    /// AI provider status
    pub ai_services: String,
    /// Voice synthesis status
    pub voice_synthesis: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Always `"healthy"`
    pub status: String,
    /// RFC 3339, UTC, whole seconds
    pub timestamp: String,
    /// Dependency statuses
    pub services: ServiceStatus,
}

/// Body of the API test endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestResponse {
    /// Fixed confirmation message
    pub message: String,
    /// Always `"test"`
    pub endpoint: String,
}

/// `GET /`
pub async fn root(State(settings): State<Arc<Settings>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{} API", settings.app_name),
        status: "healthy".to_string(),
        version: settings.app_version.clone(),
        features: FEATURES.iter().map(ToString::to_string).collect(),
    })
}

/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        services: ServiceStatus {
            database: "connected".to_string(),
            ai_services: "ready".to_string(),
            voice_synthesis: "ready".to_string(),
        },
    })
}

/// `GET {api_v1_prefix}/test`
pub async fn test_endpoint() -> Json<TestResponse> {
    Json(TestResponse {
        message: "API is working!".to_string(),
        endpoint: "test".to_string(),
    })
}
