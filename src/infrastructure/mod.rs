//! Infrastructure layer module
//!
//! This module contains the adapters that connect the application to its
//! environment:
//! - Configuration management
//! - Logging infrastructure
//! - HTTP API surface

pub mod config;
pub mod http;
pub mod logging;
