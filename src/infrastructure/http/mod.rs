//! HTTP API surface
//!
//! Placeholder endpoints served with axum until the feature routers land.

pub mod handlers;
pub mod server;

pub use server::{build_router, shutdown_signal, HttpServer, HttpServerConfig};
