//! Domain models

pub mod settings;

pub use settings::Settings;
