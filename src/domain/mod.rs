//! Domain layer for the InfluencerFlow backend
//!
//! This module contains the core models shared by every component.

pub mod models;
