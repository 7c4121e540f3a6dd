//! Common library for the Buyback Mini App client
//!
//! This crate provides shared functionality used across the Mini App
//! workspace: the API error taxonomy, environment-driven configuration,
//! and logging initialization.

pub mod config;
pub mod error;
pub mod telemetry;
