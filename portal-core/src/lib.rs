//! Core library for the WiFi scan portal.
//! This crate defines the page ports (traits) and the scan data model,
//! the controller that fills the network dropdown of a configuration page,
//! and a small development server standing in for the device's `/scan`
//! endpoint.

pub mod backends;
pub mod config;
pub mod controller;
pub mod factory;
pub mod frontends;
pub mod page;
pub mod scan_client;
pub mod structs;
pub mod traits;
pub mod web_server;

// Define a shared Error and Result type for the entire crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid scan response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scan endpoint returned status {0}")]
    Status(u16),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Web server error: {0}")]
    WebServer(#[from] axum::BoxError),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Page element error: {0}")]
    Dom(String),
}

/// A specialized `Result` type for this crate's operations.
pub type Result<T> = std::result::Result<T, Error>;
