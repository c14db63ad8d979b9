pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod server;
pub mod templates;
pub mod types;

// Use cases shared by the web page and the CLI
pub mod app;

// Normalized directory data and its map projection
pub mod domain;
pub mod map;
