//! Core library for the `apidash` CLI.
//!
//! This crate defines:
//! - Configuration & base-address resolution
//! - Abstraction over the HTTP backend
//! - The status-view fetch lifecycle (loading / error / ready)
//!
//! It is used by `apidash-cli`, but can also be reused by other binaries or services.

pub mod backend;
pub mod config;
pub mod model;
pub mod view;

pub use backend::http::HttpBackend;
pub use backend::{ApiBackend, Endpoint};
pub use config::{Config, DEFAULT_BASE_URL};
pub use model::{ApiInfo, FetchState, Snapshot, WeatherDay};
pub use view::StatusView;
