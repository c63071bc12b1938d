use crate::model::{ApiInfo, WeatherDay};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod http;

/// Endpoints exposed by the backend. `Health` exists on the server and
/// is listed in the endpoints panel, but a fetch cycle only calls
/// `Info` and `Forecast`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    Info,
    Forecast,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Health => "/health",
            Endpoint::Info => "/api/info",
            Endpoint::Forecast => "/api/weatherforecast",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Endpoint::Health => "Health check",
            Endpoint::Info => "API information",
            Endpoint::Forecast => "Weather data",
        }
    }

    pub const fn all() -> &'static [Endpoint] {
        &[Endpoint::Health, Endpoint::Info, Endpoint::Forecast]
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// The seam between the status view and the HTTP collaborator. Tests
/// substitute a scripted implementation here.
#[async_trait]
pub trait ApiBackend: Send + Sync + Debug {
    async fn fetch_info(&self) -> anyhow::Result<ApiInfo>;

    async fn fetch_forecast(&self) -> anyhow::Result<Vec<WeatherDay>>;
}
