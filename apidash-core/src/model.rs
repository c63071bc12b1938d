use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload of `GET /api/info`. Opaque server metadata; no validation
/// beyond the JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
}

/// One entry of the `GET /api/weatherforecast` sequence. The sequence
/// order is display order, taken as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDay {
    pub date: String,
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub summary: String,
}

/// Everything a successful fetch cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub info: ApiInfo,
    pub days: Vec<WeatherDay>,
    pub fetched_at: DateTime<Utc>,
}

/// Lifecycle of one fetch cycle. A fresh state is installed at the
/// start of every cycle and replaced once when it resolves; there is
/// no partial-success state.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Error(String),
    Ready(Snapshot),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            FetchState::Ready(snap) => Some(snap),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_day_deserializes_camel_case_fields() {
        let json = r#"{"date":"2024-01-01","temperatureC":20,"temperatureF":68,"summary":"Mild"}"#;
        let day: WeatherDay = serde_json::from_str(json).expect("valid weather day");

        assert_eq!(day.date, "2024-01-01");
        assert_eq!(day.temperature_c, 20.0);
        assert_eq!(day.temperature_f, 68.0);
        assert_eq!(day.summary, "Mild");
    }

    #[test]
    fn api_info_deserializes() {
        let json = r#"{"name":"Demo","version":"1.0","environment":"Production"}"#;
        let info: ApiInfo = serde_json::from_str(json).expect("valid api info");

        assert_eq!(info.name, "Demo");
        assert_eq!(info.version, "1.0");
        assert_eq!(info.environment, "Production");
    }

    #[test]
    fn fetch_state_accessors_match_exactly_one_variant() {
        let loading = FetchState::Loading;
        assert!(loading.is_loading());
        assert!(loading.error_message().is_none());
        assert!(loading.snapshot().is_none());

        let error = FetchState::Error("boom".to_string());
        assert!(!error.is_loading());
        assert_eq!(error.error_message(), Some("boom"));
        assert!(error.snapshot().is_none());
    }
}
