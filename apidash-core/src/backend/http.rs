use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{ApiInfo, WeatherDay};

use super::{ApiBackend, Endpoint};

/// What went wrong while fetching one endpoint. The status view folds
/// all of these into a single human-readable error message; the
/// variants exist so the message can say which endpoint and which
/// failure mode.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {endpoint} failed")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: Endpoint,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {endpoint} response as JSON")]
    Parse {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

/// `ApiBackend` over plain HTTP GET against a configured base address.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        debug!("GET {url}");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        debug!("{endpoint} answered {status} ({} bytes)", body.len());

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Parse { endpoint, source })
    }
}

#[async_trait]
impl ApiBackend for HttpBackend {
    async fn fetch_info(&self) -> anyhow::Result<ApiInfo> {
        Ok(self.get_json(Endpoint::Info).await?)
    }

    async fn fetch_forecast(&self) -> anyhow::Result<Vec<WeatherDay>> {
        Ok(self.get_json(Endpoint::Forecast).await?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // MAX may fall inside a multibyte character; back up to a boundary.
    let end = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve the same canned HTTP/1.1 response to every connection.
    async fn spawn_stub(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
        let addr = listener.local_addr().expect("stub server addr");

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;

                let response = format!(
                    "HTTP/1.1 {status_line}\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{body}",
                    body.len(),
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetch_info_parses_success_body() {
        let base = spawn_stub(
            "200 OK",
            r#"{"name":"Demo","version":"1.0","environment":"Production"}"#.to_string(),
        )
        .await;

        let backend = HttpBackend::new(base);
        let info = backend.fetch_info().await.expect("info fetch should succeed");

        assert_eq!(info.name, "Demo");
        assert_eq!(info.version, "1.0");
        assert_eq!(info.environment, "Production");
    }

    #[tokio::test]
    async fn fetch_forecast_preserves_received_order() {
        let base = spawn_stub(
            "200 OK",
            r#"[{"date":"2024-01-02","temperatureC":5,"temperatureF":41,"summary":"Chilly"},
                {"date":"2024-01-01","temperatureC":20,"temperatureF":68,"summary":"Mild"}]"#.to_string(),
        )
        .await;

        let backend = HttpBackend::new(base);
        let days = backend.fetch_forecast().await.expect("forecast fetch should succeed");

        // Not sorted client-side: the out-of-order dates stay as sent.
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2024-01-02");
        assert_eq!(days[1].date, "2024-01-01");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let base = spawn_stub("500 Internal Server Error", r#"{"error":"boom"}"#.to_string()).await;

        let backend = HttpBackend::new(base);
        let err = backend.fetch_info().await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("/api/info"), "message should name the endpoint: {msg}");
        assert!(msg.contains("500"), "message should carry the status: {msg}");
    }

    #[tokio::test]
    async fn invalid_json_is_an_error() {
        let base = spawn_stub("200 OK", "<html>not json</html>".to_string()).await;

        let backend = HttpBackend::new(base);
        let err = backend.fetch_forecast().await.unwrap_err();

        assert!(err.to_string().contains("parse"), "unexpected message: {err}");
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        // Bind then drop, so the port is known-closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let backend = HttpBackend::new(format!("http://{addr}"));
        let err = backend.fetch_info().await.unwrap_err();

        assert!(err.to_string().contains("/api/info"), "unexpected message: {err}");
    }

    #[test]
    fn long_bodies_are_truncated_in_errors() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() < long.len());
    }

    #[test]
    fn truncation_backs_up_to_a_char_boundary() {
        // "°" is two bytes, so byte 200 lands mid-character.
        let long = format!("a{}", "°".repeat(150));
        let truncated = truncate_body(&long);

        assert!(truncated.ends_with("..."));
        assert!(truncated.strip_suffix("...").unwrap().chars().all(|c| c == 'a' || c == '°'));
    }

    #[tokio::test]
    async fn multibyte_error_body_still_yields_an_error() {
        let body = format!("a{}", "°".repeat(150));
        let base = spawn_stub("500 Internal Server Error", body).await;

        let backend = HttpBackend::new(base);
        let err = backend.fetch_info().await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("500"), "message should carry the status: {msg}");
    }
}
