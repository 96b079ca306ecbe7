//! Practicum adapter (homework review API).
//!
//! Implements the `hwbot-core` StatusApi port over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use hwbot_core::{domain::Cursor, errors::Error, ports::StatusApi, ApiRequestError, Result};

#[derive(Clone, Debug)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http,
        })
    }
}

#[async_trait]
impl StatusApi for PracticumClient {
    async fn fetch_status(&self, from_date: Cursor) -> Result<serde_json::Value> {
        let resp = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date.0)])
            .send()
            .await
            .map_err(|e| ApiRequestError::Transport(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let url = resp.url().to_string();
            let headers = format!("{:?}", resp.headers());
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiRequestError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                url,
                headers,
                body,
            }
            .into());
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ApiRequestError::Transport(e.to_string()))?;
        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| ApiRequestError::Decode(e.to_string()))?;

        tracing::debug!(from_date = from_date.0, "status api answered");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    /// Serve one canned HTTP response and hand back the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = sock.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            sock.write_all(response.as_bytes()).await.unwrap();
            sock.shutdown().await.ok();
            request
        });
        (format!("http://{addr}/api/user_api/homework_statuses/"), handle)
    }

    fn client(endpoint: &str) -> PracticumClient {
        PracticumClient::new(endpoint, "secret-token", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn sends_cursor_and_oauth_header() {
        let (endpoint, server) =
            serve_once("200 OK", r#"{"homeworks":[],"current_date":1700000000}"#).await;

        let value = client(&endpoint)
            .fetch_status(Cursor(1_699_999_000))
            .await
            .unwrap();
        assert_eq!(value["current_date"], 1_700_000_000);

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with(
            "get /api/user_api/homework_statuses/?from_date=1699999000 http/1.1"
        ));
        assert!(request.contains("authorization: oauth secret-token"));
    }

    #[tokio::test]
    async fn non_ok_status_is_an_api_request_failure() {
        let (endpoint, server) = serve_once("503 Service Unavailable", "down").await;

        let err = client(&endpoint).fetch_status(Cursor(0)).await.unwrap_err();
        server.await.unwrap();
        let Error::ApiRequest(api) = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(api.status(), Some(503));
        let text = err.to_string();
        assert!(text.contains(&endpoint));
        assert!(text.contains("from_date=0"));
        assert!(text.contains("down"));
    }

    #[tokio::test]
    async fn created_is_not_ok_either() {
        let (endpoint, server) = serve_once("201 Created", "{}").await;
        let err = client(&endpoint).fetch_status(Cursor(0)).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(
            err,
            Error::ApiRequest(ApiRequestError::Status { status: 201, .. })
        ));
    }

    #[tokio::test]
    async fn undecodable_body_is_an_api_request_failure() {
        let (endpoint, server) = serve_once("200 OK", "<html>oops</html>").await;
        let err = client(&endpoint).fetch_status(Cursor(0)).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, Error::ApiRequest(ApiRequestError::Decode(_))));
    }

    #[tokio::test]
    async fn connection_failure_is_an_api_request_failure() {
        // Bind then drop to get a port nobody listens on.
        let addr = {
            let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
            l.local_addr().unwrap()
        };
        let err = client(&format!("http://{addr}/"))
            .fetch_status(Cursor(0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ApiRequest(ApiRequestError::Transport(_))
        ));
        assert!(!err.is_fatal());
    }
}
