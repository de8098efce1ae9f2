//! HTTP client for communicating with the Sirius API
//!
//! The base URL is fixed at construction; every request path is appended
//! to it verbatim.

use super::traits::{ApiRequest, RequestAdapter, RequestResult, TransportError};
use crate::config::AppConfig;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Production [`RequestAdapter`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct SiriusClient {
    http: reqwest::Client,
    base_url: String,
}

impl SiriusClient {
    /// Create a client for `base_url`. `timeout` of `None` leaves requests
    /// unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        Url::parse(base_url).map_err(|e| TransportError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, TransportError> {
        Self::new(config.sirius_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RequestAdapter for SiriusClient {
    async fn send(&self, request: ApiRequest) -> Result<RequestResult, TransportError> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, "sending request to Sirius");

        let mut builder = self.http.request(request.method.clone(), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Request(e)
            }
        })?;

        // Once the status is known the request has been answered; a body
        // that cannot be read counts the same as a body that is not JSON
        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) if bytes.is_empty() => None,
            Ok(bytes) => match serde_json::from_slice::<serde_json::Value>(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(status, error = %e, "response body is not JSON");
                    None
                }
            },
            Err(e) => {
                tracing::debug!(
                    status,
                    error = %e,
                    timed_out = e.is_timeout(),
                    "could not read response body"
                );
                None
            }
        };

        tracing::debug!(status, %url, "Sirius responded");
        Ok(RequestResult { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormController, FormDefinition, SubmissionOutcome};
    use crate::submission::SubmissionCoordinator;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn form_request(body: &str) -> ApiRequest {
        ApiRequest::new(Method::POST, "/auth/change-password")
            .with_header(
                "Content-Type",
                "application/x-www-form-urlencoded;charset=UTF-8",
            )
            .with_body(body.to_string())
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let err = SiriusClient::new("not a url", None).unwrap_err();
        assert!(matches!(err, TransportError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = SiriusClient::new("http://localhost:8081/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8081");
        assert_eq!(
            client.url("/auth/change-password"),
            "http://localhost:8081/auth/change-password"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let client = SiriusClient::new("http://localhost:8080/sirius", None).unwrap();
        assert_eq!(client.url("/api/team"), "http://localhost:8080/sirius/api/team");
    }

    #[tokio::test]
    async fn test_send_returns_status_and_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/change-password")
            .match_header(
                "content-type",
                "application/x-www-form-urlencoded;charset=UTF-8",
            )
            .match_body("existingPassword=BadPass&password=NewPass&confirmPassword=NewPass")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors":"Password supplied was incorrect or user is not active"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = SiriusClient::new(&server.url(), None).unwrap();
        let result = client
            .send(form_request(
                "existingPassword=BadPass&password=NewPass&confirmPassword=NewPass",
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.status, 400);
        assert_eq!(
            result.body,
            Some(json!({"errors": "Password supplied was incorrect or user is not active"}))
        );
    }

    #[tokio::test]
    async fn test_send_with_empty_body_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("DELETE", "/auth/user/123")
            .with_status(200)
            .create_async()
            .await;

        let client = SiriusClient::new(&server.url(), None).unwrap();
        let result = client
            .send(ApiRequest::new(Method::DELETE, "/auth/user/123"))
            .await
            .unwrap();

        assert_eq!(result, RequestResult::new(200, None));
    }

    #[tokio::test]
    async fn test_send_with_non_json_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/change-password")
            .with_status(418)
            .with_body("I'm a teapot")
            .create_async()
            .await;

        let client = SiriusClient::new(&server.url(), None).unwrap();
        let result = client.send(form_request("")).await.unwrap();

        assert_eq!(result.status, 418);
        assert!(result.body.is_none());
    }

    /// Answer one request with a 200 that promises more body than it sends
    async fn truncated_ok_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{}",
                )
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
            // Hold the socket open until the client gives up on the body
            while let Ok(n) = socket.read(&mut buf).await {
                if n == 0 {
                    break;
                }
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_truncated_body_keeps_status() {
        let url = truncated_ok_server().await;
        let client = SiriusClient::new(&url, None).unwrap();

        let result = client
            .send(ApiRequest::new(Method::DELETE, "/auth/user/123"))
            .await
            .unwrap();

        assert_eq!(result, RequestResult::new(200, None));
    }

    #[tokio::test]
    async fn test_truncated_success_still_succeeds() {
        let url = truncated_ok_server().await;
        let client = SiriusClient::new(&url, None).unwrap();
        let coordinator = SubmissionCoordinator::new(Arc::new(client));
        let mut form = FormController::new(FormDefinition::resend_confirmation());
        form.set_field("email", "system.admin@opgtest.com").unwrap();

        let outcome = coordinator.submit(&mut form).await.unwrap();

        assert_eq!(outcome, SubmissionOutcome::Succeeded);
        assert_eq!(form.snapshot().get("email"), Some(""));
    }

    #[tokio::test]
    async fn test_send_to_closed_port_is_transport_error() {
        let client = SiriusClient::new("http://127.0.0.1:1", None).unwrap();
        let result = client.send(form_request("")).await;
        assert!(result.is_err());
    }
}
