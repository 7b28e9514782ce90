//! `HttpTransport` over `reqwest`.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use talentdesk_core::config::ClientConfig;
use talentdesk_core::http::{
    ApiRequest, ApiResponse, FilePart, HttpMethod, HttpTransport, RequestBody,
};
use talentdesk_core::{DeskError, Result};

/// Sends requests to the backend rooted at `base_url`.
///
/// Every server answer, whatever its status, is returned as `Ok`; only
/// failures to obtain a response become errors.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> DeskError {
        if e.is_timeout() {
            DeskError::Timeout {
                after_ms: self.timeout.as_millis() as u64,
            }
        } else {
            DeskError::transport(format!("Network Error: {}", e))
        }
    }
}

fn multipart_form(parts: Vec<FilePart>) -> Result<Form> {
    let mut form = Form::new();
    for part in parts {
        let mime = mime_guess::from_path(&part.file_name).first_or_octet_stream();
        let body = Part::bytes(part.bytes)
            .file_name(part.file_name)
            .mime_str(mime.essence_str())
            .map_err(|e| DeskError::internal(format!("Invalid content type: {}", e)))?;
        form = form.part(part.field, body);
    }
    Ok(form)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, self.url(&request.path))
            .timeout(self.timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;

        // Non-JSON bodies (HTML error pages, empty 204s) carry no usable fields.
        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response and hands back the raw request head.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                concat!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\n",
                    "content-length: {}\r\nconnection: close\r\n\r\n{}"
                ),
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&received).to_string()
        });

        (base_url, handle)
    }

    #[tokio::test]
    async fn test_success_body_and_headers() {
        let (base_url, server) = serve_once("200 OK", r#"{"user":{"name":"Ada"}}"#).await;
        let transport = ReqwestTransport::new(format!("{}/", base_url), Duration::from_secs(5));

        let response = transport
            .send(
                ApiRequest::get("/api/auth/me")
                    .header("Authorization", "Bearer abc")
                    .query("limit", 50),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(json!({"user": {"name": "Ada"}})));

        let head = server.await.unwrap().to_lowercase();
        assert!(head.starts_with("get /api/auth/me?limit=50 http/1.1"));
        assert!(head.contains("authorization: bearer abc"));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_failure() {
        let (base_url, _server) =
            serve_once("401 Unauthorized", r#"{"message":"Token expired"}"#).await;
        let transport = ReqwestTransport::new(base_url, Duration::from_secs(5));

        let response = transport.send(ApiRequest::get("/api/auth/me")).await.unwrap();
        assert!(response.is_unauthorized());
        assert_eq!(response.server_message().as_deref(), Some("Token expired"));
    }

    #[tokio::test]
    async fn test_non_json_body_reads_as_none() {
        let (base_url, _server) =
            serve_once("500 Internal Server Error", "<html>oops</html>").await;
        let transport = ReqwestTransport::new(base_url, Duration::from_secs(5));

        let response = transport.send(ApiRequest::get("/api/analytics/summary")).await.unwrap();
        assert_eq!(response.status, 500);
        assert!(response.body.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let transport = ReqwestTransport::new(base_url, Duration::from_secs(5));
        let err = transport.send(ApiRequest::get("/api/auth/me")).await.unwrap_err();
        assert!(err.is_transport());
        assert!(!err.is_server());
    }

    #[test]
    fn test_multipart_form_accepts_guessed_types() {
        let form = multipart_form(vec![
            FilePart::new("files[]", "resume.pdf", b"%PDF".to_vec()),
            FilePart::new("files[]", "notes", b"plain".to_vec()),
        ]);
        assert!(form.is_ok());
    }
}
