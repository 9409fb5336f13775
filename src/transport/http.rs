//! reqwest-backed [`Transport`].

use async_trait::async_trait;
use reqwest::{redirect, Client};

use super::{HttpRequest, HttpResponse, Method, RequestBody, Transport};
use crate::config::ClientConfig;
use crate::error::TransportError;

/// Sends requests to a service root such as `https://ops.example.com/acme/`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpTransport {
    /// Create with explicit configuration.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, TransportError> {
        // 302 is a success status for this service, so redirects must surface as-is.
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            api_key,
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(config.base_url.clone(), config.api_key.clone())
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build a request with optional auth header.
    fn request(&self, request: &HttpRequest) -> reqwest::RequestBuilder {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut req = self.client.request(method, self.url(&request.path));
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        match &request.body {
            Some(RequestBody::Json(body)) => req.json(body),
            Some(RequestBody::Form(fields)) => req.form(fields),
            None => req,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!("{} {}", request.method.as_str(), request.path);
        let response = self.request(&request).send().await?;
        let status = response.status();
        let status_line = format!("{:?} {}", response.version(), status);
        // The status already arrived, so a broken body still counts as a response.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read body of {} response: {}", status, e);
                String::new()
            }
        };
        Ok(HttpResponse {
            status: status.as_u16(),
            status_line,
            body,
        })
    }
}
