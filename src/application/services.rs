use crate::domain::entities::{Request, Response};
use crate::domain::errors::QurlError;
use async_trait::async_trait;
use tracing::debug;

/// Trait for HTTP clients to enable mocking and dependency inversion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, QurlError>;
}

/// Application service for orchestrating HTTP request workflows
pub struct HttpRequestService {
    http_client: Box<dyn HttpClient>,
}

impl HttpRequestService {
    pub fn new(http_client: Box<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Sends a single HTTP request
    pub async fn send_request(&self, request: Request) -> Result<Response, QurlError> {
        RequestValidator::validate(&request)?;
        debug!(
            method = %request.method,
            url = %request.url,
            authorized = request.header("Authorization").is_some(),
            "sending request"
        );

        let response = self.http_client.send(request).await?;
        debug!(status = %response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }
}

/// Checks a built request before it reaches the transport
pub struct RequestValidator;

impl RequestValidator {
    pub fn validate(request: &Request) -> Result<(), QurlError> {
        match request.url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(QurlError::invalid_url(
                &request.url.to_string(),
                format!("unsupported scheme '{}', expected http or https", other),
            )),
        }
    }
}
