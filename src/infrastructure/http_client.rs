use crate::application::services::{HttpClient, HttpRequestService};
use crate::domain::entities::{Method as DomainMethod, Request, Response};
use crate::domain::errors::QurlError;
use crate::domain::value_objects::{JsonBody, Url};

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Method, Request as HyperRequest};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tokio_native_tls::native_tls;

/// Infrastructure implementation of HttpClient using Hyper
/// This is a low-level HTTP(S) transport that the application service uses
pub struct HyperHttpClient {
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl HyperHttpClient {
    pub fn new() -> Result<Self, QurlError> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);

        let tls = native_tls::TlsConnector::new()
            .map_err(|e| QurlError::transport("Failed to initialise TLS", e))?;
        let https = HttpsConnector::from((http, tokio_native_tls::TlsConnector::from(tls)));

        let client = Client::builder(TokioExecutor::new()).build::<_, Full<Bytes>>(https);
        Ok(Self { client })
    }

    /// Creates a configured HTTP request service using this client
    pub fn create_request_service(self) -> HttpRequestService {
        HttpRequestService::new(Box::new(self))
    }
}

#[async_trait]
impl HttpClient for HyperHttpClient {
    async fn send(&self, request: Request) -> Result<Response, QurlError> {
        let hyper_request = RequestAdapter::to_hyper_request(request)?;
        let hyper_response = self.execute_http_request(hyper_request).await?;
        ResponseAdapter::to_domain_response(hyper_response).await
    }
}

impl HyperHttpClient {
    async fn execute_http_request(
        &self,
        request: HyperRequest<Full<Bytes>>,
    ) -> Result<hyper::Response<Incoming>, QurlError> {
        self.client
            .request(request)
            .await
            .map_err(|e| QurlError::transport("HTTP request execution failed", e))
    }
}

/// Adapter for converting domain requests to Hyper requests
struct RequestAdapter;

impl RequestAdapter {
    fn to_hyper_request(domain_request: Request) -> Result<HyperRequest<Full<Bytes>>, QurlError> {
        let method = MethodAdapter::to_hyper_method(domain_request.method);
        let uri = UriAdapter::to_hyper_uri(&domain_request.url);
        let body = BodyAdapter::to_hyper_body(&domain_request.body);

        let mut builder = HyperRequest::builder().method(method).uri(uri.clone());
        for (name, value) in &domain_request.headers {
            let (name, value) = HeaderAdapter::to_hyper_header(name, value)?;
            builder = builder.header(name, value);
        }

        builder
            .body(body)
            .map_err(|e| QurlError::transport("Failed to build HTTP request", e))
    }
}

/// Adapter for converting Hyper responses into fully read domain responses
struct ResponseAdapter;

impl ResponseAdapter {
    async fn to_domain_response(hyper_response: hyper::Response<Incoming>) -> Result<Response, QurlError> {
        let (parts, incoming) = hyper_response.into_parts();
        let body = Self::extract_response_body(incoming).await?;

        Ok(Response {
            version: parts.version,
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }

    /// Consumes the body stream; it is dropped on both the success and error path
    async fn extract_response_body(incoming: Incoming) -> Result<Bytes, QurlError> {
        incoming
            .collect()
            .await
            .map(|collected| collected.to_bytes())
            .map_err(|e| QurlError::BodyReadError(Box::new(e)))
    }
}

/// Adapter for converting domain HTTP methods to Hyper methods
struct MethodAdapter;

impl MethodAdapter {
    fn to_hyper_method(domain_method: DomainMethod) -> Method {
        match domain_method {
            DomainMethod::Get => Method::GET,
            DomainMethod::Post => Method::POST,
            DomainMethod::Put => Method::PUT,
            DomainMethod::Delete => Method::DELETE,
            DomainMethod::Patch => Method::PATCH,
            DomainMethod::Head => Method::HEAD,
            DomainMethod::Options => Method::OPTIONS,
        }
    }
}

/// Adapter for converting domain URLs to Hyper URIs
struct UriAdapter;

impl UriAdapter {
    fn to_hyper_uri(domain_url: &Url) -> &hyper::Uri {
        &domain_url.0
    }
}

/// Adapter for converting domain request bodies to Hyper bodies
struct BodyAdapter;

impl BodyAdapter {
    fn to_hyper_body(domain_body: &Option<JsonBody>) -> Full<Bytes> {
        match domain_body {
            Some(json_body) => Full::new(Bytes::copy_from_slice(json_body.as_bytes())),
            None => Full::new(Bytes::new()),
        }
    }
}

/// Adapter for handling HTTP headers
struct HeaderAdapter;

impl HeaderAdapter {
    fn to_hyper_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), QurlError> {
        let header = || format!("{}: {}", name, value);
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| QurlError::invalid_header(&header(), e))?;
        let value = HeaderValue::from_str(value).map_err(|e| QurlError::invalid_header(&header(), e))?;
        Ok((name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned reply on a local port and returns the URL to hit
    async fn serve_once(reply: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => return,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = socket.write_all(reply).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}/health", addr)
    }

    fn get(url: &str) -> Request {
        Request {
            method: DomainMethod::Get,
            url: Url::new(url).unwrap(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn reads_status_headers_and_body() {
        let url = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\nX-Test: yes\r\n\r\npong").await;
        let client = HyperHttpClient::new().unwrap();

        let response = client.send(get(&url)).await.unwrap();

        assert_eq!(response.status, hyper::StatusCode::OK);
        assert_eq!(response.version, hyper::Version::HTTP_11);
        assert_eq!(response.headers["x-test"], "yes");
        assert_eq!(&response.body[..], b"pong");
    }

    #[tokio::test]
    async fn truncated_body_is_a_body_read_error() {
        let url = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nshort").await;
        let client = HyperHttpClient::new().unwrap();

        let err = client.send(get(&url)).await.unwrap_err();
        assert!(matches!(err, QurlError::BodyReadError(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HyperHttpClient::new().unwrap();
        let err = client
            .send(get(&format!("http://{}/graphql", addr)))
            .await
            .unwrap_err();
        assert!(matches!(err, QurlError::TransportError { .. }), "got {err:?}");
    }

    #[test]
    fn converts_graphql_request() {
        let request = Request {
            method: DomainMethod::Post,
            url: Url::new("https://api.example.com/graphql").unwrap(),
            headers: vec![
                ("Content-Type".into(), "application/json".into()),
                ("Authorization".into(), "Bearer abc123".into()),
            ],
            body: Some(JsonBody(r#"{"query":"{ping}","variables":null}"#.into())),
        };

        let hyper_request = RequestAdapter::to_hyper_request(request).unwrap();

        assert_eq!(hyper_request.method(), Method::POST);
        assert_eq!(hyper_request.uri(), "https://api.example.com/graphql");
        assert_eq!(hyper_request.headers()["content-type"], "application/json");
        assert_eq!(hyper_request.headers()["authorization"], "Bearer abc123");
    }

    #[test]
    fn maps_every_method() {
        assert_eq!(MethodAdapter::to_hyper_method(DomainMethod::Delete), Method::DELETE);
        assert_eq!(MethodAdapter::to_hyper_method(DomainMethod::Options), Method::OPTIONS);
        assert_eq!(MethodAdapter::to_hyper_method(DomainMethod::Head), Method::HEAD);
    }

    #[test]
    fn rejects_illegal_header_value() {
        let err = HeaderAdapter::to_hyper_header("X-Bad", "line\nbreak").unwrap_err();
        assert!(matches!(err, QurlError::InvalidHeader { .. }));
    }
}
