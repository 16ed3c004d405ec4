use crate::domain::errors::QurlError;
use hyper::http::Uri;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Represents a validated absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url(pub Uri);

impl Url {
    /// Creates a new Url with validation
    ///
    /// # Arguments
    /// * `url` - The URL string to parse
    ///
    /// # Returns
    /// * `Ok(Url)` - URL with both a scheme and an authority
    /// * `Err(QurlError::InvalidUrl)` - If the URL is malformed or relative
    pub fn new(url: &str) -> Result<Self, QurlError> {
        let uri = url
            .parse::<Uri>()
            .map_err(|e| QurlError::invalid_url(url, e))?;

        if uri.scheme().is_none() {
            return Err(QurlError::invalid_url(url, "missing scheme"));
        }
        if uri.authority().is_none() {
            return Err(QurlError::invalid_url(url, "missing host"));
        }
        Ok(Url(uri))
    }

    /// Whether `raw` would be accepted by [`Url::new`]
    pub fn is_absolute(raw: &str) -> bool {
        Self::new(raw).is_ok()
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme_str().unwrap_or_default()
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// GraphQL variables, always a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Variables(pub Map<String, Value>);

impl Variables {
    pub fn parse(raw: &str) -> Result<Self, QurlError> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(Variables(map)),
            Ok(other) => Err(QurlError::EncodingError(format!(
                "variables must be a JSON object, got '{}'",
                other
            ))),
            Err(e) => Err(QurlError::EncodingError(format!(
                "variables are not valid JSON: {}",
                e
            ))),
        }
    }
}

/// Represents an encoded JSON request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody(pub String);

impl JsonBody {
    pub fn encode<T: Serialize>(value: &T) -> Result<Self, QurlError> {
        serde_json::to_string(value)
            .map(JsonBody)
            .map_err(|e| QurlError::EncodingError(e.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}
