use crate::domain::errors::QurlError;
use crate::domain::value_objects::{JsonBody, Url, Variables};
use hyper::body::Bytes;
use hyper::{HeaderMap, StatusCode, Version};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Command family, selects which resolver and builder rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Rest,
    GraphQl,
}

/// HTTP method enum for simplicity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl FromStr for Method {
    type Err = QurlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            _ => Err(QurlError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        };
        f.write_str(name)
    }
}

/// Where the GraphQL query text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    Inline(String),
    File(PathBuf),
}

impl QuerySource {
    /// Resolves the source to raw query text, reading the file at most once
    pub fn read(self) -> Result<String, QurlError> {
        match self {
            QuerySource::Inline(text) => Ok(text),
            QuerySource::File(path) => std::fs::read_to_string(&path)
                .map_err(|source| QurlError::FileReadError { path, source }),
        }
    }
}

/// GraphQL request payload as sent on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlQuery {
    pub query: String,
    pub variables: Option<Variables>,
}

/// Fully resolved, pre-transport view of one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub kind: CommandKind,
    pub method: Method,
    pub endpoint: Url,
    /// Extra headers in the order and casing they were supplied
    pub headers: Vec<(String, String)>,
    /// Bearer token, never empty when present
    pub token: Option<String>,
    /// Set for GraphQL only
    pub query: Option<GraphQlQuery>,
}

/// Represents a transport-ready HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>, // Key-value pairs for headers
    pub body: Option<JsonBody>,
}

impl Request {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Represents a fully read HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    pub version: Version,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parsing_is_case_insensitive() {
        assert_eq!("delete".parse::<Method>().unwrap(), Method::Delete);
        assert_eq!("Patch".parse::<Method>().unwrap(), Method::Patch);
        assert_eq!(Method::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = "FETCH".parse::<Method>().unwrap_err();
        assert!(matches!(err, QurlError::InvalidMethod(m) if m == "FETCH"));
    }

    #[test]
    fn inline_source_reads_as_is() {
        let text = QuerySource::Inline("{ ping }".into()).read().unwrap();
        assert_eq!(text, "{ ping }");
    }

    #[test]
    fn missing_file_source_fails_with_path() {
        let path = PathBuf::from("/definitely/not/here.graphql");
        let err = QuerySource::File(path.clone()).read().unwrap_err();
        assert!(matches!(err, QurlError::FileReadError { path: p, .. } if p == path));
    }
}
